pub mod action_service;
pub mod auth_service;
pub mod client;
pub mod config;
pub mod list_service;
pub mod models;
pub mod notification_service;

pub use action_service::{AdminActionService, ApiActionService};
pub use auth_service::{ApiAuthService, AuthService};
pub use client::{classify_error, optional_params, AdminApiClient, QueryParams};
pub use config::AppConfig;
pub use list_service::{ApiListSource, ListQuery, ListSource};
pub use notification_service::{ApiNotificationService, NotificationService};
