use crate::api::client::AdminApiClient;
use crate::api::models::{NotificationPayload, UnreadCountPayload};
use crate::entity::{ApiError, Notification};
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;

/// Admin notification endpoints behind the header badge.
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn unread_count(&self) -> Result<u64, ApiError>;
    async fn latest(&self, page: u32, size: u32) -> Result<Vec<Notification>, ApiError>;
    async fn mark_as_read(&self, notification_id: i64) -> Result<(), ApiError>;
    async fn mark_all_as_read(&self) -> Result<(), ApiError>;
}

pub struct ApiNotificationService {
    client: Arc<AdminApiClient>,
}

impl ApiNotificationService {
    pub fn new(client: Arc<AdminApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationService for ApiNotificationService {
    async fn unread_count(&self) -> Result<u64, ApiError> {
        let payload: UnreadCountPayload = self
            .client
            .get_json("/admin/notifications/unread-count", &[])
            .await?;
        Ok(payload.count())
    }

    async fn latest(&self, page: u32, size: u32) -> Result<Vec<Notification>, ApiError> {
        let payload: NotificationPayload = self
            .client
            .get_json(
                "/admin/notifications",
                &[("page", page.to_string()), ("size", size.to_string())],
            )
            .await?;
        Ok(payload.into_notifications())
    }

    async fn mark_as_read(&self, notification_id: i64) -> Result<(), ApiError> {
        self.client
            .send(
                Method::PUT,
                &format!("/admin/notifications/{}/read", notification_id),
                &[],
            )
            .await
    }

    async fn mark_all_as_read(&self) -> Result<(), ApiError> {
        self.client
            .send(Method::PUT, "/admin/notifications/read-all", &[])
            .await
    }
}
