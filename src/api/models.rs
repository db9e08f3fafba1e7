use crate::entity::{AdminUser, Notification, Page};
use serde::{Deserialize, Serialize};

pub const BANNED_ERROR_CODE: &str = "USER_BANNED";

// Error body shapes returned by the admin API
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub ban_reason: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub username_or_phone: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AdminUser,
}

/// The unread endpoint answers either a bare number or `{ "count": n }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum UnreadCountPayload {
    Bare(u64),
    Wrapped { count: u64 },
}

impl UnreadCountPayload {
    pub fn count(&self) -> u64 {
        match self {
            UnreadCountPayload::Bare(count) => *count,
            UnreadCountPayload::Wrapped { count } => *count,
        }
    }
}

/// Notification lists come paginated or as a plain array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NotificationPayload {
    Paged(Page<Notification>),
    List(Vec<Notification>),
}

impl NotificationPayload {
    pub fn into_notifications(self) -> Vec<Notification> {
        match self {
            NotificationPayload::Paged(page) => page.content,
            NotificationPayload::List(list) => list,
        }
    }
}
