use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: String,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: String,
    #[serde(default)]
    pub read_at: Option<String>,
}

/// What the header badge and dropdown show.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationSummary {
    pub unread_count: u64,
    pub notifications: Vec<Notification>,
}

impl NotificationSummary {
    pub fn unread_in_list(&self) -> u64 {
        self.notifications.iter().filter(|n| !n.is_read).count() as u64
    }
}

pub const DEFAULT_NOTIFICATION_TYPE: &str = "ADMIN_MESSAGE";

/// Types an admin may send.
pub const NOTIFICATION_TYPES: &[&str] = &[
    "ADMIN_MESSAGE",
    "SYSTEM_MESSAGE",
    "DEPOSIT_APPROVED",
    "DEPOSIT_REJECTED",
    "WITHDRAWAL_APPROVED",
    "WITHDRAWAL_REJECTED",
    "PLAN_PURCHASED",
    "REFERRAL_BONUS",
    "DAILY_EARNINGS",
];

/// A notification composed by an admin, to everyone or to one user.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationDraft {
    pub title: String,
    pub message: String,
    pub notification_type: String,
}

impl NotificationDraft {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            notification_type: DEFAULT_NOTIFICATION_TYPE.to_string(),
        }
    }

    pub fn with_type(mut self, notification_type: impl Into<String>) -> Self {
        self.notification_type = notification_type.into();
        self
    }
}
