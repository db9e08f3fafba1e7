use crate::api::action_service::AdminActionService;
use crate::entity::{AdminError, NotificationDraft, NOTIFICATION_TYPES};
use async_trait::async_trait;
use std::sync::Arc;

/// Checks a draft before it is sent: title and message are required and the
/// type must be one an admin may send.
pub fn validate_draft(draft: &NotificationDraft) -> Result<(), AdminError> {
    if draft.title.trim().is_empty() {
        return Err(AdminError::InvalidNotification("title is required".to_string()));
    }
    if draft.message.trim().is_empty() {
        return Err(AdminError::InvalidNotification("message is required".to_string()));
    }
    if !NOTIFICATION_TYPES.contains(&draft.notification_type.as_str()) {
        return Err(AdminError::InvalidNotification(format!(
            "unknown type {}",
            draft.notification_type
        )));
    }
    Ok(())
}

#[async_trait]
pub trait AnnouncementInteractor: Send + Sync {
    async fn broadcast(&self, draft: &NotificationDraft) -> Result<(), AdminError>;
    async fn notify_user(&self, user_id: i64, draft: &NotificationDraft) -> Result<(), AdminError>;
}

pub struct AnnouncementInteractorImpl {
    actions: Arc<dyn AdminActionService + Send + Sync>,
}

impl AnnouncementInteractorImpl {
    pub fn new(actions: Arc<dyn AdminActionService + Send + Sync>) -> Self {
        Self { actions }
    }
}

#[async_trait]
impl AnnouncementInteractor for AnnouncementInteractorImpl {
    async fn broadcast(&self, draft: &NotificationDraft) -> Result<(), AdminError> {
        validate_draft(draft)?;
        Ok(self.actions.broadcast_notification(draft).await?)
    }

    async fn notify_user(&self, user_id: i64, draft: &NotificationDraft) -> Result<(), AdminError> {
        validate_draft(draft)?;
        Ok(self.actions.notify_user(user_id, draft).await?)
    }
}
