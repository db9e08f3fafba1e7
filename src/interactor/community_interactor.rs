use crate::api::action_service::AdminActionService;
use crate::entity::ApiError;
use crate::interactor::resource_list::{FetchOutcome, ResourceList};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait CommunityInteractor: Send + Sync {
    fn messages(&self) -> Arc<ResourceList>;
    async fn pin(&self, message_id: i64) -> Result<FetchOutcome, ApiError>;
    async fn unpin(&self, message_id: i64) -> Result<FetchOutcome, ApiError>;
    async fn delete(&self, message_id: i64) -> Result<FetchOutcome, ApiError>;
    /// Wipe the whole feed.
    async fn delete_all(&self) -> Result<FetchOutcome, ApiError>;
}

pub struct CommunityInteractorImpl {
    messages: Arc<ResourceList>,
    actions: Arc<dyn AdminActionService + Send + Sync>,
}

impl CommunityInteractorImpl {
    pub fn new(messages: Arc<ResourceList>, actions: Arc<dyn AdminActionService + Send + Sync>) -> Self {
        Self { messages, actions }
    }
}

#[async_trait]
impl CommunityInteractor for CommunityInteractorImpl {
    fn messages(&self) -> Arc<ResourceList> {
        self.messages.clone()
    }

    async fn pin(&self, message_id: i64) -> Result<FetchOutcome, ApiError> {
        self.messages.run_action(self.actions.pin_message(message_id)).await
    }

    async fn unpin(&self, message_id: i64) -> Result<FetchOutcome, ApiError> {
        self.messages.run_action(self.actions.unpin_message(message_id)).await
    }

    async fn delete(&self, message_id: i64) -> Result<FetchOutcome, ApiError> {
        self.messages.run_action(self.actions.delete_message(message_id)).await
    }

    async fn delete_all(&self) -> Result<FetchOutcome, ApiError> {
        self.messages.run_action(self.actions.delete_all_messages()).await
    }
}
