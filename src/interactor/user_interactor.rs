use crate::api::action_service::AdminActionService;
use crate::entity::ApiError;
use crate::interactor::resource_list::{FetchOutcome, ResourceList};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

#[async_trait]
pub trait UserInteractor: Send + Sync {
    fn users(&self) -> Arc<ResourceList>;
    async fn activate(&self, user_id: i64) -> Result<FetchOutcome, ApiError>;
    async fn deactivate(&self, user_id: i64) -> Result<FetchOutcome, ApiError>;
    async fn ban(&self, user_id: i64, reason: &str, days: Option<u32>) -> Result<FetchOutcome, ApiError>;
    async fn unban(&self, user_id: i64) -> Result<FetchOutcome, ApiError>;
    async fn update_wallet(
        &self,
        user_id: i64,
        wallet_address: &str,
        reason: Option<&str>,
    ) -> Result<FetchOutcome, ApiError>;
    async fn update_balance(&self, user_id: i64, new_balance: Decimal) -> Result<FetchOutcome, ApiError>;
}

pub struct UserInteractorImpl {
    users: Arc<ResourceList>,
    actions: Arc<dyn AdminActionService + Send + Sync>,
}

impl UserInteractorImpl {
    pub fn new(users: Arc<ResourceList>, actions: Arc<dyn AdminActionService + Send + Sync>) -> Self {
        Self { users, actions }
    }
}

#[async_trait]
impl UserInteractor for UserInteractorImpl {
    fn users(&self) -> Arc<ResourceList> {
        self.users.clone()
    }

    async fn activate(&self, user_id: i64) -> Result<FetchOutcome, ApiError> {
        self.users.run_action(self.actions.activate_user(user_id)).await
    }

    async fn deactivate(&self, user_id: i64) -> Result<FetchOutcome, ApiError> {
        self.users.run_action(self.actions.deactivate_user(user_id)).await
    }

    async fn ban(&self, user_id: i64, reason: &str, days: Option<u32>) -> Result<FetchOutcome, ApiError> {
        self.users
            .run_action(self.actions.ban_user(user_id, reason, days))
            .await
    }

    async fn unban(&self, user_id: i64) -> Result<FetchOutcome, ApiError> {
        self.users.run_action(self.actions.unban_user(user_id)).await
    }

    async fn update_wallet(
        &self,
        user_id: i64,
        wallet_address: &str,
        reason: Option<&str>,
    ) -> Result<FetchOutcome, ApiError> {
        self.users
            .run_action(self.actions.update_user_wallet(user_id, wallet_address, reason))
            .await
    }

    async fn update_balance(&self, user_id: i64, new_balance: Decimal) -> Result<FetchOutcome, ApiError> {
        self.users
            .run_action(self.actions.update_user_balance(user_id, new_balance))
            .await
    }
}
