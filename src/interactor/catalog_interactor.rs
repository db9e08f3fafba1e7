use crate::api::action_service::AdminActionService;
use crate::entity::ApiError;
use crate::interactor::resource_list::{FetchOutcome, ResourceList};
use async_trait::async_trait;
use std::sync::Arc;

/// What users can buy or redeem: investment plans and promo codes.
#[async_trait]
pub trait CatalogInteractor: Send + Sync {
    fn plans(&self) -> Arc<ResourceList>;
    fn promo_codes(&self) -> Arc<ResourceList>;

    async fn toggle_plan(&self, plan_id: i64) -> Result<FetchOutcome, ApiError>;
    async fn delete_plan(&self, plan_id: i64) -> Result<FetchOutcome, ApiError>;
    async fn set_promo_code_active(
        &self,
        promo_code_id: i64,
        is_active: bool,
    ) -> Result<FetchOutcome, ApiError>;
    async fn delete_promo_code(&self, promo_code_id: i64) -> Result<FetchOutcome, ApiError>;
}

pub struct CatalogInteractorImpl {
    plans: Arc<ResourceList>,
    promo_codes: Arc<ResourceList>,
    actions: Arc<dyn AdminActionService + Send + Sync>,
}

impl CatalogInteractorImpl {
    pub fn new(
        plans: Arc<ResourceList>,
        promo_codes: Arc<ResourceList>,
        actions: Arc<dyn AdminActionService + Send + Sync>,
    ) -> Self {
        Self {
            plans,
            promo_codes,
            actions,
        }
    }
}

#[async_trait]
impl CatalogInteractor for CatalogInteractorImpl {
    fn plans(&self) -> Arc<ResourceList> {
        self.plans.clone()
    }

    fn promo_codes(&self) -> Arc<ResourceList> {
        self.promo_codes.clone()
    }

    async fn toggle_plan(&self, plan_id: i64) -> Result<FetchOutcome, ApiError> {
        self.plans.run_action(self.actions.toggle_plan_status(plan_id)).await
    }

    async fn delete_plan(&self, plan_id: i64) -> Result<FetchOutcome, ApiError> {
        self.plans.run_action(self.actions.delete_plan(plan_id)).await
    }

    async fn set_promo_code_active(
        &self,
        promo_code_id: i64,
        is_active: bool,
    ) -> Result<FetchOutcome, ApiError> {
        self.promo_codes
            .run_action(self.actions.set_promo_code_active(promo_code_id, is_active))
            .await
    }

    async fn delete_promo_code(&self, promo_code_id: i64) -> Result<FetchOutcome, ApiError> {
        self.promo_codes
            .run_action(self.actions.delete_promo_code(promo_code_id))
            .await
    }
}
