use crate::api::action_service::AdminActionService;
use crate::entity::{ApiError, TicketStatus};
use crate::interactor::resource_list::{FetchOutcome, ResourceList};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait SupportInteractor: Send + Sync {
    fn tickets(&self) -> Arc<ResourceList>;
    async fn update_status(&self, ticket_id: i64, status: TicketStatus)
        -> Result<FetchOutcome, ApiError>;
}

pub struct SupportInteractorImpl {
    tickets: Arc<ResourceList>,
    actions: Arc<dyn AdminActionService + Send + Sync>,
}

impl SupportInteractorImpl {
    pub fn new(tickets: Arc<ResourceList>, actions: Arc<dyn AdminActionService + Send + Sync>) -> Self {
        Self { tickets, actions }
    }
}

#[async_trait]
impl SupportInteractor for SupportInteractorImpl {
    fn tickets(&self) -> Arc<ResourceList> {
        self.tickets.clone()
    }

    async fn update_status(
        &self,
        ticket_id: i64,
        status: TicketStatus,
    ) -> Result<FetchOutcome, ApiError> {
        self.tickets
            .run_action(self.actions.update_ticket_status(ticket_id, status.as_str()))
            .await
    }
}
