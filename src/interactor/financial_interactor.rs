use crate::api::action_service::AdminActionService;
use crate::entity::{ApiError, ResourceKind};
use crate::interactor::resource_list::{FetchOutcome, ResourceList};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex, PoisonError};

pub const CONFIRM_NOTES: &str = "Confirmed by admin";
pub const REJECT_NOTES: &str = "Rejected by admin";
pub const APPROVE_NOTES: &str = "Approved by admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinanceTab {
    Deposits,
    Withdrawals,
}

impl FinanceTab {
    pub fn resource(self) -> ResourceKind {
        match self {
            FinanceTab::Deposits => ResourceKind::Deposits,
            FinanceTab::Withdrawals => ResourceKind::Withdrawals,
        }
    }
}

/// Placeholder reference used when an approval is not given a real hash.
pub fn generated_transaction_hash() -> String {
    format!("TX_{}", Utc::now().timestamp_millis())
}

#[async_trait]
pub trait FinancialInteractor: Send + Sync {
    fn deposits(&self) -> Arc<ResourceList>;
    fn withdrawals(&self) -> Arc<ResourceList>;
    fn active_tab(&self) -> FinanceTab;
    fn active_list(&self) -> Arc<ResourceList>;
    async fn switch_tab(&self, tab: FinanceTab) -> FetchOutcome;

    async fn confirm_deposit(&self, id: i64, notes: Option<&str>) -> Result<FetchOutcome, ApiError>;
    async fn reject_deposit(&self, id: i64, notes: Option<&str>) -> Result<FetchOutcome, ApiError>;
    async fn approve_withdrawal(
        &self,
        id: i64,
        notes: Option<&str>,
        transaction_hash: Option<&str>,
    ) -> Result<FetchOutcome, ApiError>;
    async fn reject_withdrawal(&self, id: i64, notes: Option<&str>) -> Result<FetchOutcome, ApiError>;
}

pub struct FinancialInteractorImpl {
    deposits: Arc<ResourceList>,
    withdrawals: Arc<ResourceList>,
    actions: Arc<dyn AdminActionService + Send + Sync>,
    tab: Mutex<FinanceTab>,
}

impl FinancialInteractorImpl {
    pub fn new(
        deposits: Arc<ResourceList>,
        withdrawals: Arc<ResourceList>,
        actions: Arc<dyn AdminActionService + Send + Sync>,
    ) -> Self {
        Self {
            deposits,
            withdrawals,
            actions,
            tab: Mutex::new(FinanceTab::Deposits),
        }
    }
}

#[async_trait]
impl FinancialInteractor for FinancialInteractorImpl {
    fn deposits(&self) -> Arc<ResourceList> {
        self.deposits.clone()
    }

    fn withdrawals(&self) -> Arc<ResourceList> {
        self.withdrawals.clone()
    }

    fn active_tab(&self) -> FinanceTab {
        *self.tab.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn active_list(&self) -> Arc<ResourceList> {
        match self.active_tab() {
            FinanceTab::Deposits => self.deposits(),
            FinanceTab::Withdrawals => self.withdrawals(),
        }
    }

    async fn switch_tab(&self, tab: FinanceTab) -> FetchOutcome {
        *self.tab.lock().unwrap_or_else(PoisonError::into_inner) = tab;
        self.active_list().load().await
    }

    async fn confirm_deposit(&self, id: i64, notes: Option<&str>) -> Result<FetchOutcome, ApiError> {
        let notes = notes.unwrap_or(CONFIRM_NOTES);
        self.deposits
            .run_action(self.actions.confirm_deposit(id, Some(notes)))
            .await
    }

    async fn reject_deposit(&self, id: i64, notes: Option<&str>) -> Result<FetchOutcome, ApiError> {
        let notes = notes.unwrap_or(REJECT_NOTES);
        self.deposits
            .run_action(self.actions.reject_deposit(id, Some(notes)))
            .await
    }

    async fn approve_withdrawal(
        &self,
        id: i64,
        notes: Option<&str>,
        transaction_hash: Option<&str>,
    ) -> Result<FetchOutcome, ApiError> {
        let notes = notes.unwrap_or(APPROVE_NOTES);
        let transaction_hash = transaction_hash
            .map(str::to_string)
            .unwrap_or_else(generated_transaction_hash);
        self.withdrawals
            .run_action(
                self.actions
                    .approve_withdrawal(id, Some(notes), Some(transaction_hash.as_str())),
            )
            .await
    }

    async fn reject_withdrawal(&self, id: i64, notes: Option<&str>) -> Result<FetchOutcome, ApiError> {
        let notes = notes.unwrap_or(REJECT_NOTES);
        self.withdrawals
            .run_action(self.actions.reject_withdrawal(id, Some(notes)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_hash_has_prefix() {
        let hash = generated_transaction_hash();
        assert!(hash.starts_with("TX_"));
        assert!(hash[3..].parse::<i64>().is_ok());
    }

    #[test]
    fn tabs_map_to_resources() {
        assert_eq!(FinanceTab::Deposits.resource(), ResourceKind::Deposits);
        assert_eq!(FinanceTab::Withdrawals.resource(), ResourceKind::Withdrawals);
    }
}
