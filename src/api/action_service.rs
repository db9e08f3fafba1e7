use crate::api::client::{optional_params, AdminApiClient, QueryParams};
use crate::entity::{ApiError, NotificationDraft};
use async_trait::async_trait;
use log::info;
use reqwest::Method;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;

/// Mutating admin operations. Only success or failure matters; response
/// bodies are ignored.
#[async_trait]
pub trait AdminActionService: Send + Sync {
    async fn confirm_deposit(&self, deposit_id: i64, notes: Option<&str>) -> Result<(), ApiError>;
    async fn reject_deposit(&self, deposit_id: i64, notes: Option<&str>) -> Result<(), ApiError>;
    async fn approve_withdrawal(
        &self,
        withdrawal_id: i64,
        notes: Option<&str>,
        transaction_hash: Option<&str>,
    ) -> Result<(), ApiError>;
    async fn reject_withdrawal(&self, withdrawal_id: i64, notes: Option<&str>)
        -> Result<(), ApiError>;

    async fn activate_user(&self, user_id: i64) -> Result<(), ApiError>;
    async fn deactivate_user(&self, user_id: i64) -> Result<(), ApiError>;
    async fn ban_user(&self, user_id: i64, reason: &str, days: Option<u32>) -> Result<(), ApiError>;
    async fn unban_user(&self, user_id: i64) -> Result<(), ApiError>;
    async fn update_user_wallet(
        &self,
        user_id: i64,
        wallet_address: &str,
        reason: Option<&str>,
    ) -> Result<(), ApiError>;
    async fn update_user_balance(&self, user_id: i64, new_balance: Decimal) -> Result<(), ApiError>;

    async fn pin_message(&self, message_id: i64) -> Result<(), ApiError>;
    async fn unpin_message(&self, message_id: i64) -> Result<(), ApiError>;
    async fn delete_message(&self, message_id: i64) -> Result<(), ApiError>;
    async fn delete_all_messages(&self) -> Result<(), ApiError>;

    async fn update_ticket_status(&self, ticket_id: i64, status: &str) -> Result<(), ApiError>;

    async fn set_promo_code_active(&self, promo_code_id: i64, is_active: bool) -> Result<(), ApiError>;
    async fn delete_promo_code(&self, promo_code_id: i64) -> Result<(), ApiError>;

    async fn toggle_plan_status(&self, plan_id: i64) -> Result<(), ApiError>;
    async fn delete_plan(&self, plan_id: i64) -> Result<(), ApiError>;

    async fn broadcast_notification(&self, draft: &NotificationDraft) -> Result<(), ApiError>;
    async fn notify_user(&self, user_id: i64, draft: &NotificationDraft) -> Result<(), ApiError>;
}

fn draft_params(draft: &NotificationDraft) -> QueryParams {
    vec![
        ("title", draft.title.clone()),
        ("message", draft.message.clone()),
        ("type", draft.notification_type.clone()),
    ]
}

pub struct ApiActionService {
    client: Arc<AdminApiClient>,
}

impl ApiActionService {
    pub fn new(client: Arc<AdminApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AdminActionService for ApiActionService {
    async fn confirm_deposit(&self, deposit_id: i64, notes: Option<&str>) -> Result<(), ApiError> {
        info!("Confirming deposit {}", deposit_id);
        self.client
            .send(
                Method::PUT,
                &format!("/admin/deposits/{}/confirm", deposit_id),
                &optional_params(&[("notes", notes)]),
            )
            .await
    }

    async fn reject_deposit(&self, deposit_id: i64, notes: Option<&str>) -> Result<(), ApiError> {
        info!("Rejecting deposit {}", deposit_id);
        self.client
            .send(
                Method::PUT,
                &format!("/admin/deposits/{}/reject", deposit_id),
                &optional_params(&[("notes", notes)]),
            )
            .await
    }

    async fn approve_withdrawal(
        &self,
        withdrawal_id: i64,
        notes: Option<&str>,
        transaction_hash: Option<&str>,
    ) -> Result<(), ApiError> {
        info!("Approving withdrawal {}", withdrawal_id);
        self.client
            .send(
                Method::PUT,
                &format!("/admin/withdrawals/{}/approve", withdrawal_id),
                &optional_params(&[("notes", notes), ("transactionHash", transaction_hash)]),
            )
            .await
    }

    async fn reject_withdrawal(
        &self,
        withdrawal_id: i64,
        notes: Option<&str>,
    ) -> Result<(), ApiError> {
        info!("Rejecting withdrawal {}", withdrawal_id);
        self.client
            .send(
                Method::PUT,
                &format!("/admin/withdrawals/{}/reject", withdrawal_id),
                &optional_params(&[("notes", notes)]),
            )
            .await
    }

    async fn activate_user(&self, user_id: i64) -> Result<(), ApiError> {
        self.client
            .send(Method::PUT, &format!("/admin/users/{}/activate", user_id), &[])
            .await
    }

    async fn deactivate_user(&self, user_id: i64) -> Result<(), ApiError> {
        self.client
            .send(Method::PUT, &format!("/admin/users/{}/deactivate", user_id), &[])
            .await
    }

    async fn ban_user(&self, user_id: i64, reason: &str, days: Option<u32>) -> Result<(), ApiError> {
        info!("Banning user {} (days: {:?})", user_id, days);
        let days = days.map(|d| d.to_string());
        let mut params = vec![("reason", reason.to_string())];
        params.extend(optional_params(&[("days", days.as_deref())]));

        self.client
            .send(Method::POST, &format!("/admin/users/{}/ban", user_id), &params)
            .await
    }

    async fn unban_user(&self, user_id: i64) -> Result<(), ApiError> {
        self.client
            .send(Method::POST, &format!("/admin/users/{}/unban", user_id), &[])
            .await
    }

    async fn update_user_wallet(
        &self,
        user_id: i64,
        wallet_address: &str,
        reason: Option<&str>,
    ) -> Result<(), ApiError> {
        self.client
            .send_json(
                Method::PUT,
                &format!("/admin/users/{}/wallet-address", user_id),
                &json!({ "walletAddress": wallet_address, "reason": reason }),
            )
            .await
    }

    async fn update_user_balance(&self, user_id: i64, new_balance: Decimal) -> Result<(), ApiError> {
        let new_balance = new_balance
            .to_f64()
            .ok_or_else(|| ApiError::Unexpected(format!("Balance out of range: {}", new_balance)))?;

        self.client
            .send_json(
                Method::PUT,
                &format!("/admin/users/{}/balance", user_id),
                &json!({ "newBalance": new_balance }),
            )
            .await
    }

    async fn pin_message(&self, message_id: i64) -> Result<(), ApiError> {
        self.client
            .send(Method::POST, &format!("/community/messages/{}/pin", message_id), &[])
            .await
    }

    async fn unpin_message(&self, message_id: i64) -> Result<(), ApiError> {
        self.client
            .send(Method::DELETE, &format!("/community/messages/{}/pin", message_id), &[])
            .await
    }

    async fn delete_message(&self, message_id: i64) -> Result<(), ApiError> {
        info!("Deleting community message {}", message_id);
        self.client
            .send(Method::DELETE, &format!("/community/messages/{}", message_id), &[])
            .await
    }

    async fn delete_all_messages(&self) -> Result<(), ApiError> {
        info!("Deleting all community messages");
        self.client
            .send(Method::DELETE, "/community/messages", &[])
            .await
    }

    async fn update_ticket_status(&self, ticket_id: i64, status: &str) -> Result<(), ApiError> {
        info!("Moving support ticket {} to {}", ticket_id, status);
        self.client
            .send(
                Method::PUT,
                &format!("/support/admin/tickets/{}/status", ticket_id),
                &[("status", status.to_string())],
            )
            .await
    }

    async fn set_promo_code_active(&self, promo_code_id: i64, is_active: bool) -> Result<(), ApiError> {
        self.client
            .send_json(
                Method::PUT,
                &format!("/admin/promo-codes/{}/toggle-status", promo_code_id),
                &json!({ "isActive": is_active }),
            )
            .await
    }

    async fn delete_promo_code(&self, promo_code_id: i64) -> Result<(), ApiError> {
        info!("Deleting promo code {}", promo_code_id);
        self.client
            .send(Method::DELETE, &format!("/admin/promo-codes/{}", promo_code_id), &[])
            .await
    }

    async fn toggle_plan_status(&self, plan_id: i64) -> Result<(), ApiError> {
        self.client
            .send(Method::PUT, &format!("/admin/plans/{}/toggle-status", plan_id), &[])
            .await
    }

    async fn delete_plan(&self, plan_id: i64) -> Result<(), ApiError> {
        info!("Deleting plan {}", plan_id);
        self.client
            .send(Method::DELETE, &format!("/admin/plans/{}", plan_id), &[])
            .await
    }

    async fn broadcast_notification(&self, draft: &NotificationDraft) -> Result<(), ApiError> {
        info!("Broadcasting {} notification: {}", draft.notification_type, draft.title);
        self.client
            .send(Method::POST, "/admin/notifications/broadcast", &draft_params(draft))
            .await
    }

    async fn notify_user(&self, user_id: i64, draft: &NotificationDraft) -> Result<(), ApiError> {
        info!("Sending {} notification to user {}", draft.notification_type, user_id);
        self.client
            .send(
                Method::POST,
                &format!("/admin/notifications/user/{}", user_id),
                &draft_params(draft),
            )
            .await
    }
}
