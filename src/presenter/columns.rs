use crate::entity::{field, value_text, ColumnDescriptor, ResourceKind, Row};
use crate::table::{RowAction, TableRenderer};
use crate::utils::{format_currency, format_date, shorten_address, status_label, truncate_hash};
use serde_json::Value;

pub const CONFIRM: RowAction = RowAction::new("confirm", "Confirm");
pub const REJECT: RowAction = RowAction::new("reject", "Reject");
pub const APPROVE: RowAction = RowAction::new("approve", "Approve");
pub const ACTIVATE: RowAction = RowAction::new("activate", "Activate");
pub const DEACTIVATE: RowAction = RowAction::new("deactivate", "Deactivate");
pub const BAN: RowAction = RowAction::new("ban", "Ban");
pub const UNBAN: RowAction = RowAction::new("unban", "Unban");
pub const PIN: RowAction = RowAction::new("pin", "Pin");
pub const UNPIN: RowAction = RowAction::new("unpin", "Unpin");
pub const DELETE: RowAction = RowAction::new("delete", "Delete");
pub const START_PROGRESS: RowAction = RowAction::new("start", "Start Progress");
pub const CLOSE: RowAction = RowAction::new("close", "Close Ticket");

const MESSAGE_PREVIEW_LEN: usize = 100;

fn flag(row: &Row, key: &str) -> bool {
    field(row, key).as_bool().unwrap_or(false)
}

fn is_pending(row: &Row) -> bool {
    field(row, "status").as_str() == Some("PENDING")
}

fn currency(value: &Value, _row: &Row) -> String {
    format_currency(value)
}

fn date(value: &Value, _row: &Row) -> String {
    value.as_str().map(format_date).unwrap_or_default()
}

fn status(value: &Value, _row: &Row) -> String {
    status_label(&value_text(value))
}

pub fn deposit_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("id", "ID").sortable(),
        ColumnDescriptor::new("username", "Username"),
        ColumnDescriptor::new("amount", "Amount").sortable().render(currency),
        ColumnDescriptor::new("transactionHash", "Transaction Hash")
            .render(|value, _| truncate_hash(&value_text(value), 20)),
        ColumnDescriptor::new("status", "Status").render(status),
        ColumnDescriptor::new("createdAt", "Created").sortable().render(date),
    ]
}

pub fn withdrawal_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("id", "ID").sortable(),
        ColumnDescriptor::new("username", "Username"),
        ColumnDescriptor::new("requestedAmount", "Requested")
            .sortable()
            .render(currency),
        ColumnDescriptor::new("finalAmount", "Final Amount").render(currency),
        ColumnDescriptor::new("feeAmount", "Fee").render(currency),
        ColumnDescriptor::new("walletAddress", "Wallet")
            .render(|value, _| shorten_address(&value_text(value))),
        ColumnDescriptor::new("status", "Status").render(status),
        ColumnDescriptor::new("createdAt", "Created").sortable().render(date),
    ]
}

pub fn user_status(row: &Row) -> &'static str {
    if flag(row, "isBanned") {
        "Banned"
    } else if !flag(row, "isActive") {
        "Inactive"
    } else if !flag(row, "isAccountActivated") {
        "Pending"
    } else {
        "Active"
    }
}

pub fn user_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("username", "User")
            .sortable()
            .render(|value, row| {
                let full_name = value_text(field(row, "fullName"));
                if full_name.is_empty() {
                    value_text(value)
                } else {
                    format!("{} ({})", value_text(value), full_name)
                }
            }),
        ColumnDescriptor::new("email", "Contact"),
        ColumnDescriptor::new("balance", "Balance").sortable().render(currency),
        ColumnDescriptor::new("totalEarnings", "Total Earnings").render(currency),
        ColumnDescriptor::new("currentPlanName", "Plan").render(|value, _| {
            let plan = value_text(value);
            if plan.is_empty() {
                "No Plan".to_string()
            } else {
                plan
            }
        }),
        ColumnDescriptor::new("directReferralsCount", "Referrals"),
        ColumnDescriptor::new("isActive", "Status").render(|_, row| user_status(row).to_string()),
        ColumnDescriptor::new("banReason", "Ban Info").render(|value, row| {
            if !flag(row, "isBanned") {
                return "-".to_string();
            }
            match field(row, "banExpiry").as_str() {
                Some(expiry) => format!("{} (expires {})", value_text(value), format_date(expiry)),
                None => value_text(value),
            }
        }),
        ColumnDescriptor::new("createdAt", "Joined").sortable().render(date),
    ]
}

pub fn message_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("username", "User").render(|value, row| {
            if flag(row, "isAdminMessage") {
                format!("{} [Admin]", value_text(value))
            } else {
                value_text(value)
            }
        }),
        ColumnDescriptor::new("content", "Message").render(|value, row| {
            let preview = truncate_hash(&value_text(value), MESSAGE_PREVIEW_LEN);
            if flag(row, "isPinned") {
                format!("[Pinned] {}", preview)
            } else {
                preview
            }
        }),
        ColumnDescriptor::new("reactions", "Reactions").render(|_, row| {
            format!(
                "+{} / -{}",
                value_text(field(row, "likesCount")),
                value_text(field(row, "dislikesCount"))
            )
        }),
        ColumnDescriptor::new("createdAt", "Date").sortable().render(date),
    ]
}

pub fn notification_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("title", "Title"),
        ColumnDescriptor::new("message", "Message"),
        ColumnDescriptor::new("type", "Type").render(status),
        ColumnDescriptor::new("isRead", "Read")
            .render(|value, _| if value.as_bool() == Some(true) { "yes" } else { "no" }.to_string()),
        ColumnDescriptor::new("createdAt", "Received").sortable().render(date),
    ]
}

pub fn ticket_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("id", "ID").sortable(),
        ColumnDescriptor::new("subject", "Subject"),
        ColumnDescriptor::new("username", "User"),
        ColumnDescriptor::new("status", "Status").render(status),
        ColumnDescriptor::new("messages", "Replies").render(|value, _| {
            value.as_array().map(Vec::len).unwrap_or(0).to_string()
        }),
        ColumnDescriptor::new("createdAt", "Opened").sortable().render(date),
        ColumnDescriptor::new("closedAt", "Closed").render(date),
    ]
}

pub fn promo_code_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("code", "Code").sortable(),
        ColumnDescriptor::new("type", "Type").render(status),
        ColumnDescriptor::new("bonusAmount", "Bonus").render(|value, _| {
            if value.is_null() {
                "-".to_string()
            } else {
                format_currency(value)
            }
        }),
        ColumnDescriptor::new("usedCount", "Usage").sortable().render(|value, row| {
            format!("{} / {}", value_text(value), value_text(field(row, "usageLimit")))
        }),
        ColumnDescriptor::new("isActive", "Status")
            .render(|value, _| if value.as_bool() == Some(true) { "Active" } else { "Inactive" }.to_string()),
        ColumnDescriptor::new("expiresAt", "Expires").render(date),
    ]
}

pub fn plan_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("name", "Plan").sortable(),
        ColumnDescriptor::new("price", "Price").sortable().render(currency),
        ColumnDescriptor::new("minDailyEarning", "Daily Earning").render(|value, row| {
            format!(
                "{} - {}",
                format_currency(value),
                format_currency(field(row, "maxDailyEarning"))
            )
        }),
        ColumnDescriptor::new("isActive", "Status").render(|value, _| {
            let label = if value.as_bool() == Some(false) {
                "Inactive"
            } else {
                "Active"
            };
            label.to_string()
        }),
    ]
}

fn deposit_actions(row: &Row) -> Vec<RowAction> {
    if is_pending(row) {
        vec![CONFIRM, REJECT]
    } else {
        Vec::new()
    }
}

fn withdrawal_actions(row: &Row) -> Vec<RowAction> {
    if is_pending(row) {
        vec![APPROVE, REJECT]
    } else {
        Vec::new()
    }
}

fn user_actions(row: &Row) -> Vec<RowAction> {
    let toggle = if flag(row, "isActive") { DEACTIVATE } else { ACTIVATE };
    let ban = if flag(row, "isBanned") { UNBAN } else { BAN };
    vec![toggle, ban]
}

fn message_actions(row: &Row) -> Vec<RowAction> {
    let pin = if flag(row, "isPinned") { UNPIN } else { PIN };
    vec![pin, DELETE]
}

fn ticket_actions(row: &Row) -> Vec<RowAction> {
    match field(row, "status").as_str() {
        Some("OPEN") => vec![START_PROGRESS],
        Some("IN_PROGRESS") => vec![CLOSE],
        _ => Vec::new(),
    }
}

// Plans without the flag count as active.
fn plan_actions(row: &Row) -> Vec<RowAction> {
    let toggle = if field(row, "isActive").as_bool() == Some(false) {
        ACTIVATE
    } else {
        DEACTIVATE
    };
    vec![toggle, DELETE]
}

fn promo_code_actions(row: &Row) -> Vec<RowAction> {
    let toggle = if flag(row, "isActive") { DEACTIVATE } else { ACTIVATE };
    vec![toggle, DELETE]
}

/// Column set, search fields and row actions of each resource table.
pub fn renderer_for(resource: ResourceKind) -> TableRenderer {
    match resource {
        ResourceKind::Deposits => TableRenderer::new(deposit_columns())
            .searchable(["username", "transactionHash"])
            .with_actions(deposit_actions),
        ResourceKind::Withdrawals => TableRenderer::new(withdrawal_columns())
            .searchable(["username", "walletAddress"])
            .with_actions(withdrawal_actions),
        ResourceKind::Users => TableRenderer::new(user_columns())
            .searchable(["username", "fullName", "email"])
            .with_actions(user_actions),
        ResourceKind::CommunityMessages => TableRenderer::new(message_columns())
            .searchable(["username", "content"])
            .with_actions(message_actions),
        ResourceKind::Notifications => {
            TableRenderer::new(notification_columns()).searchable(["title", "message"])
        }
        ResourceKind::SupportTickets => TableRenderer::new(ticket_columns())
            .searchable(["subject", "username", "userName"])
            .with_actions(ticket_actions),
        ResourceKind::PromoCodes => TableRenderer::new(promo_code_columns())
            .searchable(["code"])
            .with_actions(promo_code_actions),
        ResourceKind::Plans => TableRenderer::new(plan_columns())
            .searchable(["name"])
            .with_actions(plan_actions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableOutput;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn pending_deposit_offers_confirm_and_reject() {
        let rows = vec![
            row(json!({"id": 1, "username": "alice", "amount": "50", "transactionHash": "0xabc", "status": "PENDING", "createdAt": "2024-01-05T10:30:00"})),
            row(json!({"id": 2, "username": "bob", "amount": 200, "transactionHash": "0xdef", "status": "CONFIRMED", "createdAt": "2024-01-06T08:00:00"})),
        ];

        match renderer_for(ResourceKind::Deposits).render(&rows, None, "", false) {
            TableOutput::Rows(rendered) => {
                assert_eq!(rendered[0].actions, vec![CONFIRM, REJECT]);
                assert!(rendered[1].actions.is_empty());
                assert_eq!(rendered[0].cells[2], "$50.00");
                assert_eq!(rendered[0].cells[4], "Pending");
                assert_eq!(rendered[0].cells[5], "Jan 5, 2024, 10:30");
            }
            other => panic!("unexpected output: {:?}", other),
        }
    }

    #[test]
    fn user_search_covers_name_and_email() {
        let rows = vec![
            row(json!({"id": 1, "username": "alice", "fullName": "Alice Smith", "email": "a@example.com", "isActive": true})),
            row(json!({"id": 2, "username": "bob", "fullName": "Bob Jones", "email": "bob@example.com", "isActive": false})),
        ];
        let renderer = renderer_for(ResourceKind::Users);

        assert_eq!(renderer.order_rows(&rows, None, "SMITH").len(), 1);
        assert_eq!(renderer.order_rows(&rows, None, "example.com").len(), 2);
    }

    #[test]
    fn user_status_precedence() {
        assert_eq!(user_status(&row(json!({"isBanned": true, "isActive": true}))), "Banned");
        assert_eq!(user_status(&row(json!({"isActive": false}))), "Inactive");
        assert_eq!(
            user_status(&row(json!({"isActive": true, "isAccountActivated": true}))),
            "Active"
        );
    }

    #[test]
    fn ticket_actions_follow_workflow() {
        let rows = vec![
            row(json!({"id": 1, "subject": "Login", "username": "alice", "status": "OPEN", "messages": [{"id": 1}]})),
            row(json!({"id": 2, "subject": "Payout", "username": "bob", "status": "IN_PROGRESS"})),
            row(json!({"id": 3, "subject": "Bonus", "username": "carol", "status": "CLOSED"})),
        ];

        match renderer_for(ResourceKind::SupportTickets).render(&rows, None, "", false) {
            TableOutput::Rows(rendered) => {
                assert_eq!(rendered[0].actions, vec![START_PROGRESS]);
                assert_eq!(rendered[1].actions, vec![CLOSE]);
                assert!(rendered[2].actions.is_empty());
                assert_eq!(rendered[0].cells[3], "Open");
                assert_eq!(rendered[0].cells[4], "1");
            }
            other => panic!("unexpected output: {:?}", other),
        }
    }

    #[test]
    fn plan_and_promo_toggles() {
        let plan = row(json!({"id": 1, "name": "Gold", "price": "500", "minDailyEarning": "5", "maxDailyEarning": "8"}));
        let promo = row(json!({"id": 2, "code": "WELCOME", "type": "BONUS_MONEY", "usedCount": 3, "usageLimit": 10, "isActive": false}));

        assert_eq!(plan_actions(&plan), vec![DEACTIVATE, DELETE]);
        assert_eq!(promo_code_actions(&promo), vec![ACTIVATE, DELETE]);

        match renderer_for(ResourceKind::PromoCodes).render(&[promo], None, "", false) {
            TableOutput::Rows(rendered) => {
                assert_eq!(rendered[0].cells[2], "-");
                assert_eq!(rendered[0].cells[3], "3 / 10");
                assert_eq!(rendered[0].cells[4], "Inactive");
            }
            other => panic!("unexpected output: {:?}", other),
        }
    }
}
