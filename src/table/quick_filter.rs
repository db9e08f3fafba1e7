use crate::entity::{FilterKey, FilterState, ResourceKind};
use lazy_static::lazy_static;

/// Named shortcut that replaces the whole filter state in one action.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickPreset {
    pub key: &'static str,
    pub label: &'static str,
    pub filter: FilterState,
}

impl QuickPreset {
    fn new(key: &'static str, label: &'static str, filter: FilterState) -> Self {
        Self { key, label, filter }
    }
}

lazy_static! {
    static ref DEPOSIT_PRESETS: Vec<QuickPreset> = vec![
        QuickPreset::new("all", "All Deposits", FilterState::new()),
        QuickPreset::new(
            "pending",
            "Pending",
            FilterState::new().with(FilterKey::Status, "PENDING"),
        ),
        QuickPreset::new(
            "confirmed",
            "Confirmed",
            FilterState::new().with(FilterKey::Status, "CONFIRMED"),
        ),
        QuickPreset::new(
            "rejected",
            "Rejected",
            FilterState::new().with(FilterKey::Status, "REJECTED"),
        ),
        QuickPreset::new(
            "high-value",
            "High Value (>$1000)",
            FilterState::new().with(FilterKey::MinAmount, "1000"),
        ),
    ];
    static ref WITHDRAWAL_PRESETS: Vec<QuickPreset> = vec![
        QuickPreset::new("all", "All Withdrawals", FilterState::new()),
        QuickPreset::new(
            "pending",
            "Pending",
            FilterState::new().with(FilterKey::Status, "PENDING"),
        ),
        QuickPreset::new(
            "completed",
            "Completed",
            FilterState::new().with(FilterKey::Status, "COMPLETED"),
        ),
        QuickPreset::new(
            "rejected",
            "Rejected",
            FilterState::new().with(FilterKey::Status, "REJECTED"),
        ),
        QuickPreset::new(
            "high-value",
            "High Value (>$500)",
            FilterState::new().with(FilterKey::MinAmount, "500"),
        ),
    ];
    static ref TICKET_PRESETS: Vec<QuickPreset> = vec![
        QuickPreset::new("all", "All Tickets", FilterState::new()),
        QuickPreset::new(
            "open",
            "Open",
            FilterState::new().with(FilterKey::Status, "OPEN"),
        ),
        QuickPreset::new(
            "in-progress",
            "In Progress",
            FilterState::new().with(FilterKey::Status, "IN_PROGRESS"),
        ),
        QuickPreset::new(
            "closed",
            "Closed",
            FilterState::new().with(FilterKey::Status, "CLOSED"),
        ),
    ];
}

pub fn presets_for(resource: ResourceKind) -> &'static [QuickPreset] {
    match resource {
        ResourceKind::Deposits => DEPOSIT_PRESETS.as_slice(),
        ResourceKind::Withdrawals => WITHDRAWAL_PRESETS.as_slice(),
        ResourceKind::SupportTickets => TICKET_PRESETS.as_slice(),
        _ => &[],
    }
}

pub fn find_preset(resource: ResourceKind, key: &str) -> Option<&'static QuickPreset> {
    presets_for(resource).iter().find(|preset| preset.key == key)
}

/// The preset whose filter is exactly `filter`; `None` means a custom filter.
pub fn matching_preset(resource: ResourceKind, filter: &FilterState) -> Option<&'static QuickPreset> {
    presets_for(resource)
        .iter()
        .find(|preset| &preset.filter == filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposits_and_withdrawals_have_distinct_tables() {
        let deposits: Vec<_> = presets_for(ResourceKind::Deposits)
            .iter()
            .map(|p| p.key)
            .collect();
        let withdrawals: Vec<_> = presets_for(ResourceKind::Withdrawals)
            .iter()
            .map(|p| p.key)
            .collect();

        assert_eq!(deposits, ["all", "pending", "confirmed", "rejected", "high-value"]);
        assert_eq!(withdrawals, ["all", "pending", "completed", "rejected", "high-value"]);
        assert!(presets_for(ResourceKind::Users).is_empty());
    }

    #[test]
    fn ticket_presets_follow_status_tabs() {
        let tickets: Vec<_> = presets_for(ResourceKind::SupportTickets)
            .iter()
            .map(|p| p.key)
            .collect();
        assert_eq!(tickets, ["all", "open", "in-progress", "closed"]);

        let preset = find_preset(ResourceKind::SupportTickets, "in-progress").unwrap();
        assert_eq!(preset.filter.get(FilterKey::Status), Some("IN_PROGRESS"));
    }

    #[test]
    fn high_value_threshold_differs_per_resource() {
        let deposit = find_preset(ResourceKind::Deposits, "high-value").unwrap();
        let withdrawal = find_preset(ResourceKind::Withdrawals, "high-value").unwrap();
        assert_eq!(deposit.filter.get(FilterKey::MinAmount), Some("1000"));
        assert_eq!(withdrawal.filter.get(FilterKey::MinAmount), Some("500"));
    }

    #[test]
    fn empty_filter_matches_all() {
        let preset = matching_preset(ResourceKind::Withdrawals, &FilterState::new()).unwrap();
        assert_eq!(preset.key, "all");
    }

    #[test]
    fn edited_filter_matches_nothing() {
        let filter = FilterState::new()
            .with(FilterKey::Status, "PENDING")
            .with(FilterKey::Username, "alice");
        assert!(matching_preset(ResourceKind::Deposits, &filter).is_none());
    }
}
