use crate::entity::FilterKey;
use anyhow::anyhow;
use std::fmt;
use std::str::FromStr;

const DEPOSIT_FILTERS: &[FilterKey] = &[
    FilterKey::Status,
    FilterKey::StartDate,
    FilterKey::EndDate,
    FilterKey::MinAmount,
    FilterKey::MaxAmount,
    FilterKey::TransactionHash,
    FilterKey::Username,
];

const WITHDRAWAL_FILTERS: &[FilterKey] = &[
    FilterKey::Status,
    FilterKey::StartDate,
    FilterKey::EndDate,
    FilterKey::MinAmount,
    FilterKey::MaxAmount,
    FilterKey::WalletAddress,
    FilterKey::Username,
];

const TICKET_FILTERS: &[FilterKey] = &[FilterKey::Status];

const DEPOSIT_STATUSES: &[&str] = &["PENDING", "CONFIRMED", "REJECTED"];
const WITHDRAWAL_STATUSES: &[&str] = &["PENDING", "APPROVED", "REJECTED", "COMPLETED"];
const TICKET_STATUSES: &[&str] = &["OPEN", "IN_PROGRESS", "CLOSED"];

/// Paginated list resources exposed by the admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Deposits,
    Withdrawals,
    Users,
    Notifications,
    CommunityMessages,
    SupportTickets,
    PromoCodes,
    Plans,
}

impl ResourceKind {
    pub fn list_path(self) -> &'static str {
        match self {
            ResourceKind::Deposits => "/admin/deposits/filtered",
            ResourceKind::Withdrawals => "/admin/withdrawals/filtered",
            ResourceKind::Users => "/admin/users",
            ResourceKind::Notifications => "/admin/notifications",
            ResourceKind::CommunityMessages => "/community/messages",
            ResourceKind::SupportTickets => "/support/admin/tickets",
            ResourceKind::PromoCodes => "/admin/promo-codes",
            ResourceKind::Plans => "/admin/plans",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Deposits => "deposits",
            ResourceKind::Withdrawals => "withdrawals",
            ResourceKind::Users => "users",
            ResourceKind::Notifications => "notifications",
            ResourceKind::CommunityMessages => "messages",
            ResourceKind::SupportTickets => "tickets",
            ResourceKind::PromoCodes => "promo-codes",
            ResourceKind::Plans => "plans",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ResourceKind::Deposits => "Deposits",
            ResourceKind::Withdrawals => "Withdrawals",
            ResourceKind::Users => "Users",
            ResourceKind::Notifications => "Notifications",
            ResourceKind::CommunityMessages => "Community Messages",
            ResourceKind::SupportTickets => "Support Tickets",
            ResourceKind::PromoCodes => "Promo Codes",
            ResourceKind::Plans => "Investment Plans",
        }
    }

    /// Page size used when the caller does not configure one.
    pub fn default_page_size(self) -> u32 {
        match self {
            ResourceKind::CommunityMessages => 50,
            _ => 20,
        }
    }

    /// Whether the endpoint pages on the server. The others answer the whole
    /// collection as a plain array, which is filtered and paged locally.
    pub fn is_server_paged(self) -> bool {
        !matches!(
            self,
            ResourceKind::SupportTickets | ResourceKind::PromoCodes | ResourceKind::Plans
        )
    }

    /// Server-side sort sent with every request, when the endpoint expects one.
    pub fn fixed_sort(self) -> Option<&'static str> {
        match self {
            ResourceKind::Users => Some("createdAt,desc"),
            _ => None,
        }
    }

    /// Filter keys this resource's endpoint accepts.
    pub fn filter_keys(self) -> &'static [FilterKey] {
        match self {
            ResourceKind::Deposits => DEPOSIT_FILTERS,
            ResourceKind::Withdrawals => WITHDRAWAL_FILTERS,
            ResourceKind::SupportTickets => TICKET_FILTERS,
            _ => &[],
        }
    }

    /// Allowed values of the `status` filter.
    pub fn status_vocabulary(self) -> &'static [&'static str] {
        match self {
            ResourceKind::Deposits => DEPOSIT_STATUSES,
            ResourceKind::Withdrawals => WITHDRAWAL_STATUSES,
            ResourceKind::SupportTickets => TICKET_STATUSES,
            _ => &[],
        }
    }
}

impl FromStr for ResourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "deposits" => Ok(ResourceKind::Deposits),
            "withdrawals" => Ok(ResourceKind::Withdrawals),
            "users" => Ok(ResourceKind::Users),
            "notifications" => Ok(ResourceKind::Notifications),
            "messages" => Ok(ResourceKind::CommunityMessages),
            "tickets" => Ok(ResourceKind::SupportTickets),
            "promo-codes" => Ok(ResourceKind::PromoCodes),
            "plans" => Ok(ResourceKind::Plans),
            _ => Err(anyhow!("Unknown resource '{}'", s)),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
