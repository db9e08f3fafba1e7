mod admin_error;
mod column;
mod filter;
mod notification;
mod page;
mod resource;
mod row;
mod session;
mod sort;
mod ticket;

pub use admin_error::{AdminError, ApiError};
pub use column::{CellFormatter, ColumnDescriptor};
pub use filter::{FilterKey, FilterState};
pub use notification::{
    Notification, NotificationDraft, NotificationSummary, DEFAULT_NOTIFICATION_TYPE,
    NOTIFICATION_TYPES,
};
pub use page::Page;
pub use resource::ResourceKind;
pub use row::{field, row_id, value_text, Row};
pub use session::{AdminUser, SessionEnd, SessionStatus, ADMIN_ROLE};
pub use sort::{SortDirection, SortState};
pub use ticket::TicketStatus;
