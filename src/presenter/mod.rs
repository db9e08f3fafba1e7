pub mod columns;
pub mod list_presenter;
pub mod notification_presenter;

pub use columns::renderer_for;
pub use list_presenter::{ListPresenter, ListPresenterImpl};
pub use notification_presenter::{NotificationPresenter, NotificationPresenterImpl};
