pub mod announcement_interactor;
pub mod catalog_interactor;
pub mod community_interactor;
pub mod financial_interactor;
pub mod notification_interactor;
pub mod resource_list;
pub mod support_interactor;
pub mod user_interactor;

pub use announcement_interactor::{AnnouncementInteractor, AnnouncementInteractorImpl};
pub use catalog_interactor::{CatalogInteractor, CatalogInteractorImpl};
pub use community_interactor::{CommunityInteractor, CommunityInteractorImpl};
pub use financial_interactor::{FinanceTab, FinancialInteractor, FinancialInteractorImpl};
pub use notification_interactor::{NotificationInteractor, NotificationInteractorImpl};
pub use resource_list::{FetchOutcome, ListSnapshot, ListStatus, ResourceList};
pub use support_interactor::{SupportInteractor, SupportInteractorImpl};
pub use user_interactor::{UserInteractor, UserInteractorImpl};
