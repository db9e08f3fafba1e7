pub mod notification_poller;

pub use notification_poller::NotificationPoller;
