use crate::api::notification_service::NotificationService;
use crate::entity::{ApiError, NotificationSummary};
use async_trait::async_trait;
use log::{error, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Number of notifications shown in the header dropdown.
pub const LATEST_NOTIFICATIONS: u32 = 20;

#[async_trait]
pub trait NotificationInteractor: Send + Sync {
    fn summary(&self) -> NotificationSummary;
    async fn refresh(&self) -> NotificationSummary;
    async fn refresh_unread_count(&self) -> u64;
    async fn mark_as_read(&self, notification_id: i64) -> Result<(), ApiError>;
    async fn mark_all_as_read(&self) -> Result<(), ApiError>;
}

pub struct NotificationInteractorImpl {
    service: Arc<dyn NotificationService + Send + Sync>,
    summary: Mutex<NotificationSummary>,
}

impl NotificationInteractorImpl {
    pub fn new(service: Arc<dyn NotificationService + Send + Sync>) -> Self {
        Self {
            service,
            summary: Mutex::new(NotificationSummary::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, NotificationSummary> {
        self.summary.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl NotificationInteractor for NotificationInteractorImpl {
    fn summary(&self) -> NotificationSummary {
        self.lock().clone()
    }

    async fn refresh(&self) -> NotificationSummary {
        let (count, latest) = futures::join!(
            self.service.unread_count(),
            self.service.latest(0, LATEST_NOTIFICATIONS)
        );

        let summary = match latest {
            Ok(notifications) => {
                let mut summary = NotificationSummary {
                    unread_count: 0,
                    notifications,
                };
                summary.unread_count = match count {
                    Ok(count) => count,
                    Err(e) => {
                        warn!("Unread count unavailable, counting loaded list: {}", e);
                        summary.unread_in_list()
                    }
                };
                summary
            }
            Err(e) => {
                error!("Error loading notifications: {}", e);
                NotificationSummary::default()
            }
        };

        *self.lock() = summary.clone();
        summary
    }

    async fn refresh_unread_count(&self) -> u64 {
        match self.service.unread_count().await {
            Ok(count) => {
                self.lock().unread_count = count;
                count
            }
            Err(e) => {
                error!("Error loading unread count: {}", e);
                self.lock().unread_count = 0;
                0
            }
        }
    }

    async fn mark_as_read(&self, notification_id: i64) -> Result<(), ApiError> {
        self.service.mark_as_read(notification_id).await?;

        let mut summary = self.lock();
        let mut changed = false;
        for notification in summary.notifications.iter_mut() {
            if notification.id == notification_id && !notification.is_read {
                notification.is_read = true;
                changed = true;
            }
        }
        if changed {
            summary.unread_count = summary.unread_count.saturating_sub(1);
        }
        Ok(())
    }

    async fn mark_all_as_read(&self) -> Result<(), ApiError> {
        self.service.mark_all_as_read().await?;

        let mut summary = self.lock();
        summary
            .notifications
            .iter_mut()
            .for_each(|notification| notification.is_read = true);
        summary.unread_count = 0;
        Ok(())
    }
}
