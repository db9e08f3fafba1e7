use crate::entity::NotificationSummary;
use crate::interactor::notification_interactor::NotificationInteractor;
use crate::view::table_view::NotificationView;
use anyhow::Result;
use async_trait::async_trait;
use log::error;
use std::sync::Arc;

#[async_trait]
pub trait NotificationPresenter: Send + Sync {
    async fn show_notifications(&self) -> Result<()>;
    /// Show a summary produced elsewhere, e.g. by the background poller.
    async fn present(&self, summary: NotificationSummary) -> Result<()>;
    async fn mark_as_read(&self, notification_id: i64) -> Result<()>;
    async fn mark_all_as_read(&self) -> Result<()>;
}

pub struct NotificationPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I, V> NotificationPresenterImpl<I, V>
where
    I: NotificationInteractor,
    V: NotificationView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

#[async_trait]
impl<I, V> NotificationPresenter for NotificationPresenterImpl<I, V>
where
    I: NotificationInteractor + Send + Sync,
    V: NotificationView + Send + Sync,
{
    async fn show_notifications(&self) -> Result<()> {
        let summary = self.interactor.refresh().await;
        self.view.display_notifications(summary).await
    }

    async fn present(&self, summary: NotificationSummary) -> Result<()> {
        self.view.display_notifications(summary).await
    }

    async fn mark_as_read(&self, notification_id: i64) -> Result<()> {
        if let Err(e) = self.interactor.mark_as_read(notification_id).await {
            error!("Error marking notification {} as read: {}", notification_id, e);
            return Ok(());
        }
        self.view.display_notifications(self.interactor.summary()).await
    }

    async fn mark_all_as_read(&self) -> Result<()> {
        if let Err(e) = self.interactor.mark_all_as_read().await {
            error!("Error marking all notifications as read: {}", e);
            return Ok(());
        }
        self.view.display_notifications(self.interactor.summary()).await
    }
}
