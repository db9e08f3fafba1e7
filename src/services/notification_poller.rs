use crate::entity::{NotificationSummary, SessionStatus};
use crate::interactor::notification_interactor::NotificationInteractor;
use crate::session::Session;
use anyhow::{bail, Result};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::select;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};

/// Background refresh of the notification badge.
///
/// The task is owned by the poller: `stop` ends it and waits for it, and
/// dropping a running poller aborts it. It also ends on its own once the
/// session does.
pub struct NotificationPoller {
    interactor: Arc<dyn NotificationInteractor + Send + Sync>,
    session: Arc<Session>,
    period: Duration,
    summary_tx: watch::Sender<NotificationSummary>,
    stop_tx: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl NotificationPoller {
    pub fn new(
        interactor: Arc<dyn NotificationInteractor + Send + Sync>,
        session: Arc<Session>,
        period: Duration,
    ) -> Self {
        let (summary_tx, _) = watch::channel(NotificationSummary::default());
        Self {
            interactor,
            session,
            period,
            summary_tx,
            stop_tx: None,
            handle: None,
        }
    }

    /// Latest summary published by the task.
    pub fn subscribe(&self) -> watch::Receiver<NotificationSummary> {
        self.summary_tx.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    pub fn start(&mut self) -> Result<()> {
        if self.is_running() {
            warn!("Notification poller is already running");
            return Ok(());
        }
        if self.session.status() != SessionStatus::Active {
            bail!("Cannot poll notifications without an active session");
        }

        let (stop_tx, mut stop_rx) = mpsc::channel::<()>(1);
        self.stop_tx = Some(stop_tx);

        let interactor = self.interactor.clone();
        let summary_tx = self.summary_tx.clone();
        let mut session_rx = self.session.subscribe();
        let period = self.period;

        self.handle = Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last_run = Instant::now();

            loop {
                select! {
                    _ = ticker.tick() => {
                        debug!("Polling notifications (last run: {:.2?} ago)", last_run.elapsed());
                        let summary = interactor.refresh().await;
                        summary_tx.send_replace(summary);
                        last_run = Instant::now();
                    }
                    changed = session_rx.changed() => {
                        let ended = changed.is_err()
                            || matches!(*session_rx.borrow(), SessionStatus::Ended(_));
                        if ended {
                            info!("Session ended, stopping notification poller");
                            break;
                        }
                    }
                    _ = stop_rx.recv() => {
                        info!("Stopping notification poller");
                        break;
                    }
                }
            }
        }));

        info!("Notification poller started (every {:?})", self.period);
        Ok(())
    }

    /// Signal the task and wait until it has finished.
    pub async fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(()).await;
        }
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("Notification poller ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for NotificationPoller {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
