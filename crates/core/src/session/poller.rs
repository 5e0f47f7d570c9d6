//! Periodic refresh of an [`EventSession`].

use log::{debug, info};
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::event_session::EventSession;

/// Stops the poll loop when dropped or when [`PollerHandle::stop`] is called.
#[derive(Debug)]
pub struct PollerHandle {
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Signals the loop and waits for it to exit.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |t| t.is_finished())
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

/// Refreshes `session` every configured poll interval, starting immediately.
///
/// Failures are already published by the session; the loop just waits for
/// the next tick. Ticks missed while a fetch was slow are skipped, not
/// replayed.
pub fn spawn_poller(session: Arc<EventSession>) -> PollerHandle {
    let period = session.config().poll_interval;
    let (stop_tx, mut stop_rx) = oneshot::channel();
    let task = tokio::spawn(async move {
        info!(
            "Polling event {} every {:?}",
            session.event_id(),
            period
        );
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = &mut stop_rx => break,
                _ = ticker.tick() => {
                    if let Ok(outcome) = session.scheduled_refresh().await {
                        debug!("Poll of event {}: {:?}", session.event_id(), outcome);
                    }
                }
            }
        }
        debug!("Stopped polling event {}", session.event_id());
    });

    PollerHandle {
        stop: Some(stop_tx),
        task: Some(task),
    }
}
