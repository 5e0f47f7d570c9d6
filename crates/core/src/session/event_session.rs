use log::{debug, warn};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::broadcast;

use super::session_model::{RefreshOutcome, SessionConfig, SessionEvent};
use super::session_traits::EventSnapshotSource;
use crate::access::{AdminGrant, AdminSessions, MasterGrant};
use crate::celebrations::CompletionDetector;
use crate::constants::SESSION_EVENT_CAPACITY;
use crate::directory::{EventBoard, EventSnapshot};
use crate::errors::{Error, Result};

#[derive(Default)]
struct SessionState {
    applied_seq: u64,
    board: Option<Arc<EventBoard>>,
    detector: CompletionDetector,
    admin: AdminSessions,
}

/// One client's view of one event.
///
/// Every refresh is numbered when it starts. A result is applied only if no
/// later-started refresh has been applied already, so a slow poll can never
/// overwrite fresher data.
pub struct EventSession {
    event_id: String,
    source: Arc<dyn EventSnapshotSource>,
    config: SessionConfig,
    next_seq: AtomicU64,
    pauses: Arc<AtomicUsize>,
    state: Mutex<SessionState>,
    events: broadcast::Sender<SessionEvent>,
}

/// Suspends scheduled polling until dropped.
#[must_use = "polling resumes as soon as the guard is dropped"]
#[derive(Debug)]
pub struct PauseGuard {
    pauses: Arc<AtomicUsize>,
}

impl Drop for PauseGuard {
    fn drop(&mut self) {
        self.pauses.fetch_sub(1, Ordering::SeqCst);
    }
}

impl EventSession {
    pub fn new(
        event_id: impl Into<String>,
        source: Arc<dyn EventSnapshotSource>,
        config: SessionConfig,
    ) -> Self {
        let (events, _receiver) = broadcast::channel(SESSION_EVENT_CAPACITY);
        Self {
            event_id: event_id.into(),
            source,
            config,
            next_seq: AtomicU64::new(0),
            pauses: Arc::new(AtomicUsize::new(0)),
            state: Mutex::new(SessionState::default()),
            events,
        }
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        // A panicked holder cannot leave the state half-written; keep going.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(&self, event: SessionEvent) {
        // Nobody listening is fine.
        let _ = self.events.send(event);
    }

    /// Latest applied board, if any refresh succeeded yet.
    pub fn board(&self) -> Option<Arc<EventBoard>> {
        self.state().board.clone()
    }

    pub fn pause(&self) -> PauseGuard {
        self.pauses.fetch_add(1, Ordering::SeqCst);
        PauseGuard {
            pauses: self.pauses.clone(),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.pauses.load(Ordering::SeqCst) > 0
    }

    /// Fetches a fresh snapshot and applies it unless a newer one won the race.
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let snapshot = match self.fetch().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Refresh of event {} failed: {}", self.event_id, e);
                self.publish(SessionEvent::RefreshFailed {
                    kind: e.kind(),
                    message: e.to_string(),
                    transient: e.is_transient(),
                });
                return Err(e);
            }
        };

        let (board, celebrations) = {
            let mut state = self.state();
            if seq <= state.applied_seq {
                debug!(
                    "Dropping stale snapshot #{} of event {} (applied #{})",
                    seq, self.event_id, state.applied_seq
                );
                return Ok(RefreshOutcome::Stale);
            }
            state.applied_seq = seq;
            let celebrations = state
                .detector
                .observe(&snapshot.goals, &snapshot.contributions);
            let board = Arc::new(snapshot.into_board());
            state.board = Some(board.clone());
            (board, celebrations)
        };

        self.publish(SessionEvent::Refreshed(board));
        for celebration in &celebrations {
            self.publish(SessionEvent::Celebration(celebration.clone()));
        }
        Ok(RefreshOutcome::Applied(celebrations))
    }

    /// Refresh triggered by the poll timer; skipped while paused.
    pub async fn scheduled_refresh(&self) -> Result<RefreshOutcome> {
        if self.is_paused() {
            debug!("Poll of event {} skipped while paused", self.event_id);
            return Ok(RefreshOutcome::Paused);
        }
        self.refresh().await
    }

    async fn fetch(&self) -> Result<EventSnapshot> {
        let timeout = self.config.request_timeout;
        tokio::time::timeout(timeout, self.source.fetch_snapshot(&self.event_id))
            .await
            .map_err(|_| {
                Error::Connectivity(format!(
                    "No snapshot of event {} within {:?}",
                    self.event_id, timeout
                ))
            })?
    }

    pub fn grant_admin(&self, grant: AdminGrant) {
        self.state().admin.grant_event(grant);
    }

    pub fn grant_master(&self, grant: MasterGrant) {
        self.state().admin.grant_master(grant);
    }

    /// Whether this session may run admin operations on its event.
    pub fn is_admin(&self) -> bool {
        self.state().admin.is_event_admin(&self.event_id)
    }

    pub fn is_master(&self) -> bool {
        self.state().admin.is_master()
    }

    pub fn logout(&self) {
        self.state().admin.clear();
    }

    pub fn is_celebrated(&self, goal_id: &str) -> bool {
        self.state().detector.is_celebrated(goal_id)
    }
}
