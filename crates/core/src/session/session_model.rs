use std::sync::Arc;
use std::time::Duration;

use crate::celebrations::Celebration;
use crate::constants::{DEFAULT_POLL_INTERVAL_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::directory::EventBoard;
use crate::errors::ErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub poll_interval: Duration,
    /// Upper bound for one snapshot fetch; expiry is a connectivity failure.
    pub request_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

/// Notifications published by a session to its listeners.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Refreshed(Arc<EventBoard>),
    Celebration(Celebration),
    RefreshFailed {
        kind: ErrorKind,
        message: String,
        transient: bool,
    },
}

/// What a single refresh did.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// A newer snapshot was applied, with the celebrations it triggered.
    Applied(Vec<Celebration>),
    /// A newer refresh had already been applied; this result was dropped.
    Stale,
    /// Scheduled poll skipped while a pause guard is held.
    Paused,
}
