//! Client session engine - polling refresh, stale-result discard, celebrations.

mod event_session;
mod poller;
mod session_model;
mod session_traits;

pub use event_session::{EventSession, PauseGuard};
pub use poller::{spawn_poller, PollerHandle};
pub use session_model::{RefreshOutcome, SessionConfig, SessionEvent};
pub use session_traits::EventSnapshotSource;
