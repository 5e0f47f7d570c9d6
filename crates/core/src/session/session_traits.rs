use async_trait::async_trait;

use crate::directory::EventSnapshot;
use crate::errors::Result;

/// Anything a session can read a consistent event snapshot from.
#[async_trait]
pub trait EventSnapshotSource: Send + Sync {
    async fn fetch_snapshot(&self, event_id: &str) -> Result<EventSnapshot>;
}
