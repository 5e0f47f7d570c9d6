use async_trait::async_trait;

use super::directory_model::{Event, EventBoard, EventRecord, EventSnapshot, EventUpdate, NewEvent};
use crate::errors::Result;

/// Trait for event repository operations
#[async_trait]
pub trait EventRepositoryTrait: Send + Sync {
    fn list_events(&self) -> Result<Vec<Event>>;
    fn get_event(&self, event_id: &str) -> Result<Event>;
    fn get_password_hash(&self, event_id: &str) -> Result<String>;
    /// Reads the event with all of its goals and contributions in one consistent read.
    fn load_snapshot(&self, event_id: &str) -> Result<EventSnapshot>;
    async fn insert_event(&self, record: EventRecord) -> Result<Event>;
    async fn update_event(&self, event_id: String, update: EventUpdate) -> Result<Event>;
    /// Deletes the event and, with it, every goal and contribution it owns.
    async fn delete_event(&self, event_id: String) -> Result<usize>;
    /// Removes every goal and contribution and renames the event, keeping id and password.
    async fn reset_event(&self, event_id: String, name: String) -> Result<Event>;
}

/// Trait for event directory operations
#[async_trait]
pub trait EventServiceTrait: Send + Sync {
    fn list_events(&self) -> Result<Vec<Event>>;
    fn get_event(&self, event_id: &str) -> Result<Event>;
    fn get_event_snapshot(&self, event_id: &str) -> Result<EventSnapshot>;
    fn get_event_board(&self, event_id: &str) -> Result<EventBoard>;
    async fn create_event(&self, new_event: NewEvent) -> Result<Event>;
    async fn update_event(&self, event_id: &str, update: EventUpdate) -> Result<Event>;
    async fn delete_event(&self, event_id: &str) -> Result<usize>;
    async fn reset_event(&self, event_id: &str) -> Result<Event>;
}
