use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use super::directory_model::{Event, EventBoard, EventRecord, EventSnapshot, EventUpdate, NewEvent};
use super::directory_traits::{EventRepositoryTrait, EventServiceTrait};
use crate::access::hash_password;
use crate::constants::DEFAULT_EVENT_NAME;
use crate::errors::Result;
use crate::validation::{validate_event, validate_event_update};

/// Service for the registry of events
pub struct EventService {
    repository: Arc<dyn EventRepositoryTrait>,
}

impl EventService {
    pub fn new(repository: Arc<dyn EventRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl EventServiceTrait for EventService {
    fn list_events(&self) -> Result<Vec<Event>> {
        self.repository.list_events()
    }

    fn get_event(&self, event_id: &str) -> Result<Event> {
        self.repository.get_event(event_id)
    }

    fn get_event_snapshot(&self, event_id: &str) -> Result<EventSnapshot> {
        debug!("Loading snapshot for event {}", event_id);
        self.repository.load_snapshot(event_id)
    }

    fn get_event_board(&self, event_id: &str) -> Result<EventBoard> {
        Ok(self.get_event_snapshot(event_id)?.into_board())
    }

    /// Creates an event with an empty plan. Only the password hash is stored.
    async fn create_event(&self, new_event: NewEvent) -> Result<Event> {
        validate_event(&new_event)?;
        let record = EventRecord {
            name: new_event.name.trim().to_string(),
            event_date: new_event.event_date,
            password_hash: hash_password(&new_event.password)?,
        };
        let event = self.repository.insert_event(record).await?;
        info!("Created event '{}' ({})", event.name, event.id);
        Ok(event)
    }

    async fn update_event(&self, event_id: &str, update: EventUpdate) -> Result<Event> {
        validate_event_update(&update)?;
        let update = EventUpdate {
            name: update.name.trim().to_string(),
            event_date: update.event_date,
        };
        self.repository.update_event(event_id.to_string(), update).await
    }

    async fn delete_event(&self, event_id: &str) -> Result<usize> {
        let deleted = self.repository.delete_event(event_id.to_string()).await?;
        info!("Deleted event {} with its goals and contributions", event_id);
        Ok(deleted)
    }

    async fn reset_event(&self, event_id: &str) -> Result<Event> {
        let event = self
            .repository
            .reset_event(event_id.to_string(), DEFAULT_EVENT_NAME.to_string())
            .await?;
        info!("Reset plan of event {}", event_id);
        Ok(event)
    }
}
