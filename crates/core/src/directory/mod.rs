//! Event directory - registry of events, each owning its goals and contributions.

mod directory_model;
mod directory_service;
mod directory_traits;

pub use directory_model::{Event, EventBoard, EventRecord, EventSnapshot, EventUpdate, NewEvent};
pub use directory_service::EventService;
pub use directory_traits::{EventRepositoryTrait, EventServiceTrait};
