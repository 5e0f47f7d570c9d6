//! SQLite storage implementation for the event directory.

mod model;
mod repository;

pub use model::{EventDB, NewEventDB};
pub use repository::EventRepository;
