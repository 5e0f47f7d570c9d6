//! SQLite storage implementation for Eventbite.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `eventbite-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for events, goals and contributions
//! - Database-specific model types (with Diesel derives)
//!
//! Writes go through a single writer actor, one immediate transaction per
//! operation. Deleting an event or goal removes everything beneath it in the
//! same transaction.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod contributions;
pub mod events;
pub mod goals;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, open, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use contributions::ContributionRepository;
pub use events::EventRepository;
pub use goals::GoalRepository;

// Re-export from eventbite-core for convenience
pub use eventbite_core::errors::{DatabaseError, Error, Result};
