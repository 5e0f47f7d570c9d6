//! Eventbite Core - Domain entities, services, and traits.
//!
//! This crate holds the contribution aggregation and event-state engine.
//! It is database-agnostic and defines repository traits that are
//! implemented by the `storage-sqlite` crate, plus a snapshot-source trait
//! implemented by the HTTP client for polling sessions.

pub mod access;
pub mod admission;
pub mod celebrations;
pub mod constants;
pub mod contributions;
pub mod directory;
pub mod errors;
pub mod goals;
pub mod progress;
pub mod session;
pub mod utils;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use errors::Error;
pub use errors::ErrorKind;
pub use errors::Result;
