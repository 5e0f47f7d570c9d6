//! Eventbite Client - HTTP access to a remote Eventbite server.
//!
//! The client speaks the `/api/v1` REST surface and maps error responses
//! back to `eventbite_core` errors, so a client-side `EventSession` can poll
//! a server exactly as it would a local store.

mod client;

pub use client::{EventbiteClient, DEFAULT_TIMEOUT};
