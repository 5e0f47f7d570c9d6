//! Access gate - per-event admin passwords and the master credential.

mod access_model;
mod access_service;
mod access_traits;

pub use access_model::{AccessToken, AdminGrant, AdminSessions, MasterCredentials, MasterGrant};
pub use access_service::{hash_password, verify_password, AccessGate};
pub use access_traits::AccessGateTrait;
