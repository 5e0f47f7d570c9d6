use argon2::{
    password_hash::{Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use log::{debug, warn};
use rand::rngs::OsRng;
use std::sync::Arc;

use super::access_model::{AdminGrant, MasterCredentials, MasterGrant};
use super::access_traits::AccessGateTrait;
use crate::directory::EventRepositoryTrait;
use crate::errors::{Error, Result};

/// Hashes a password with a fresh random salt into an argon2 PHC string.
pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Unexpected(format!("Failed to hash password: {}", e)))
}

/// Checks `candidate` against a stored PHC string.
///
/// A mismatch is `Ok(false)`; a malformed stored hash is an error.
pub fn verify_password(candidate: &str, password_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| Error::Unexpected(format!("Invalid password hash: {}", e)))?;
    match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(other) => Err(Error::Unexpected(format!(
            "Password verification failed: {}",
            other
        ))),
    }
}

/// Per-event and directory-wide credential checks. Stateless per call.
pub struct AccessGate {
    events: Arc<dyn EventRepositoryTrait>,
    master: Option<MasterCredentials>,
}

impl AccessGate {
    pub fn new(events: Arc<dyn EventRepositoryTrait>, master: Option<MasterCredentials>) -> Result<Self> {
        if let Some(creds) = &master {
            PasswordHash::new(&creds.password_hash).map_err(|e| {
                Error::InvalidConfigValue(format!("Master password hash is not a PHC string: {}", e))
            })?;
        }
        Ok(Self { events, master })
    }
}

impl AccessGateTrait for AccessGate {
    fn authorize_admin(&self, event_id: &str, password: &str) -> Result<AdminGrant> {
        let stored = self.events.get_password_hash(event_id)?;
        if verify_password(password, &stored)? {
            debug!("Admin access granted for event {}", event_id);
            Ok(AdminGrant {
                event_id: event_id.to_string(),
            })
        } else {
            warn!("Wrong admin password for event {}", event_id);
            Err(Error::Unauthorized("Invalid event password".to_string()))
        }
    }

    fn authorize_master(&self, username: &str, password: &str) -> Result<MasterGrant> {
        let creds = self
            .master
            .as_ref()
            .ok_or_else(|| Error::Unauthorized("No master credential is configured".to_string()))?;

        // Verify even on a username mismatch so both failures cost the same.
        let password_ok = verify_password(password, &creds.password_hash)?;
        if password_ok && creds.username == username {
            debug!("Master access granted to {}", username);
            Ok(MasterGrant {
                username: username.to_string(),
            })
        } else {
            warn!("Rejected master login for {}", username);
            Err(Error::Unauthorized("Invalid master credentials".to_string()))
        }
    }

    fn has_master_credentials(&self) -> bool {
        self.master.is_some()
    }
}
