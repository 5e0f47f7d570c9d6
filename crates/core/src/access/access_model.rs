//! Access gate models.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Directory-wide credential, checked independently of any event password.
#[derive(Clone)]
pub struct MasterCredentials {
    pub username: String,
    /// Argon2 PHC string
    pub password_hash: String,
}

impl fmt::Debug for MasterCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Proof that the event password was presented correctly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminGrant {
    pub event_id: String,
}

/// Proof that the master credential was presented correctly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterGrant {
    pub username: String,
}

/// Bearer token issued by the server after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: u64,
    /// `event:<id>` or `master`
    pub scope: String,
}

/// Administrative rights held by one client session.
///
/// Never persisted; dropping the session drops the rights.
#[derive(Debug, Clone, Default)]
pub struct AdminSessions {
    events: HashSet<String>,
    master: bool,
}

impl AdminSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant_event(&mut self, grant: AdminGrant) {
        self.events.insert(grant.event_id);
    }

    pub fn grant_master(&mut self, _grant: MasterGrant) {
        self.master = true;
    }

    /// Master rights cover every event.
    pub fn is_event_admin(&self, event_id: &str) -> bool {
        self.master || self.events.contains(event_id)
    }

    pub fn is_master(&self) -> bool {
        self.master
    }

    pub fn revoke_event(&mut self, event_id: &str) {
        self.events.remove(event_id);
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.master = false;
    }
}
