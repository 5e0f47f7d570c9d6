use crate::errors::Result;

use super::access_model::{AdminGrant, MasterGrant};

/// Trait for credential checks
pub trait AccessGateTrait: Send + Sync {
    /// Grants admin rights on one event when `password` matches its stored hash.
    fn authorize_admin(&self, event_id: &str, password: &str) -> Result<AdminGrant>;
    /// Grants directory-wide rights for the master credential.
    fn authorize_master(&self, username: &str, password: &str) -> Result<MasterGrant>;
    fn has_master_credentials(&self) -> bool;
}
