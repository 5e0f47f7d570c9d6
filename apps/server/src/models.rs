//! Request bodies owned by the HTTP layer.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Clone)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema, Clone)]
pub struct MasterLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy)]
pub struct FulfilledUpdate {
    pub fulfilled: bool,
}
