//! Contribution domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::validation::QuantityInput;

/// A pledge of part of a goal's target, attributed to a named contributor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub id: String,
    pub goal_id: String,
    /// Full name, composed from first and last name
    pub contributor: String,
    pub quantity: i32,
    /// Manual "done" marker, independent of quantity
    pub fulfilled: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for pledging to a goal
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewContribution {
    pub goal_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub quantity: Option<QuantityInput>,
}

/// Input model for editing an existing pledge
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContributionUpdate {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub quantity: Option<QuantityInput>,
}

/// Validated pledge ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionRecord {
    pub goal_id: String,
    pub contributor: String,
    pub quantity: i32,
}
