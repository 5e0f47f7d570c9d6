//! Progress models.

use serde::{Deserialize, Serialize};

use crate::contributions::Contribution;
use crate::goals::Goal;

/// How far a goal is from its target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal_id: String,
    pub total: i64,
    /// Clamped to `0.0..=100.0`
    pub percentage: f64,
    pub is_complete: bool,
    pub remaining: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalWithProgress {
    pub goal: Goal,
    pub progress: GoalProgress,
    pub contributions: Vec<Contribution>,
}

/// Header figures for an event board.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub goal_count: usize,
    pub completed_goals: usize,
    pub contribution_count: usize,
}
