use async_trait::async_trait;

use super::goals_model::{Goal, GoalRecord, NewGoal};
use crate::errors::Result;
use crate::progress::GoalProgress;

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn list_goals(&self, event_id: &str) -> Result<Vec<Goal>>;
    fn get_goal(&self, goal_id: &str) -> Result<Goal>;
    async fn insert_goal(&self, record: GoalRecord) -> Result<Goal>;
    /// Deletes the goal together with its contributions.
    async fn delete_goal(&self, goal_id: String) -> Result<usize>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goals(&self, event_id: &str) -> Result<Vec<Goal>>;
    fn get_goal(&self, goal_id: &str) -> Result<Goal>;
    fn get_goal_progress(&self, goal_id: &str) -> Result<GoalProgress>;
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal>;
    async fn delete_goal(&self, goal_id: &str) -> Result<usize>;
}
