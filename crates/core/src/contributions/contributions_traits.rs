use async_trait::async_trait;

use super::contributions_model::{
    Contribution, ContributionRecord, ContributionUpdate, NewContribution,
};
use crate::errors::Result;

/// Trait for contribution repository operations
#[async_trait]
pub trait ContributionRepositoryTrait: Send + Sync {
    fn list_for_goal(&self, goal_id: &str) -> Result<Vec<Contribution>>;
    fn list_for_event(&self, event_id: &str) -> Result<Vec<Contribution>>;
    fn get_contribution(&self, contribution_id: &str) -> Result<Contribution>;
    async fn insert_contribution(&self, record: ContributionRecord) -> Result<Contribution>;
    /// Rewrites name and quantity of an existing pledge, keeping its id.
    async fn update_contribution(
        &self,
        contribution_id: String,
        contributor: String,
        quantity: i32,
    ) -> Result<Contribution>;
    async fn set_fulfilled(&self, contribution_id: String, fulfilled: bool) -> Result<Contribution>;
    async fn delete_contribution(&self, contribution_id: String) -> Result<usize>;
}

/// Trait for contribution service operations
#[async_trait]
pub trait ContributionServiceTrait: Send + Sync {
    fn get_goal_contributions(&self, goal_id: &str) -> Result<Vec<Contribution>>;
    fn get_event_contributions(&self, event_id: &str) -> Result<Vec<Contribution>>;
    fn get_contribution(&self, contribution_id: &str) -> Result<Contribution>;
    async fn add_contribution(&self, input: NewContribution) -> Result<Contribution>;
    async fn update_contribution(
        &self,
        contribution_id: &str,
        update: ContributionUpdate,
    ) -> Result<Contribution>;
    async fn set_contribution_fulfilled(
        &self,
        contribution_id: &str,
        fulfilled: bool,
    ) -> Result<Contribution>;
    async fn delete_contribution(&self, contribution_id: &str) -> Result<usize>;
}
