use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use super::goals_model::{Goal, GoalRecord, NewGoal};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::constants::DEFAULT_GOAL_UNIT;
use crate::contributions::ContributionRepositoryTrait;
use crate::directory::EventRepositoryTrait;
use crate::errors::Result;
use crate::progress::{compute_progress, GoalProgress};
use crate::validation::{parse_quantity, validate_goal};

pub struct GoalService {
    goal_repo: Arc<dyn GoalRepositoryTrait>,
    event_repo: Arc<dyn EventRepositoryTrait>,
    contribution_repo: Arc<dyn ContributionRepositoryTrait>,
}

impl GoalService {
    pub fn new(
        goal_repo: Arc<dyn GoalRepositoryTrait>,
        event_repo: Arc<dyn EventRepositoryTrait>,
        contribution_repo: Arc<dyn ContributionRepositoryTrait>,
    ) -> Self {
        GoalService {
            goal_repo,
            event_repo,
            contribution_repo,
        }
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goals(&self, event_id: &str) -> Result<Vec<Goal>> {
        self.goal_repo.list_goals(event_id)
    }

    fn get_goal(&self, goal_id: &str) -> Result<Goal> {
        self.goal_repo.get_goal(goal_id)
    }

    fn get_goal_progress(&self, goal_id: &str) -> Result<GoalProgress> {
        let goal = self.goal_repo.get_goal(goal_id)?;
        let contributions = self.contribution_repo.list_for_goal(goal_id)?;
        Ok(compute_progress(&goal, &contributions))
    }

    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        validate_goal(&new_goal)?;
        // Fails with NotFound before anything is written.
        self.event_repo.get_event(&new_goal.event_id)?;

        let target = parse_quantity(new_goal.target.as_ref(), "target")?;
        let unit = new_goal
            .unit
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_GOAL_UNIT)
            .to_string();
        let record = GoalRecord {
            event_id: new_goal.event_id,
            name: new_goal.name.trim().to_string(),
            target,
            unit,
            category: new_goal.category.unwrap_or_default(),
            priority: new_goal.priority.unwrap_or_default(),
        };
        debug!("Creating goal {:?}", record);
        let goal = self.goal_repo.insert_goal(record).await?;
        info!("Created goal '{}' ({}) in event {}", goal.name, goal.id, goal.event_id);
        Ok(goal)
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<usize> {
        self.goal_repo.delete_goal(goal_id.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{DatabaseError, Error};
    use crate::goals::{GoalCategory, GoalPriority};
    use crate::test_support::InMemoryStore;

    fn service(store: &Arc<InMemoryStore>) -> GoalService {
        GoalService::new(store.clone(), store.clone(), store.clone())
    }

    #[tokio::test]
    async fn test_create_goal_applies_defaults() {
        let store = Arc::new(InMemoryStore::new());
        let event = store.seed_event("Picnic", "pass");
        let goal = service(&store)
            .create_goal(NewGoal {
                event_id: event.id.clone(),
                name: " Chips ".into(),
                target: Some("4".into()),
                unit: Some("  ".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(goal.name, "Chips");
        assert_eq!(goal.target, 4);
        assert_eq!(goal.unit, DEFAULT_GOAL_UNIT);
        assert_eq!(goal.category, GoalCategory::Other);
        assert_eq!(goal.priority, GoalPriority::Normal);
        assert_eq!(goal.event_id, event.id);
    }

    #[tokio::test]
    async fn test_create_goal_requires_existing_event() {
        let store = Arc::new(InMemoryStore::new());
        let err = service(&store)
            .create_goal(NewGoal {
                event_id: "missing".into(),
                name: "Chips".into(),
                target: Some(4.into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Database(DatabaseError::NotFound(_))));
        assert_eq!(store.goal_count(), 0);
    }

    #[tokio::test]
    async fn test_create_goal_rejects_bad_target() {
        let store = Arc::new(InMemoryStore::new());
        let event = store.seed_event("Picnic", "pass");
        let err = service(&store)
            .create_goal(NewGoal {
                event_id: event.id,
                name: "Chips".into(),
                target: Some(0.into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_goal_cascades_to_contributions() {
        let store = Arc::new(InMemoryStore::new());
        let event = store.seed_event("Picnic", "pass");
        let chips = store.seed_goal(&event.id, "Chips", 4);
        let soda = store.seed_goal(&event.id, "Soda", 4);
        store.seed_contribution(&chips.id, "Ana Ruiz", 2);
        store.seed_contribution(&soda.id, "Ana Ruiz", 2);

        service(&store).delete_goal(&chips.id).await.unwrap();
        assert_eq!(store.goal_count(), 1);
        assert_eq!(store.contribution_count(), 1);
    }

    #[tokio::test]
    async fn test_goal_progress() {
        let store = Arc::new(InMemoryStore::new());
        let event = store.seed_event("Picnic", "pass");
        let goal = store.seed_goal(&event.id, "Soda", 10);
        store.seed_contribution(&goal.id, "Ana Ruiz", 6);
        store.seed_contribution(&goal.id, "Luis Paz", 5);

        let progress = service(&store).get_goal_progress(&goal.id).unwrap();
        assert_eq!(progress.total, 11);
        assert_eq!(progress.percentage, 100.0);
        assert!(progress.is_complete);
    }
}
