use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use super::contributions_model::{Contribution, ContributionUpdate, NewContribution};
use super::contributions_traits::{ContributionRepositoryTrait, ContributionServiceTrait};
use crate::admission::{admit_contribution, ContributionCandidate};
use crate::errors::Result;
use crate::goals::GoalRepositoryTrait;
use crate::validation::{
    compose_contributor_name, parse_quantity, validate_contribution, validate_contribution_update,
};

/// Service for pledging to goals. Every write goes through admission first.
pub struct ContributionService {
    contribution_repo: Arc<dyn ContributionRepositoryTrait>,
    goal_repo: Arc<dyn GoalRepositoryTrait>,
}

impl ContributionService {
    pub fn new(
        contribution_repo: Arc<dyn ContributionRepositoryTrait>,
        goal_repo: Arc<dyn GoalRepositoryTrait>,
    ) -> Self {
        Self {
            contribution_repo,
            goal_repo,
        }
    }
}

#[async_trait]
impl ContributionServiceTrait for ContributionService {
    fn get_goal_contributions(&self, goal_id: &str) -> Result<Vec<Contribution>> {
        self.contribution_repo.list_for_goal(goal_id)
    }

    fn get_event_contributions(&self, event_id: &str) -> Result<Vec<Contribution>> {
        self.contribution_repo.list_for_event(event_id)
    }

    fn get_contribution(&self, contribution_id: &str) -> Result<Contribution> {
        self.contribution_repo.get_contribution(contribution_id)
    }

    async fn add_contribution(&self, input: NewContribution) -> Result<Contribution> {
        validate_contribution(&input)?;
        let quantity = parse_quantity(input.quantity.as_ref(), "quantity")?;
        let contributor = compose_contributor_name(&input.first_name, &input.last_name);

        let goal = self.goal_repo.get_goal(input.goal_id.trim())?;
        let existing = self.contribution_repo.list_for_goal(&goal.id)?;
        let admitted = admit_contribution(
            &goal,
            &existing,
            ContributionCandidate::new(goal.id.clone(), contributor, quantity),
        )?;

        let contribution = self
            .contribution_repo
            .insert_contribution(admitted.into_record())
            .await?;
        info!(
            "{} pledged {} {} to goal '{}'",
            contribution.contributor, contribution.quantity, goal.unit, goal.name
        );
        Ok(contribution)
    }

    async fn update_contribution(
        &self,
        contribution_id: &str,
        update: ContributionUpdate,
    ) -> Result<Contribution> {
        validate_contribution_update(&update)?;
        let quantity = parse_quantity(update.quantity.as_ref(), "quantity")?;
        let contributor = compose_contributor_name(&update.first_name, &update.last_name);

        let current = self.contribution_repo.get_contribution(contribution_id)?;
        let goal = self.goal_repo.get_goal(&current.goal_id)?;
        let existing = self.contribution_repo.list_for_goal(&goal.id)?;
        let admitted = admit_contribution(
            &goal,
            &existing,
            ContributionCandidate::edit(current.id.clone(), goal.id.clone(), contributor, quantity),
        )?;

        debug!("Editing contribution {} on goal {}", current.id, goal.id);
        self.contribution_repo
            .update_contribution(current.id, admitted.contributor, admitted.quantity)
            .await
    }

    async fn set_contribution_fulfilled(
        &self,
        contribution_id: &str,
        fulfilled: bool,
    ) -> Result<Contribution> {
        self.contribution_repo
            .set_fulfilled(contribution_id.to_string(), fulfilled)
            .await
    }

    async fn delete_contribution(&self, contribution_id: &str) -> Result<usize> {
        self.contribution_repo
            .delete_contribution(contribution_id.to_string())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{AdmissionError, DatabaseError, Error, ValidationError};
    use crate::progress::compute_progress;
    use crate::test_support::InMemoryStore;

    fn service(store: &Arc<InMemoryStore>) -> ContributionService {
        ContributionService::new(store.clone(), store.clone())
    }

    fn pledge(goal_id: &str, first: &str, last: &str, quantity: i32) -> NewContribution {
        NewContribution {
            goal_id: goal_id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            quantity: Some(quantity.into()),
        }
    }

    fn edit(first: &str, last: &str, quantity: i32) -> ContributionUpdate {
        ContributionUpdate {
            first_name: first.to_string(),
            last_name: last.to_string(),
            quantity: Some(quantity.into()),
        }
    }

    #[tokio::test]
    async fn test_pledge_composes_contributor_name() {
        let store = Arc::new(InMemoryStore::new());
        let event = store.seed_event("Picnic", "pass");
        let goal = store.seed_goal(&event.id, "Chips", 5);

        let created = service(&store)
            .add_contribution(pledge(&goal.id, "  José ", " Núñez  ", 2))
            .await
            .unwrap();
        assert_eq!(created.contributor, "José Núñez");
        assert_eq!(created.quantity, 2);
        assert!(!created.fulfilled);
    }

    #[tokio::test]
    async fn test_pledge_rejects_digits_in_name() {
        let store = Arc::new(InMemoryStore::new());
        let event = store.seed_event("Picnic", "pass");
        let goal = store.seed_goal(&event.id, "Chips", 5);

        let err = service(&store)
            .add_contribution(pledge(&goal.id, "Ana2", "Ruiz", 1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidInput(_))
        ));
        assert_eq!(store.contribution_count(), 0);
    }

    #[tokio::test]
    async fn test_pledge_to_unknown_goal_is_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let err = service(&store)
            .add_contribution(pledge("nope", "Ana", "Ruiz", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Database(DatabaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_worked_example() {
        let store = Arc::new(InMemoryStore::new());
        let event = store.seed_event("Picnic", "pass");
        let goal = store.seed_goal(&event.id, "Soda", 10);
        let service = service(&store);

        service
            .add_contribution(pledge(&goal.id, "Ana", "Ruiz", 6))
            .await
            .unwrap();
        let luis = service
            .add_contribution(pledge(&goal.id, "Luis", "Paz", 5))
            .await
            .unwrap();

        let progress = compute_progress(&goal, &store.contributions_snapshot());
        assert_eq!(progress.total, 11);
        assert!(progress.is_complete);

        // Same name again on a complete goal: capacity is checked first.
        let err = service
            .add_contribution(pledge(&goal.id, "luis", "PAZ", 3))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Admission(AdmissionError::CapacityExceeded { .. })
        ));

        let edited = service
            .update_contribution(&luis.id, edit("Luis", "Paz", 2))
            .await
            .unwrap();
        assert_eq!(edited.id, luis.id);
        assert_eq!(edited.quantity, 2);

        let progress = compute_progress(&goal, &store.contributions_snapshot());
        assert_eq!(progress.total, 8);
        assert!(!progress.is_complete);
    }

    #[tokio::test]
    async fn test_duplicate_on_open_goal() {
        let store = Arc::new(InMemoryStore::new());
        let event = store.seed_event("Picnic", "pass");
        let goal = store.seed_goal(&event.id, "Soda", 10);
        let service = service(&store);

        service
            .add_contribution(pledge(&goal.id, "Ana", "Ruiz", 2))
            .await
            .unwrap();
        let err = service
            .add_contribution(pledge(&goal.id, " ana ", "ruiz", 1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Admission(AdmissionError::DuplicateContributor { .. })
        ));
        assert_eq!(store.contribution_count(), 1);
    }

    #[tokio::test]
    async fn test_edit_allowed_on_complete_goal() {
        let store = Arc::new(InMemoryStore::new());
        let event = store.seed_event("Picnic", "pass");
        let goal = store.seed_goal(&event.id, "Cake", 1);
        let ana = store.seed_contribution(&goal.id, "Ana Ruiz", 1);

        let edited = service(&store)
            .update_contribution(&ana.id, edit("Ana", "Ruiz", 3))
            .await
            .unwrap();
        assert_eq!(edited.quantity, 3);
        assert_eq!(store.contribution_count(), 1);
    }

    #[tokio::test]
    async fn test_edit_cannot_take_another_contributors_name() {
        let store = Arc::new(InMemoryStore::new());
        let event = store.seed_event("Picnic", "pass");
        let goal = store.seed_goal(&event.id, "Soda", 10);
        store.seed_contribution(&goal.id, "Ana Ruiz", 2);
        let luis = store.seed_contribution(&goal.id, "Luis Paz", 1);

        let err = service(&store)
            .update_contribution(&luis.id, edit("ana", "RUIZ", 1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Admission(AdmissionError::DuplicateContributor { .. })
        ));
        let unchanged = store.contributions_snapshot();
        assert!(unchanged.iter().any(|c| c.id == luis.id && c.contributor == "Luis Paz"));
    }

    #[tokio::test]
    async fn test_fulfilled_flag_is_independent_of_quantity() {
        let store = Arc::new(InMemoryStore::new());
        let event = store.seed_event("Picnic", "pass");
        let goal = store.seed_goal(&event.id, "Cake", 5);
        let ana = store.seed_contribution(&goal.id, "Ana Ruiz", 1);
        let service = service(&store);

        let done = service.set_contribution_fulfilled(&ana.id, true).await.unwrap();
        assert!(done.fulfilled);
        assert_eq!(done.quantity, 1);

        let undone = service.set_contribution_fulfilled(&ana.id, false).await.unwrap();
        assert!(!undone.fulfilled);
    }

    #[tokio::test]
    async fn test_delete_contribution_reopens_goal() {
        let store = Arc::new(InMemoryStore::new());
        let event = store.seed_event("Picnic", "pass");
        let goal = store.seed_goal(&event.id, "Cake", 1);
        let ana = store.seed_contribution(&goal.id, "Ana Ruiz", 1);
        let service = service(&store);

        assert_eq!(service.delete_contribution(&ana.id).await.unwrap(), 1);
        service
            .add_contribution(pledge(&goal.id, "Luis", "Paz", 1))
            .await
            .unwrap();
        assert_eq!(service.get_goal_contributions(&goal.id).unwrap().len(), 1);
        assert_eq!(service.get_event_contributions(&event.id).unwrap().len(), 1);
    }
}
