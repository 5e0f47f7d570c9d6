//! In-memory repositories shared by the service tests.

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::access::hash_password;
use crate::contributions::{Contribution, ContributionRecord, ContributionRepositoryTrait};
use crate::directory::{Event, EventRecord, EventRepositoryTrait, EventSnapshot, EventUpdate};
use crate::errors::{Error, Result};
use crate::goals::{Goal, GoalCategory, GoalPriority, GoalRecord, GoalRepositoryTrait};

struct StoredEvent {
    event: Event,
    password_hash: String,
}

#[derive(Default)]
pub struct InMemoryStore {
    next_id: AtomicU64,
    events: Mutex<Vec<StoredEvent>>,
    goals: Mutex<Vec<Goal>>,
    contributions: Mutex<Vec<Contribution>>,
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn seed_event(&self, name: &str, password: &str) -> Event {
        let event = Event {
            id: self.next_id("evt"),
            name: name.to_string(),
            event_date: None,
            created_at: now(),
            updated_at: now(),
        };
        self.events.lock().unwrap().push(StoredEvent {
            event: event.clone(),
            password_hash: hash_password(password).unwrap(),
        });
        event
    }

    pub fn seed_goal(&self, event_id: &str, name: &str, target: i32) -> Goal {
        let goal = Goal {
            id: self.next_id("goal"),
            event_id: event_id.to_string(),
            name: name.to_string(),
            target,
            unit: "units".to_string(),
            category: GoalCategory::Other,
            priority: GoalPriority::Normal,
            created_at: now(),
        };
        self.goals.lock().unwrap().push(goal.clone());
        goal
    }

    pub fn seed_contribution(&self, goal_id: &str, contributor: &str, quantity: i32) -> Contribution {
        let contribution = Contribution {
            id: self.next_id("ctb"),
            goal_id: goal_id.to_string(),
            contributor: contributor.to_string(),
            quantity,
            fulfilled: false,
            created_at: now(),
            updated_at: now(),
        };
        self.contributions.lock().unwrap().push(contribution.clone());
        contribution
    }

    pub fn goal_count(&self) -> usize {
        self.goals.lock().unwrap().len()
    }

    pub fn contribution_count(&self) -> usize {
        self.contributions.lock().unwrap().len()
    }

    pub fn contributions_snapshot(&self) -> Vec<Contribution> {
        self.contributions.lock().unwrap().clone()
    }

    fn goal_ids_of(&self, event_id: &str) -> Vec<String> {
        self.goals
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.event_id == event_id)
            .map(|g| g.id.clone())
            .collect()
    }

    fn clear_plan(&self, event_id: &str) -> usize {
        let goal_ids = self.goal_ids_of(event_id);
        let mut contributions = self.contributions.lock().unwrap();
        let before = contributions.len();
        contributions.retain(|c| !goal_ids.contains(&c.goal_id));
        let removed = before - contributions.len();
        self.goals.lock().unwrap().retain(|g| g.event_id != event_id);
        removed + goal_ids.len()
    }

    fn with_contribution<F>(&self, contribution_id: &str, f: F) -> Result<Contribution>
    where
        F: FnOnce(&mut Contribution),
    {
        let mut contributions = self.contributions.lock().unwrap();
        let contribution = contributions
            .iter_mut()
            .find(|c| c.id == contribution_id)
            .ok_or_else(|| Error::not_found(format!("Contribution {}", contribution_id)))?;
        f(contribution);
        contribution.updated_at = now();
        Ok(contribution.clone())
    }
}

#[async_trait]
impl EventRepositoryTrait for InMemoryStore {
    fn list_events(&self) -> Result<Vec<Event>> {
        Ok(self.events.lock().unwrap().iter().map(|s| s.event.clone()).collect())
    }

    fn get_event(&self, event_id: &str) -> Result<Event> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.event.id == event_id)
            .map(|s| s.event.clone())
            .ok_or_else(|| Error::not_found(format!("Event {}", event_id)))
    }

    fn get_password_hash(&self, event_id: &str) -> Result<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.event.id == event_id)
            .map(|s| s.password_hash.clone())
            .ok_or_else(|| Error::not_found(format!("Event {}", event_id)))
    }

    fn load_snapshot(&self, event_id: &str) -> Result<EventSnapshot> {
        let event = self.get_event(event_id)?;
        let goals = self.list_goals(event_id)?;
        let contributions = self.list_for_event(event_id)?;
        Ok(EventSnapshot {
            event,
            goals,
            contributions,
        })
    }

    async fn insert_event(&self, record: EventRecord) -> Result<Event> {
        let event = Event {
            id: self.next_id("evt"),
            name: record.name,
            event_date: record.event_date,
            created_at: now(),
            updated_at: now(),
        };
        self.events.lock().unwrap().push(StoredEvent {
            event: event.clone(),
            password_hash: record.password_hash,
        });
        Ok(event)
    }

    async fn update_event(&self, event_id: String, update: EventUpdate) -> Result<Event> {
        let mut events = self.events.lock().unwrap();
        let stored = events
            .iter_mut()
            .find(|s| s.event.id == event_id)
            .ok_or_else(|| Error::not_found(format!("Event {}", event_id)))?;
        stored.event.name = update.name;
        stored.event.event_date = update.event_date;
        stored.event.updated_at = now();
        Ok(stored.event.clone())
    }

    async fn delete_event(&self, event_id: String) -> Result<usize> {
        self.get_event(&event_id)?;
        let removed = self.clear_plan(&event_id);
        self.events.lock().unwrap().retain(|s| s.event.id != event_id);
        Ok(removed + 1)
    }

    async fn reset_event(&self, event_id: String, name: String) -> Result<Event> {
        self.get_event(&event_id)?;
        self.clear_plan(&event_id);
        let mut events = self.events.lock().unwrap();
        let stored = events
            .iter_mut()
            .find(|s| s.event.id == event_id)
            .ok_or_else(|| Error::not_found(format!("Event {}", event_id)))?;
        stored.event.name = name;
        stored.event.updated_at = now();
        Ok(stored.event.clone())
    }
}

#[async_trait]
impl GoalRepositoryTrait for InMemoryStore {
    fn list_goals(&self, event_id: &str) -> Result<Vec<Goal>> {
        Ok(self
            .goals
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.event_id == event_id)
            .cloned()
            .collect())
    }

    fn get_goal(&self, goal_id: &str) -> Result<Goal> {
        self.goals
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == goal_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Goal {}", goal_id)))
    }

    async fn insert_goal(&self, record: GoalRecord) -> Result<Goal> {
        let goal = Goal {
            id: self.next_id("goal"),
            event_id: record.event_id,
            name: record.name,
            target: record.target,
            unit: record.unit,
            category: record.category,
            priority: record.priority,
            created_at: now(),
        };
        self.goals.lock().unwrap().push(goal.clone());
        Ok(goal)
    }

    async fn delete_goal(&self, goal_id: String) -> Result<usize> {
        self.get_goal(&goal_id)?;
        let mut contributions = self.contributions.lock().unwrap();
        let before = contributions.len();
        contributions.retain(|c| c.goal_id != goal_id);
        let removed = before - contributions.len();
        self.goals.lock().unwrap().retain(|g| g.id != goal_id);
        Ok(removed + 1)
    }
}

#[async_trait]
impl ContributionRepositoryTrait for InMemoryStore {
    fn list_for_goal(&self, goal_id: &str) -> Result<Vec<Contribution>> {
        Ok(self
            .contributions
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.goal_id == goal_id)
            .cloned()
            .collect())
    }

    fn list_for_event(&self, event_id: &str) -> Result<Vec<Contribution>> {
        let goal_ids = self.goal_ids_of(event_id);
        Ok(self
            .contributions
            .lock()
            .unwrap()
            .iter()
            .filter(|c| goal_ids.contains(&c.goal_id))
            .cloned()
            .collect())
    }

    fn get_contribution(&self, contribution_id: &str) -> Result<Contribution> {
        self.contributions
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == contribution_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Contribution {}", contribution_id)))
    }

    async fn insert_contribution(&self, record: ContributionRecord) -> Result<Contribution> {
        Ok(self.seed_contribution(&record.goal_id, &record.contributor, record.quantity))
    }

    async fn update_contribution(
        &self,
        contribution_id: String,
        contributor: String,
        quantity: i32,
    ) -> Result<Contribution> {
        self.with_contribution(&contribution_id, |c| {
            c.contributor = contributor;
            c.quantity = quantity;
        })
    }

    async fn set_fulfilled(&self, contribution_id: String, fulfilled: bool) -> Result<Contribution> {
        self.with_contribution(&contribution_id, |c| c.fulfilled = fulfilled)
    }

    async fn delete_contribution(&self, contribution_id: String) -> Result<usize> {
        let mut contributions = self.contributions.lock().unwrap();
        let before = contributions.len();
        contributions.retain(|c| c.id != contribution_id);
        match before - contributions.len() {
            0 => Err(Error::not_found(format!("Contribution {}", contribution_id))),
            n => Ok(n),
        }
    }
}
