use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::contributions::Contribution;
use crate::goals::Goal;
use crate::progress::compute_progress;

/// One-shot signal that a goal reached its target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Celebration {
    pub goal_id: String,
    pub goal_name: String,
    pub total: i64,
    pub target: i32,
}

/// Tracks which goals were already celebrated during one client session.
///
/// The celebrated set only grows. A goal that drops below its target and
/// completes again is not celebrated a second time.
#[derive(Debug, Default)]
pub struct CompletionDetector {
    celebrated: HashSet<String>,
}

impl CompletionDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes every goal and returns the celebrations that are due now.
    pub fn observe(&mut self, goals: &[Goal], contributions: &[Contribution]) -> Vec<Celebration> {
        let mut fired = Vec::new();
        for goal in goals {
            let progress = compute_progress(goal, contributions);
            if !progress.is_complete || progress.total <= 0 {
                continue;
            }
            if self.celebrated.insert(goal.id.clone()) {
                info!("Goal '{}' reached {}/{}", goal.name, progress.total, goal.target);
                fired.push(Celebration {
                    goal_id: goal.id.clone(),
                    goal_name: goal.name.clone(),
                    total: progress.total,
                    target: goal.target,
                });
            }
        }
        fired
    }

    pub fn is_celebrated(&self, goal_id: &str) -> bool {
        self.celebrated.contains(goal_id)
    }

    pub fn celebrated_count(&self) -> usize {
        self.celebrated.len()
    }

    /// Forgets every celebration, as at the start of a new session.
    pub fn reset(&mut self) {
        self.celebrated.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::{GoalCategory, GoalPriority};
    use chrono::NaiveDateTime;

    fn goal(id: &str, target: i32) -> Goal {
        Goal {
            id: id.to_string(),
            event_id: "evt".to_string(),
            name: format!("Goal {}", id),
            target,
            unit: "units".to_string(),
            category: GoalCategory::Food,
            priority: GoalPriority::Normal,
            created_at: NaiveDateTime::default(),
        }
    }

    fn pledge(id: &str, goal_id: &str, quantity: i32) -> Contribution {
        Contribution {
            id: id.to_string(),
            goal_id: goal_id.to_string(),
            contributor: format!("Person {}", id),
            quantity,
            fulfilled: false,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_fires_once_when_goal_completes() {
        let goals = vec![goal("a", 3), goal("b", 10)];
        let mut detector = CompletionDetector::new();

        assert!(detector.observe(&goals, &[pledge("1", "a", 2)]).is_empty());

        let contributions = vec![pledge("1", "a", 2), pledge("2", "a", 1), pledge("3", "b", 4)];
        let fired = detector.observe(&goals, &contributions);
        assert_eq!(
            fired,
            vec![Celebration {
                goal_id: "a".into(),
                goal_name: "Goal a".into(),
                total: 3,
                target: 3,
            }]
        );
        assert!(detector.observe(&goals, &contributions).is_empty());
        assert!(detector.is_celebrated("a"));
        assert!(!detector.is_celebrated("b"));
    }

    #[test]
    fn test_does_not_refire_after_dropping_below_target() {
        let goals = vec![goal("a", 2)];
        let mut detector = CompletionDetector::new();

        assert_eq!(detector.observe(&goals, &[pledge("1", "a", 2)]).len(), 1);
        assert!(detector.observe(&goals, &[]).is_empty());
        assert!(detector.observe(&goals, &[pledge("2", "a", 5)]).is_empty());
        assert_eq!(detector.celebrated_count(), 1);
    }

    #[test]
    fn test_reset_starts_a_new_session() {
        let goals = vec![goal("a", 1)];
        let contributions = vec![pledge("1", "a", 1)];
        let mut detector = CompletionDetector::new();

        assert_eq!(detector.observe(&goals, &contributions).len(), 1);
        detector.reset();
        assert_eq!(detector.celebrated_count(), 0);
        assert_eq!(detector.observe(&goals, &contributions).len(), 1);
    }

    #[test]
    fn test_multiple_goals_in_one_refresh() {
        let goals = vec![goal("a", 1), goal("b", 1), goal("c", 4)];
        let contributions = vec![pledge("1", "a", 1), pledge("2", "b", 3), pledge("3", "c", 1)];
        let mut detector = CompletionDetector::new();

        let ids: Vec<String> = detector
            .observe(&goals, &contributions)
            .into_iter()
            .map(|c| c.goal_id)
            .collect();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    }
}
