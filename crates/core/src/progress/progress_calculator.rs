//! Aggregation of contributions into goal progress.
//!
//! Everything here is recomputed from the current contribution set on each
//! refresh and holds no state of its own.

use std::collections::HashSet;

use super::progress_model::{EventSummary, GoalProgress, GoalWithProgress};
use crate::contributions::Contribution;
use crate::goals::Goal;

/// Computes total, clamped percentage and completion for one goal.
///
/// Contributions belonging to other goals are ignored, so callers may pass
/// the whole contribution set of an event. Over-subscription is allowed and
/// reports 100%.
pub fn compute_progress(goal: &Goal, contributions: &[Contribution]) -> GoalProgress {
    let total: i64 = contributions
        .iter()
        .filter(|c| c.goal_id == goal.id)
        .map(|c| i64::from(c.quantity))
        .sum();
    let target = i64::from(goal.target);

    let percentage = if target > 0 {
        (total as f64 / target as f64 * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    GoalProgress {
        goal_id: goal.id.clone(),
        total,
        percentage,
        is_complete: target > 0 && total >= target,
        remaining: (target - total).max(0),
    }
}

/// Pairs each goal with its progress and its own contributions, keeping goal order.
pub fn goals_with_progress(goals: Vec<Goal>, contributions: &[Contribution]) -> Vec<GoalWithProgress> {
    goals
        .into_iter()
        .map(|goal| {
            let progress = compute_progress(&goal, contributions);
            let own = contributions
                .iter()
                .filter(|c| c.goal_id == goal.id)
                .cloned()
                .collect();
            GoalWithProgress {
                goal,
                progress,
                contributions: own,
            }
        })
        .collect()
}

pub fn summarize_event(goals: &[Goal], contributions: &[Contribution]) -> EventSummary {
    let goal_ids: HashSet<&str> = goals.iter().map(|g| g.id.as_str()).collect();
    EventSummary {
        goal_count: goals.len(),
        completed_goals: goals
            .iter()
            .filter(|g| compute_progress(g, contributions).is_complete)
            .count(),
        contribution_count: contributions
            .iter()
            .filter(|c| goal_ids.contains(c.goal_id.as_str()))
            .count(),
    }
}
