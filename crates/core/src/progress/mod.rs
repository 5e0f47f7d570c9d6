//! Aggregation engine - goal totals, percentages and completion.

mod progress_calculator;
mod progress_model;

pub use progress_calculator::{compute_progress, goals_with_progress, summarize_event};
pub use progress_model::{EventSummary, GoalProgress, GoalWithProgress};
