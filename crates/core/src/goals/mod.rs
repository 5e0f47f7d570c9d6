//! Goals module - supply items with a target quantity.

mod goals_model;
mod goals_service;
mod goals_traits;

pub use goals_model::{Goal, GoalCategory, GoalPriority, GoalRecord, NewGoal};
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
