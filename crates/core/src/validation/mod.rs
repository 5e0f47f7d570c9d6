//! Validation module - pure checks on goal, contribution and event input.

mod quantity;
mod rules;

pub use quantity::{parse_quantity, QuantityInput};
pub use rules::{
    compose_contributor_name, contributor_key, validate_contribution,
    validate_contribution_update, validate_contributor_name, validate_event,
    validate_event_update, validate_goal,
};
