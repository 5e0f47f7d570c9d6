//! Input checks applied before anything reaches persistence.
//!
//! All functions here are pure. A failure carries a human-readable reason
//! that can be shown to the submitter as is.

use regex::Regex;
use std::sync::LazyLock;

use super::quantity::parse_quantity;
use crate::contributions::{ContributionUpdate, NewContribution};
use crate::directory::{EventUpdate, NewEvent};
use crate::errors::{Error, Result, ValidationError};
use crate::goals::NewGoal;

/// Letters of the Latin script and whitespace. Accents may be precomposed or
/// follow their letter as combining marks.
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\p{Latin}\p{M}*|\s)+$").expect("Invalid regex pattern")
});

pub fn validate_goal(input: &NewGoal) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(ValidationError::MissingField("name".to_string()).into());
    }
    parse_quantity(input.target.as_ref(), "target")?;
    if let Some(unit) = &input.unit {
        if unit.chars().count() > 32 {
            return Err(Error::invalid_input("Unit label is too long"));
        }
    }
    Ok(())
}

/// Checks one name part at a time so the reason names the offending field.
pub fn validate_contributor_name(first: &str, last: &str) -> Result<()> {
    for (field, value) in [("firstName", first), ("lastName", last)] {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(field.to_string()).into());
        }
        if !NAME_PATTERN.is_match(value) {
            return Err(Error::invalid_input(format!(
                "{} may only contain letters and spaces",
                field
            )));
        }
    }
    Ok(())
}

pub fn validate_contribution(input: &NewContribution) -> Result<()> {
    if input.goal_id.trim().is_empty() {
        return Err(ValidationError::MissingField("goalId".to_string()).into());
    }
    validate_contributor_name(&input.first_name, &input.last_name)?;
    parse_quantity(input.quantity.as_ref(), "quantity")?;
    Ok(())
}

pub fn validate_contribution_update(input: &ContributionUpdate) -> Result<()> {
    validate_contributor_name(&input.first_name, &input.last_name)?;
    parse_quantity(input.quantity.as_ref(), "quantity")?;
    Ok(())
}

pub fn validate_event(input: &NewEvent) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(ValidationError::MissingField("name".to_string()).into());
    }
    if input.password.trim().is_empty() {
        return Err(ValidationError::MissingField("password".to_string()).into());
    }
    Ok(())
}

pub fn validate_event_update(input: &EventUpdate) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(ValidationError::MissingField("name".to_string()).into());
    }
    Ok(())
}

/// Stored form of a contributor's name: trimmed parts, inner runs of
/// whitespace collapsed, joined by one space.
pub fn compose_contributor_name(first: &str, last: &str) -> String {
    first
        .split_whitespace()
        .chain(last.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Key used to detect the same person pledging twice.
pub fn contributor_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
