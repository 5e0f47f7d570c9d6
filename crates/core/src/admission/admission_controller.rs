//! Admission of pledges against a goal.
//!
//! Checks run against whatever snapshot of contributions the caller passes
//! in. Two clients racing for the last units of a goal can both be admitted;
//! the resulting over-subscription is reported as 100% and is not an error.

use log::warn;

use crate::contributions::{Contribution, ContributionRecord};
use crate::errors::{AdmissionError, Error, Result};
use crate::goals::Goal;
use crate::progress::compute_progress;
use crate::validation::contributor_key;

/// A pledge proposed for a goal, either brand new or replacing an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionCandidate {
    pub goal_id: String,
    pub contributor: String,
    pub quantity: i32,
    /// Id of the contribution being edited, if any
    pub replaces: Option<String>,
}

impl ContributionCandidate {
    pub fn new(goal_id: impl Into<String>, contributor: impl Into<String>, quantity: i32) -> Self {
        Self {
            goal_id: goal_id.into(),
            contributor: contributor.into(),
            quantity,
            replaces: None,
        }
    }

    pub fn edit(
        contribution_id: impl Into<String>,
        goal_id: impl Into<String>,
        contributor: impl Into<String>,
        quantity: i32,
    ) -> Self {
        Self {
            replaces: Some(contribution_id.into()),
            ..Self::new(goal_id, contributor, quantity)
        }
    }

    pub fn is_edit(&self) -> bool {
        self.replaces.is_some()
    }
}

/// A candidate that passed admission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmittedContribution {
    pub goal_id: String,
    pub contributor: String,
    pub quantity: i32,
    pub replaces: Option<String>,
}

impl AdmittedContribution {
    pub fn into_record(self) -> ContributionRecord {
        ContributionRecord {
            goal_id: self.goal_id,
            contributor: self.contributor,
            quantity: self.quantity,
        }
    }
}

/// Decides whether `candidate` may be recorded against `goal`.
///
/// New pledges are refused once the goal is complete and when the same
/// contributor (case- and whitespace-insensitive) already pledged to it.
/// Edits of an existing pledge skip the capacity check and only have to refer
/// to a contribution of this goal; a rename must not collide with another
/// contributor on it. Quantity raised past the target through an edit is not
/// capped.
pub fn admit_contribution(
    goal: &Goal,
    existing: &[Contribution],
    candidate: ContributionCandidate,
) -> Result<AdmittedContribution> {
    if candidate.goal_id != goal.id {
        return Err(Error::invalid_input(format!(
            "Contribution targets goal '{}' but was submitted for '{}'",
            candidate.goal_id, goal.id
        )));
    }
    if candidate.quantity <= 0 {
        return Err(Error::invalid_input("quantity must be greater than zero"));
    }

    let on_goal: Vec<&Contribution> = existing.iter().filter(|c| c.goal_id == goal.id).collect();

    match &candidate.replaces {
        Some(contribution_id) => {
            if !on_goal.iter().any(|c| &c.id == contribution_id) {
                return Err(Error::invalid_input(format!(
                    "Contribution '{}' does not belong to goal '{}'",
                    contribution_id, goal.name
                )));
            }

            let key = contributor_key(&candidate.contributor);
            if on_goal
                .iter()
                .any(|c| &c.id != contribution_id && contributor_key(&c.contributor) == key)
            {
                warn!(
                    "Rejected rename of contribution {} to '{}': name taken on goal '{}'",
                    contribution_id, candidate.contributor, goal.name
                );
                return Err(AdmissionError::DuplicateContributor {
                    goal: goal.name.clone(),
                    contributor: candidate.contributor,
                }
                .into());
            }
        }
        None => {
            let progress = compute_progress(goal, existing);
            if progress.is_complete {
                warn!(
                    "Rejected pledge from '{}': goal '{}' already at {}/{}",
                    candidate.contributor, goal.name, progress.total, goal.target
                );
                return Err(AdmissionError::CapacityExceeded {
                    goal: goal.name.clone(),
                    total: progress.total,
                    target: goal.target,
                }
                .into());
            }

            let key = contributor_key(&candidate.contributor);
            if on_goal.iter().any(|c| contributor_key(&c.contributor) == key) {
                warn!(
                    "Rejected duplicate pledge from '{}' on goal '{}'",
                    candidate.contributor, goal.name
                );
                return Err(AdmissionError::DuplicateContributor {
                    goal: goal.name.clone(),
                    contributor: candidate.contributor,
                }
                .into());
            }
        }
    }

    Ok(AdmittedContribution {
        goal_id: candidate.goal_id,
        contributor: candidate.contributor,
        quantity: candidate.quantity,
        replaces: candidate.replaces,
    })
}
