//! Admission controller - capacity and duplicate-contributor checks.

mod admission_controller;

pub use admission_controller::{admit_contribution, AdmittedContribution, ContributionCandidate};
