//! Contributions module - pledges against goals.

mod contributions_model;
mod contributions_service;
mod contributions_traits;

pub use contributions_model::{
    Contribution, ContributionRecord, ContributionUpdate, NewContribution,
};
pub use contributions_service::ContributionService;
pub use contributions_traits::{ContributionRepositoryTrait, ContributionServiceTrait};
