//! Event directory domain models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::contributions::Contribution;
use crate::goals::Goal;
use crate::progress::{EventSummary, GoalWithProgress};

/// A planned gathering that owns its goals and contributions.
///
/// The admin password is never part of this model; only its hash is stored
/// and only the access gate reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub event_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating an event
#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    #[serde(default)]
    pub name: String,
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for NewEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewEvent")
            .field("name", &self.name)
            .field("event_date", &self.event_date)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Replacement of an event's configuration
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    #[serde(default)]
    pub name: String,
    pub event_date: Option<NaiveDate>,
}

/// Validated event ready to be persisted
#[derive(Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub name: String,
    pub event_date: Option<NaiveDate>,
    pub password_hash: String,
}

impl fmt::Debug for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRecord")
            .field("name", &self.name)
            .field("event_date", &self.event_date)
            .finish_non_exhaustive()
    }
}

/// Everything a client needs to render an event, read in one go.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventSnapshot {
    pub event: Event,
    pub goals: Vec<Goal>,
    pub contributions: Vec<Contribution>,
}

/// An event with progress computed for each of its goals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventBoard {
    pub event: Event,
    pub goals: Vec<GoalWithProgress>,
    pub summary: EventSummary,
}

impl EventSnapshot {
    pub fn into_board(self) -> EventBoard {
        let summary = crate::progress::summarize_event(&self.goals, &self.contributions);
        let goals = crate::progress::goals_with_progress(self.goals, &self.contributions);
        EventBoard {
            event: self.event,
            goals,
            summary,
        }
    }
}
