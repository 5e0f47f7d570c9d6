//! Database models for goals.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use eventbite_core::goals::{Goal, GoalCategory, GoalPriority, GoalRecord};

/// Database model for goals. Category and priority are stored by their
/// wire names; unknown values read back as the defaults.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalDB {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub target: i32,
    pub unit: String,
    pub category: String,
    pub priority: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
pub struct NewGoalDB {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub target: i32,
    pub unit: String,
    pub category: String,
    pub priority: String,
    pub created_at: NaiveDateTime,
}

impl From<GoalDB> for Goal {
    fn from(db: GoalDB) -> Self {
        Self {
            id: db.id,
            event_id: db.event_id,
            name: db.name,
            target: db.target,
            unit: db.unit,
            category: GoalCategory::parse(&db.category),
            priority: GoalPriority::parse(&db.priority),
            created_at: db.created_at,
        }
    }
}

impl NewGoalDB {
    pub fn from_record(id: String, record: GoalRecord, now: NaiveDateTime) -> Self {
        Self {
            id,
            event_id: record.event_id,
            name: record.name,
            target: record.target,
            unit: record.unit,
            category: record.category.as_str().to_string(),
            priority: record.priority.as_str().to_string(),
            created_at: now,
        }
    }
}
