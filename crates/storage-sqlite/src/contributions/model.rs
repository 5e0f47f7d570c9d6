//! Database models for contributions.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use eventbite_core::contributions::{Contribution, ContributionRecord};

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::contributions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ContributionDB {
    pub id: String,
    pub goal_id: String,
    pub contributor: String,
    pub quantity: i32,
    pub fulfilled: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::contributions)]
pub struct NewContributionDB {
    pub id: String,
    pub goal_id: String,
    pub contributor: String,
    pub quantity: i32,
    pub fulfilled: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<ContributionDB> for Contribution {
    fn from(db: ContributionDB) -> Self {
        Self {
            id: db.id,
            goal_id: db.goal_id,
            contributor: db.contributor,
            quantity: db.quantity,
            fulfilled: db.fulfilled,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl NewContributionDB {
    pub fn from_record(id: String, record: ContributionRecord, now: NaiveDateTime) -> Self {
        Self {
            id,
            goal_id: record.goal_id,
            contributor: record.contributor,
            quantity: record.quantity,
            fulfilled: false,
            created_at: now,
            updated_at: now,
        }
    }
}
