//! Database models for events.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use eventbite_core::directory::{Event, EventRecord};

/// Database model for events. `password_hash` never leaves this crate
/// except through `get_password_hash`.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EventDB {
    pub id: String,
    pub name: String,
    pub event_date: Option<NaiveDate>,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::events)]
pub struct NewEventDB {
    pub id: String,
    pub name: String,
    pub event_date: Option<NaiveDate>,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<EventDB> for Event {
    fn from(db: EventDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            event_date: db.event_date,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl NewEventDB {
    pub fn from_record(id: String, record: EventRecord, now: NaiveDateTime) -> Self {
        Self {
            id,
            name: record.name,
            event_date: record.event_date,
            password_hash: record.password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}
