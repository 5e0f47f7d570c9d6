use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use eventbite_core::directory::{
    Event, EventRecord, EventRepositoryTrait, EventSnapshot, EventUpdate,
};
use eventbite_core::Result;

use super::model::{EventDB, NewEventDB};
use crate::contributions::ContributionDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{not_found_as, IntoCore, StorageError};
use crate::goals::GoalDB;
use crate::schema::{contributions, events, goals};

pub struct EventRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl EventRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn find(conn: &mut SqliteConnection, event_id: &str) -> Result<EventDB> {
        events::table
            .find(event_id)
            .select(EventDB::as_select())
            .first(conn)
            .map_err(not_found_as("Event", event_id))
    }

    /// Removes every contribution and goal of the event. Returns rows deleted.
    fn clear_plan(conn: &mut SqliteConnection, event_id: &str) -> Result<usize> {
        let goal_ids = goals::table
            .filter(goals::event_id.eq(event_id))
            .select(goals::id);
        let removed_contributions =
            diesel::delete(contributions::table.filter(contributions::goal_id.eq_any(goal_ids)))
                .execute(conn)
                .into_core()?;
        let removed_goals = diesel::delete(goals::table.filter(goals::event_id.eq(event_id)))
            .execute(conn)
            .into_core()?;
        Ok(removed_contributions + removed_goals)
    }
}

#[async_trait]
impl EventRepositoryTrait for EventRepository {
    fn list_events(&self) -> Result<Vec<Event>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = events::table
            .select(EventDB::as_select())
            .order((events::created_at.asc(), events::id.asc()))
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Event::from).collect())
    }

    fn get_event(&self, event_id: &str) -> Result<Event> {
        let mut conn = get_connection(&self.pool)?;
        Ok(Self::find(&mut conn, event_id)?.into())
    }

    fn get_password_hash(&self, event_id: &str) -> Result<String> {
        let mut conn = get_connection(&self.pool)?;
        Ok(Self::find(&mut conn, event_id)?.password_hash)
    }

    fn load_snapshot(&self, event_id: &str) -> Result<EventSnapshot> {
        let mut conn = get_connection(&self.pool)?;
        // One read transaction so the three reads see the same database state.
        conn.transaction::<_, StorageError, _>(|conn| {
            let event = Self::find(conn, event_id)?;
            let goal_rows = goals::table
                .filter(goals::event_id.eq(event_id))
                .select(GoalDB::as_select())
                .order((goals::created_at.asc(), goals::id.asc()))
                .load(conn)?;
            let contribution_rows = contributions::table
                .inner_join(goals::table)
                .filter(goals::event_id.eq(event_id))
                .select(ContributionDB::as_select())
                .order((contributions::created_at.asc(), contributions::id.asc()))
                .load(conn)?;

            Ok(EventSnapshot {
                event: event.into(),
                goals: goal_rows.into_iter().map(Into::into).collect(),
                contributions: contribution_rows.into_iter().map(Into::into).collect(),
            })
        })
        .map_err(Into::into)
    }

    async fn insert_event(&self, record: EventRecord) -> Result<Event> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Event> {
                let row = NewEventDB::from_record(
                    Uuid::new_v4().to_string(),
                    record,
                    Utc::now().naive_utc(),
                );
                let inserted = diesel::insert_into(events::table)
                    .values(&row)
                    .returning(EventDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(inserted.into())
            })
            .await
    }

    async fn update_event(&self, event_id: String, update: EventUpdate) -> Result<Event> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Event> {
                let updated = diesel::update(events::table.find(event_id.as_str()))
                    .set((
                        events::name.eq(update.name),
                        events::event_date.eq(update.event_date),
                        events::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(EventDB::as_returning())
                    .get_result(conn)
                    .map_err(not_found_as("Event", &event_id))?;
                Ok(updated.into())
            })
            .await
    }

    async fn delete_event(&self, event_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Self::find(conn, &event_id)?;
                let removed = Self::clear_plan(conn, &event_id)?;
                let deleted = diesel::delete(events::table.find(event_id.as_str()))
                    .execute(conn)
                    .into_core()?;
                Ok(removed + deleted)
            })
            .await
    }

    async fn reset_event(&self, event_id: String, name: String) -> Result<Event> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Event> {
                Self::find(conn, &event_id)?;
                Self::clear_plan(conn, &event_id)?;
                let updated = diesel::update(events::table.find(event_id.as_str()))
                    .set((
                        events::name.eq(name),
                        events::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(EventDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(updated.into())
            })
            .await
    }
}
