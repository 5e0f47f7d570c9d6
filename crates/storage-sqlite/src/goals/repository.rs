use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use eventbite_core::goals::{Goal, GoalRecord, GoalRepositoryTrait};
use eventbite_core::Result;

use super::model::{GoalDB, NewGoalDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{not_found_as, IntoCore};
use crate::schema::{contributions, events, goals};

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn list_goals(&self, event_id: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals::table
            .filter(goals::event_id.eq(event_id))
            .select(GoalDB::as_select())
            .order((goals::created_at.asc(), goals::id.asc()))
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Goal::from).collect())
    }

    fn get_goal(&self, goal_id: &str) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        goals::table
            .find(goal_id)
            .select(GoalDB::as_select())
            .first(&mut conn)
            .map(Goal::from)
            .map_err(not_found_as("Goal", goal_id))
    }

    async fn insert_goal(&self, record: GoalRecord) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                // The owning event may have been deleted since the caller checked.
                events::table
                    .find(record.event_id.as_str())
                    .select(events::id)
                    .first::<String>(conn)
                    .map_err(not_found_as("Event", &record.event_id))?;

                let row = NewGoalDB::from_record(
                    Uuid::new_v4().to_string(),
                    record,
                    Utc::now().naive_utc(),
                );
                let inserted = diesel::insert_into(goals::table)
                    .values(&row)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(inserted.into())
            })
            .await
    }

    async fn delete_goal(&self, goal_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let removed =
                    diesel::delete(contributions::table.filter(contributions::goal_id.eq(goal_id.as_str())))
                        .execute(conn)
                        .into_core()?;
                let deleted = diesel::delete(goals::table.find(goal_id.as_str()))
                    .execute(conn)
                    .into_core()?;
                if deleted == 0 {
                    return Err(eventbite_core::Error::not_found(format!("Goal {}", goal_id)));
                }
                Ok(removed + deleted)
            })
            .await
    }
}
