use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use eventbite_core::contributions::{Contribution, ContributionRecord, ContributionRepositoryTrait};
use eventbite_core::Result;

use super::model::{ContributionDB, NewContributionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{not_found_as, IntoCore};
use crate::schema::{contributions, goals};

pub struct ContributionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ContributionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ContributionRepositoryTrait for ContributionRepository {
    fn list_for_goal(&self, goal_id: &str) -> Result<Vec<Contribution>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = contributions::table
            .filter(contributions::goal_id.eq(goal_id))
            .select(ContributionDB::as_select())
            .order((contributions::created_at.asc(), contributions::id.asc()))
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Contribution::from).collect())
    }

    fn list_for_event(&self, event_id: &str) -> Result<Vec<Contribution>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = contributions::table
            .inner_join(goals::table)
            .filter(goals::event_id.eq(event_id))
            .select(ContributionDB::as_select())
            .order((contributions::created_at.asc(), contributions::id.asc()))
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Contribution::from).collect())
    }

    fn get_contribution(&self, contribution_id: &str) -> Result<Contribution> {
        let mut conn = get_connection(&self.pool)?;
        contributions::table
            .find(contribution_id)
            .select(ContributionDB::as_select())
            .first(&mut conn)
            .map(Contribution::from)
            .map_err(not_found_as("Contribution", contribution_id))
    }

    async fn insert_contribution(&self, record: ContributionRecord) -> Result<Contribution> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Contribution> {
                goals::table
                    .find(record.goal_id.as_str())
                    .select(goals::id)
                    .first::<String>(conn)
                    .map_err(not_found_as("Goal", &record.goal_id))?;

                let row = NewContributionDB::from_record(
                    Uuid::new_v4().to_string(),
                    record,
                    Utc::now().naive_utc(),
                );
                let inserted = diesel::insert_into(contributions::table)
                    .values(&row)
                    .returning(ContributionDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(inserted.into())
            })
            .await
    }

    async fn update_contribution(
        &self,
        contribution_id: String,
        contributor: String,
        quantity: i32,
    ) -> Result<Contribution> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Contribution> {
                let updated = diesel::update(contributions::table.find(contribution_id.as_str()))
                    .set((
                        contributions::contributor.eq(contributor),
                        contributions::quantity.eq(quantity),
                        contributions::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(ContributionDB::as_returning())
                    .get_result(conn)
                    .map_err(not_found_as("Contribution", &contribution_id))?;
                Ok(updated.into())
            })
            .await
    }

    async fn set_fulfilled(&self, contribution_id: String, fulfilled: bool) -> Result<Contribution> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Contribution> {
                let updated = diesel::update(contributions::table.find(contribution_id.as_str()))
                    .set((
                        contributions::fulfilled.eq(fulfilled),
                        contributions::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(ContributionDB::as_returning())
                    .get_result(conn)
                    .map_err(not_found_as("Contribution", &contribution_id))?;
                Ok(updated.into())
            })
            .await
    }

    async fn delete_contribution(&self, contribution_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let deleted = diesel::delete(contributions::table.find(contribution_id.as_str()))
                    .execute(conn)
                    .into_core()?;
                if deleted == 0 {
                    return Err(eventbite_core::Error::not_found(format!(
                        "Contribution {}",
                        contribution_id
                    )));
                }
                Ok(deleted)
            })
            .await
    }
}
