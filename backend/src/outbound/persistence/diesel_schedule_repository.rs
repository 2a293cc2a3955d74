//! PostgreSQL-backed `ScheduleRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ScheduleRepository, ScheduleRepositoryError};
use crate::domain::schedule::{Schedule, ScheduleDraft};
use crate::domain::UserId;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewScheduleRow, ScheduleRow};
use super::pool::{DbPool, PoolError};
use super::schema::schedules;

/// Diesel-backed implementation of the schedule repository port.
#[derive(Clone)]
pub struct DieselScheduleRepository {
    pool: DbPool,
}

impl DieselScheduleRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_schedule_pool_error(error: PoolError) -> ScheduleRepositoryError {
    map_pool_error(error, ScheduleRepositoryError::connection)
}

fn map_schedule_diesel_error(error: diesel::result::Error) -> ScheduleRepositoryError {
    // Schedules carry no uniqueness rules, so conflicts degrade to queries.
    map_diesel_error(
        error,
        ScheduleRepositoryError::query,
        ScheduleRepositoryError::query,
        ScheduleRepositoryError::connection,
    )
}

/// Convert a database row into a domain schedule.
fn row_to_schedule(row: ScheduleRow) -> Schedule {
    Schedule::from_parts(
        row.id,
        ScheduleDraft {
            driver_id: UserId::from_uuid(row.driver_id),
            street: row.street,
            scheduled_start_time: row.scheduled_start_time,
            scheduled_end_time: row.scheduled_end_time,
        },
    )
}

#[async_trait]
impl ScheduleRepository for DieselScheduleRepository {
    async fn insert(&self, schedule: &Schedule) -> Result<(), ScheduleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_schedule_pool_error)?;

        let row = NewScheduleRow {
            id: schedule.id(),
            driver_id: *schedule.driver_id().as_uuid(),
            street: schedule.street(),
            scheduled_start_time: schedule.scheduled_start_time(),
            scheduled_end_time: schedule.scheduled_end_time(),
        };

        diesel::insert_into(schedules::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_schedule_diesel_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Schedule>, ScheduleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_schedule_pool_error)?;

        let row = schedules::table
            .find(id)
            .select(ScheduleRow::as_select())
            .first::<ScheduleRow>(&mut conn)
            .await
            .optional()
            .map_err(map_schedule_diesel_error)?;

        Ok(row.map(row_to_schedule))
    }

    async fn find_by_street_fragment(
        &self,
        fragment: &str,
    ) -> Result<Vec<Schedule>, ScheduleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_schedule_pool_error)?;

        let pattern = format!("%{fragment}%");
        let rows: Vec<ScheduleRow> = schedules::table
            .filter(schedules::street.ilike(pattern))
            .select(ScheduleRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_schedule_diesel_error)?;

        Ok(rows.into_iter().map(row_to_schedule).collect())
    }

    async fn find_by_driver(
        &self,
        driver_id: &UserId,
    ) -> Result<Vec<Schedule>, ScheduleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_schedule_pool_error)?;

        let rows: Vec<ScheduleRow> = schedules::table
            .filter(schedules::driver_id.eq(driver_id.as_uuid()))
            .select(ScheduleRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_schedule_diesel_error)?;

        Ok(rows.into_iter().map(row_to_schedule).collect())
    }

    async fn find_starting_at_or_after(
        &self,
        instant: DateTime<Utc>,
    ) -> Result<Vec<Schedule>, ScheduleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_schedule_pool_error)?;

        let rows: Vec<ScheduleRow> = schedules::table
            .filter(schedules::scheduled_start_time.ge(instant))
            .order(schedules::scheduled_start_time.asc())
            .select(ScheduleRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_schedule_diesel_error)?;

        Ok(rows.into_iter().map(row_to_schedule).collect())
    }
}
