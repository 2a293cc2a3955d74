//! PostgreSQL-backed `StopRequestRepository` implementation using Diesel ORM.
//!
//! The `stop_requests` table carries a unique index over the
//! (resident, schedule) pair; its violation surfaces as the port's conflict
//! error, which closes the duplicate-request race between concurrent
//! callers.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{StopRequestRepository, StopRequestRepositoryError};
use crate::domain::stop_request::{StopRequest, StopRequestStatus};
use crate::domain::UserId;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewStopRequestRow, StopRequestRow};
use super::pool::{DbPool, PoolError};
use super::schema::stop_requests;

/// Diesel-backed implementation of the stop request repository port.
#[derive(Clone)]
pub struct DieselStopRequestRepository {
    pool: DbPool,
}

impl DieselStopRequestRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_stop_request_pool_error(error: PoolError) -> StopRequestRepositoryError {
    map_pool_error(error, StopRequestRepositoryError::connection)
}

fn map_stop_request_diesel_error(error: diesel::result::Error) -> StopRequestRepositoryError {
    map_diesel_error(
        error,
        StopRequestRepositoryError::conflict,
        StopRequestRepositoryError::query,
        StopRequestRepositoryError::connection,
    )
}

/// Convert a database row into a domain stop request.
fn row_to_stop_request(row: StopRequestRow) -> Result<StopRequest, StopRequestRepositoryError> {
    let status: StopRequestStatus = row
        .status
        .parse()
        .map_err(|err: String| StopRequestRepositoryError::query(err))?;

    Ok(StopRequest::from_parts(
        row.id,
        UserId::from_uuid(row.resident_id),
        row.schedule_id,
        row.request_time,
        status,
    ))
}

#[async_trait]
impl StopRequestRepository for DieselStopRequestRepository {
    async fn insert(&self, request: &StopRequest) -> Result<(), StopRequestRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(map_stop_request_pool_error)?;

        let row = NewStopRequestRow {
            id: request.id(),
            resident_id: *request.resident_id().as_uuid(),
            schedule_id: request.schedule_id(),
            request_time: request.request_time(),
            status: request.status().as_str(),
        };

        diesel::insert_into(stop_requests::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_stop_request_diesel_error)
    }

    async fn find_by_resident(
        &self,
        resident_id: &UserId,
    ) -> Result<Vec<StopRequest>, StopRequestRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(map_stop_request_pool_error)?;

        let rows: Vec<StopRequestRow> = stop_requests::table
            .filter(stop_requests::resident_id.eq(resident_id.as_uuid()))
            .select(StopRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_stop_request_diesel_error)?;

        rows.into_iter().map(row_to_stop_request).collect()
    }

    async fn find_by_schedule(
        &self,
        schedule_id: Uuid,
    ) -> Result<Vec<StopRequest>, StopRequestRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(map_stop_request_pool_error)?;

        let rows: Vec<StopRequestRow> = stop_requests::table
            .filter(stop_requests::schedule_id.eq(schedule_id))
            .select(StopRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_stop_request_diesel_error)?;

        rows.into_iter().map(row_to_stop_request).collect()
    }

    async fn find_by_resident_and_schedule(
        &self,
        resident_id: &UserId,
        schedule_id: Uuid,
    ) -> Result<Option<StopRequest>, StopRequestRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(map_stop_request_pool_error)?;

        let row = stop_requests::table
            .filter(stop_requests::resident_id.eq(resident_id.as_uuid()))
            .filter(stop_requests::schedule_id.eq(schedule_id))
            .select(StopRequestRow::as_select())
            .first::<StopRequestRow>(&mut conn)
            .await
            .optional()
            .map_err(map_stop_request_diesel_error)?;

        row.map(row_to_stop_request).transpose()
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: StopRequestStatus,
    ) -> Result<Option<StopRequest>, StopRequestRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(map_stop_request_pool_error)?;

        let row = diesel::update(stop_requests::table.find(id))
            .set(stop_requests::status.eq(status.as_str()))
            .returning(StopRequestRow::as_returning())
            .get_result::<StopRequestRow>(&mut conn)
            .await
            .optional()
            .map_err(map_stop_request_diesel_error)?;

        row.map(row_to_stop_request).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion and error mapping.

    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    fn row(status: &str) -> StopRequestRow {
        StopRequestRow {
            id: Uuid::new_v4(),
            resident_id: Uuid::new_v4(),
            schedule_id: Uuid::new_v4(),
            request_time: Utc::now(),
            status: status.to_owned(),
        }
    }

    #[rstest]
    #[case("requested", StopRequestStatus::Requested)]
    #[case("completed", StopRequestStatus::Completed)]
    fn rows_convert_with_parsed_status(
        #[case] label: &str,
        #[case] expected: StopRequestStatus,
    ) {
        let request = row_to_stop_request(row(label)).expect("valid conversion");
        assert_eq!(request.status(), expected);
    }

    #[rstest]
    fn unknown_status_labels_fail_conversion() {
        let error = row_to_stop_request(row("cancelled")).expect_err("must fail");
        assert!(matches!(error, StopRequestRepositoryError::Query { .. }));
    }

    #[rstest]
    fn unique_violations_surface_as_conflicts() {
        let info = Box::new("duplicate key value violates unique constraint".to_owned());
        let mapped = map_stop_request_diesel_error(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            info,
        ));
        assert!(matches!(
            mapped,
            StopRequestRepositoryError::Conflict { .. }
        ));
    }
}
