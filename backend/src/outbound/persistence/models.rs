//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. They exist solely to satisfy Diesel's type requirements for
//! queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{drivers, residents, schedules, stop_requests, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub name: String,
    pub user_type: String,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new account records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub email: &'a str,
    pub name: &'a str,
    pub user_type: &'a str,
}

/// Row struct for reading from the residents table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = residents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ResidentRow {
    #[expect(dead_code, reason = "key column read for join completeness")]
    pub user_id: Uuid,
    pub home_address: String,
}

/// Insertable struct for creating resident specialization records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = residents)]
pub(crate) struct NewResidentRow<'a> {
    pub user_id: Uuid,
    pub home_address: &'a str,
}

/// Row struct for reading from the drivers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = drivers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DriverRow {
    #[expect(dead_code, reason = "key column read for join completeness")]
    pub user_id: Uuid,
    pub vehicle_type: String,
    pub license_plate: String,
    pub current_status: String,
    pub current_location: Option<String>,
    pub location_updated_at: Option<DateTime<Utc>>,
}

/// Insertable struct for creating driver specialization records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = drivers)]
pub(crate) struct NewDriverRow<'a> {
    pub user_id: Uuid,
    pub vehicle_type: &'a str,
    pub license_plate: &'a str,
    pub current_status: &'a str,
    pub current_location: Option<&'a str>,
    pub location_updated_at: Option<DateTime<Utc>>,
}

/// Row struct for reading from the schedules table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = schedules)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ScheduleRow {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub street: String,
    pub scheduled_start_time: DateTime<Utc>,
    pub scheduled_end_time: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating schedule records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schedules)]
pub(crate) struct NewScheduleRow<'a> {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub street: &'a str,
    pub scheduled_start_time: DateTime<Utc>,
    pub scheduled_end_time: DateTime<Utc>,
}

/// Row struct for reading from the stop_requests table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = stop_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StopRequestRow {
    pub id: Uuid,
    pub resident_id: Uuid,
    pub schedule_id: Uuid,
    pub request_time: DateTime<Utc>,
    pub status: String,
}

/// Insertable struct for creating stop request records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = stop_requests)]
pub(crate) struct NewStopRequestRow<'a> {
    pub id: Uuid,
    pub resident_id: Uuid,
    pub schedule_id: Uuid,
    pub request_time: DateTime<Utc>,
    pub status: &'a str,
}
