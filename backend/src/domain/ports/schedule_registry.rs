//! Driving port for the schedule registry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Error, Schedule, UserId};

/// Request to publish a street visit.
#[derive(Debug, Clone)]
pub struct CreateScheduleRequest {
    pub driver_id: UserId,
    pub street: String,
    pub scheduled_start_time: DateTime<Utc>,
    pub scheduled_end_time: DateTime<Utc>,
}

/// Driving port exposing schedule operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleRegistry: Send + Sync {
    /// Publish a visit. Not-found unless the referenced account exists and
    /// is a driver. The window bounds are stored as given.
    async fn create_schedule(&self, request: CreateScheduleRequest) -> Result<Schedule, Error>;

    /// Fetch a schedule by identifier.
    async fn get_schedule(&self, id: Uuid) -> Result<Option<Schedule>, Error>;

    /// Case-insensitive substring match on street names.
    async fn schedules_for_street(&self, street: &str) -> Result<Vec<Schedule>, Error>;

    /// All schedules belonging to a driver.
    async fn schedules_for_driver(&self, driver_id: &UserId) -> Result<Vec<Schedule>, Error>;

    /// Schedules whose start lies at or after the current time, ascending.
    async fn upcoming_schedules(&self) -> Result<Vec<Schedule>, Error>;
}
