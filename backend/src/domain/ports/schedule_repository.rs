//! Driven port for schedule persistence adapters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Schedule, UserId};

/// Persistence errors raised by schedule repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleRepositoryError {
    /// Store connection could not be established.
    #[error("schedule store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("schedule store query failed: {message}")]
    Query { message: String },
}

impl ScheduleRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Driven port for schedule storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Persist a new schedule.
    async fn insert(&self, schedule: &Schedule) -> Result<(), ScheduleRepositoryError>;

    /// Fetch a schedule by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Schedule>, ScheduleRepositoryError>;

    /// Case-insensitive substring match on street names; order unspecified.
    async fn find_by_street_fragment(
        &self,
        fragment: &str,
    ) -> Result<Vec<Schedule>, ScheduleRepositoryError>;

    /// All schedules belonging to a driver; order unspecified.
    async fn find_by_driver(
        &self,
        driver_id: &UserId,
    ) -> Result<Vec<Schedule>, ScheduleRepositoryError>;

    /// Schedules starting at or after the given instant, ascending by start.
    async fn find_starting_at_or_after(
        &self,
        instant: DateTime<Utc>,
    ) -> Result<Vec<Schedule>, ScheduleRepositoryError>;
}
