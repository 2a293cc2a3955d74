//! Driven port for stop request persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{StopRequest, StopRequestStatus, UserId};

/// Persistence errors raised by stop request repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StopRequestRepositoryError {
    /// Store connection could not be established.
    #[error("stop request store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("stop request store query failed: {message}")]
    Query { message: String },
    /// The (resident, schedule) uniqueness constraint rejected the write.
    #[error("stop request store uniqueness violated: {message}")]
    Conflict { message: String },
}

impl StopRequestRepositoryError {
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

    /// Create a conflict error with the given message.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

/// Driven port for stop request storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StopRequestRepository: Send + Sync {
    /// Persist a new stop request. The store-level unique constraint on the
    /// (resident, schedule) pair surfaces as [`StopRequestRepositoryError::Conflict`],
    /// closing the race between concurrent duplicate requests.
    async fn insert(&self, request: &StopRequest) -> Result<(), StopRequestRepositoryError>;

    /// All requests filed by a resident; order unspecified.
    async fn find_by_resident(
        &self,
        resident_id: &UserId,
    ) -> Result<Vec<StopRequest>, StopRequestRepositoryError>;

    /// All requests against a schedule; order unspecified.
    async fn find_by_schedule(
        &self,
        schedule_id: Uuid,
    ) -> Result<Vec<StopRequest>, StopRequestRepositoryError>;

    /// The request a resident holds against a schedule, if any.
    async fn find_by_resident_and_schedule(
        &self,
        resident_id: &UserId,
        schedule_id: Uuid,
    ) -> Result<Option<StopRequest>, StopRequestRepositoryError>;

    /// Overwrite a request's status; returns the updated record, or `None`
    /// when no such request exists.
    async fn set_status(
        &self,
        id: Uuid,
        status: StopRequestStatus,
    ) -> Result<Option<StopRequest>, StopRequestRepositoryError>;
}
