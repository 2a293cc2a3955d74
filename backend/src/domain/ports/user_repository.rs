//! Driven port for user account persistence adapters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{User, UserId};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// Store connection could not be established.
    #[error("user store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query { message: String },
    /// A store uniqueness constraint rejected the write.
    #[error("user store uniqueness violated: {message}")]
    Conflict { message: String },
}

impl UserRepositoryError {
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

/// Role filter applied to account listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRoleFilter {
    All,
    Residents,
    Drivers,
}

/// Driven port for user account storage.
///
/// Mutations run inside one store transaction each; a failed write leaves no
/// partial state behind.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new account together with its specialization record.
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch an account by login name.
    async fn find_by_username(&self, username: &str)
        -> Result<Option<User>, UserRepositoryError>;

    /// List accounts matching the role filter; order unspecified.
    async fn list(&self, filter: UserRoleFilter) -> Result<Vec<User>, UserRepositoryError>;

    /// Overwrite a driver's reported location and its timestamp.
    async fn set_driver_location(
        &self,
        id: &UserId,
        location: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), UserRepositoryError>;

    /// Delete an account; the store cascades to dependent records. Returns
    /// whether a record existed.
    async fn delete(&self, id: &UserId) -> Result<bool, UserRepositoryError>;
}
