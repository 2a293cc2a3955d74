//! Driving port for the user directory.

use async_trait::async_trait;

use crate::domain::ports::UserRoleFilter;
use crate::domain::{Error, User, UserId};

/// Typed specialization payload for account creation.
///
/// The variant selects the role; its fields are the role's required
/// attributes, so a mismatched payload is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewUserProfile {
    Resident {
        home_address: String,
    },
    Driver {
        vehicle_type: String,
        license_plate: String,
    },
}

/// Request to register a new account.
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub name: String,
    pub profile: NewUserProfile,
}

/// Driving port exposing account operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Register an account: validate the role-specific fields, hash the
    /// password, and persist base plus specialization records in one
    /// transaction. Duplicate username or email surfaces as a conflict.
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error>;

    /// Fetch an account by identifier.
    async fn get_user(&self, id: &UserId) -> Result<Option<User>, Error>;

    /// Fetch an account by login name.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, Error>;

    /// List accounts matching the role filter; order unspecified.
    async fn list_users(&self, filter: UserRoleFilter) -> Result<Vec<User>, Error>;

    /// Verify credentials. Unknown username and wrong password both produce
    /// the same generic unauthorized error.
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, Error>;

    /// Delete an account; the store cascades to owned schedules and stop
    /// requests. Not-found when no such account exists.
    async fn delete_user(&self, id: &UserId) -> Result<(), Error>;
}
