//! Shared Diesel error mapping for the repository adapters.

use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map Diesel error variants into conflict/query/connection constructors.
///
/// Unique-constraint violations carry the constraint name so callers can
/// tell which uniqueness rule rejected the write.
pub(crate) fn map_diesel_error<E, K, Q, C>(
    error: diesel::result::Error,
    conflict: K,
    query: Q,
    connection: C,
) -> E
where
    K: FnOnce(String) -> E,
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            let constraint = info.constraint_name().unwrap_or("unique constraint");
            conflict(format!("{constraint} violated"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection closed".to_owned())
        }
        DieselError::NotFound => query("record not found".to_owned()),
        _ => query("database error".to_owned()),
    }
}
