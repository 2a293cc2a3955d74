//! Shared mapping from driven-port errors to the domain error type.
//!
//! Connection failures become `service_unavailable` so callers can retry
//! later; query failures become `internal_error`; uniqueness conflicts keep
//! their conflict identity.

use crate::domain::ports::{
    ScheduleRepositoryError, StopRequestRepositoryError, UserRepositoryError,
};
use crate::domain::Error;

/// Map user store errors to domain errors.
pub(crate) fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
        UserRepositoryError::Conflict { message } => Error::conflict(message),
    }
}

/// Map schedule store errors to domain errors.
pub(crate) fn map_schedule_repository_error(error: ScheduleRepositoryError) -> Error {
    match error {
        ScheduleRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("schedule store unavailable: {message}"))
        }
        ScheduleRepositoryError::Query { message } => {
            Error::internal(format!("schedule store error: {message}"))
        }
    }
}

/// Map stop request store errors to domain errors.
pub(crate) fn map_stop_request_repository_error(error: StopRequestRepositoryError) -> Error {
    match error {
        StopRequestRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("stop request store unavailable: {message}"))
        }
        StopRequestRepositoryError::Query { message } => {
            Error::internal(format!("stop request store error: {message}"))
        }
        StopRequestRepositoryError::Conflict { message } => Error::conflict(message),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case(UserRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(UserRepositoryError::conflict("username taken"), ErrorCode::Conflict)]
    fn user_errors_map_to_expected_codes(
        #[case] error: UserRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(map_user_repository_error(error).code(), expected);
    }

    #[rstest]
    #[case(
        StopRequestRepositoryError::conflict("duplicate request"),
        ErrorCode::Conflict
    )]
    #[case(
        StopRequestRepositoryError::connection("refused"),
        ErrorCode::ServiceUnavailable
    )]
    fn stop_request_errors_map_to_expected_codes(
        #[case] error: StopRequestRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(map_stop_request_repository_error(error).code(), expected);
    }

    #[rstest]
    fn schedule_query_errors_stay_internal() {
        let mapped = map_schedule_repository_error(ScheduleRepositoryError::query("bad sql"));
        assert_eq!(mapped.code(), ErrorCode::InternalError);
        assert!(mapped.message().contains("bad sql"));
    }
}
