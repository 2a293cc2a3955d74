//! Request field parsing helpers shared by the HTTP handlers.

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, UserId};

/// Field label carried into validation error details.
#[derive(Debug, Clone, Copy)]
pub struct FieldName(&'static str);

impl FieldName {
    /// Wrap a camelCase field label.
    pub fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn error(self, message: impl Into<String>) -> Error {
        Error::invalid_request(message).with_details(json!({ "field": self.0 }))
    }
}

/// Parse a UUID path or body value.
pub fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| field.error(format!("{} must be a valid UUID", field.0)))
}

/// Parse a UUID into an account identifier.
pub fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    parse_uuid(value, field).map(UserId::from_uuid)
}

/// Parse an RFC 3339 timestamp into UTC.
pub fn parse_rfc3339_timestamp(value: &str, field: FieldName) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| {
            field.error(format!(
                "{} must be an RFC 3339 timestamp, e.g. 2026-08-07T09:00:00Z",
                field.0
            ))
        })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn valid_uuids_parse() {
        let id = parse_uuid("3fa85f64-5717-4562-b3fc-2c963f66afa6", FieldName::new("id"))
            .expect("valid uuid");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    fn invalid_uuids_carry_the_field_name() {
        let error = parse_uuid("not-a-uuid", FieldName::new("driverId")).expect_err("must fail");
        assert_eq!(
            error
                .details()
                .and_then(|details| details.get("field"))
                .and_then(serde_json::Value::as_str),
            Some("driverId")
        );
    }

    #[rstest]
    fn timestamps_normalise_to_utc() {
        let parsed = parse_rfc3339_timestamp(
            "2026-08-07T10:00:00+01:00",
            FieldName::new("scheduledStartTime"),
        )
        .expect("valid timestamp");
        assert_eq!(parsed.to_rfc3339(), "2026-08-07T09:00:00+00:00");
    }

    #[rstest]
    fn garbage_timestamps_are_rejected() {
        assert!(
            parse_rfc3339_timestamp("yesterday", FieldName::new("scheduledStartTime")).is_err()
        );
    }
}
