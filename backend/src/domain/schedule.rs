//! Street-visit schedule data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

/// Draft carrying the parts of a new schedule.
#[derive(Debug, Clone)]
pub struct ScheduleDraft {
    pub driver_id: UserId,
    pub street: String,
    pub scheduled_start_time: DateTime<Utc>,
    pub scheduled_end_time: DateTime<Utc>,
}

/// A driver's planned visit to a street within a time window.
///
/// The window bounds are stored as given; no ordering between start and end
/// is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    id: Uuid,
    driver_id: UserId,
    street: String,
    scheduled_start_time: DateTime<Utc>,
    scheduled_end_time: DateTime<Utc>,
}

impl Schedule {
    /// Build a new schedule with a freshly generated identifier.
    pub fn new(draft: ScheduleDraft) -> Self {
        Self::from_parts(Uuid::new_v4(), draft)
    }

    /// Rebuild a schedule from stored parts.
    pub fn from_parts(id: Uuid, draft: ScheduleDraft) -> Self {
        Self {
            id,
            driver_id: draft.driver_id,
            street: draft.street,
            scheduled_start_time: draft.scheduled_start_time,
            scheduled_end_time: draft.scheduled_end_time,
        }
    }

    /// Stable schedule identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Account of the driver running the visit.
    pub fn driver_id(&self) -> &UserId {
        &self.driver_id
    }

    /// Street the van will visit.
    pub fn street(&self) -> &str {
        &self.street
    }

    /// Planned start of the visit window.
    pub fn scheduled_start_time(&self) -> DateTime<Utc> {
        self.scheduled_start_time
    }

    /// Planned end of the visit window.
    pub fn scheduled_end_time(&self) -> DateTime<Utc> {
        self.scheduled_end_time
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::Duration;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn new_schedules_get_distinct_identifiers() {
        let start = Utc::now();
        let draft = ScheduleDraft {
            driver_id: UserId::random(),
            street: "Main Street".to_owned(),
            scheduled_start_time: start,
            scheduled_end_time: start + Duration::hours(4),
        };

        let first = Schedule::new(draft.clone());
        let second = Schedule::new(draft);

        assert_ne!(first.id(), second.id());
        assert_eq!(first.street(), "Main Street");
    }

    #[rstest]
    fn inverted_windows_are_stored_as_given() {
        let start = Utc::now();
        let schedule = Schedule::new(ScheduleDraft {
            driver_id: UserId::random(),
            street: "Back Street".to_owned(),
            scheduled_start_time: start,
            scheduled_end_time: start - Duration::hours(1),
        });

        assert!(schedule.scheduled_end_time() < schedule.scheduled_start_time());
    }
}
