//! Stop request data model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

/// Minimum interval between a request and the schedule's departure.
pub const MIN_LEAD_TIME_MINUTES: i64 = 60;

/// Minimum lead time as a duration.
pub fn min_lead_time() -> Duration {
    Duration::minutes(MIN_LEAD_TIME_MINUTES)
}

/// Lifecycle status of a stop request.
///
/// `Requested` is the only reachable initial state. Any status may overwrite
/// any other; there is no transition guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopRequestStatus {
    Requested,
    Confirmed,
    Rejected,
    Completed,
}

impl StopRequestStatus {
    /// Stable lowercase label used in storage and payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for StopRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StopRequestStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "requested" => Ok(Self::Requested),
            "confirmed" => Ok(Self::Confirmed),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown stop request status: {other}")),
        }
    }
}

/// A resident's ask to be served during a specific schedule.
///
/// ## Invariants
/// - `request_time` is set at creation and never mutated.
/// - At most one request exists per (resident, schedule) pair; the store
///   enforces this with a unique constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopRequest {
    id: Uuid,
    resident_id: UserId,
    schedule_id: Uuid,
    request_time: DateTime<Utc>,
    status: StopRequestStatus,
}

impl StopRequest {
    /// Build a new request in the `Requested` state.
    pub fn new(resident_id: UserId, schedule_id: Uuid, request_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            resident_id,
            schedule_id,
            request_time,
            status: StopRequestStatus::Requested,
        }
    }

    /// Rebuild a request from stored parts.
    pub fn from_parts(
        id: Uuid,
        resident_id: UserId,
        schedule_id: Uuid,
        request_time: DateTime<Utc>,
        status: StopRequestStatus,
    ) -> Self {
        Self {
            id,
            resident_id,
            schedule_id,
            request_time,
            status,
        }
    }

    /// Stable request identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Resident who asked for the stop.
    pub fn resident_id(&self) -> &UserId {
        &self.resident_id
    }

    /// Schedule the stop belongs to.
    pub fn schedule_id(&self) -> Uuid {
        self.schedule_id
    }

    /// Instant the request was recorded.
    pub fn request_time(&self) -> DateTime<Utc> {
        self.request_time
    }

    /// Current lifecycle status.
    pub fn status(&self) -> StopRequestStatus {
        self.status
    }
}
