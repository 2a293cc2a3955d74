//! Driving port for the stop request ledger.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, StopRequest, StopRequestStatus, UserId};

/// Driving port exposing stop request operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StopRequestLedger: Send + Sync {
    /// File a stop request. Checks run in order: the schedule must exist,
    /// the resident must exist and be a resident, departure must be at
    /// least one hour away, and the resident must not already hold a
    /// request for the schedule.
    async fn create_stop_request(
        &self,
        resident_id: &UserId,
        schedule_id: Uuid,
    ) -> Result<StopRequest, Error>;

    /// All requests filed by a resident.
    async fn requests_for_resident(
        &self,
        resident_id: &UserId,
    ) -> Result<Vec<StopRequest>, Error>;

    /// All requests against a schedule.
    async fn requests_for_schedule(&self, schedule_id: Uuid) -> Result<Vec<StopRequest>, Error>;

    /// Overwrite a request's status unconditionally; any status may follow
    /// any other. Not-found when no such request exists.
    async fn update_status(
        &self,
        request_id: Uuid,
        status: StopRequestStatus,
    ) -> Result<StopRequest, Error>;
}
