//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data`, so they depend
//! only on the driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LocationTracker, ScheduleRegistry, StopRequestLedger, UserDirectory};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserDirectory>,
    pub schedules: Arc<dyn ScheduleRegistry>,
    pub stop_requests: Arc<dyn StopRequestLedger>,
    pub locations: Arc<dyn LocationTracker>,
}

impl HttpState {
    /// Construct state from the four component ports.
    pub fn new(
        users: Arc<dyn UserDirectory>,
        schedules: Arc<dyn ScheduleRegistry>,
        stop_requests: Arc<dyn StopRequestLedger>,
        locations: Arc<dyn LocationTracker>,
    ) -> Self {
        Self {
            users,
            schedules,
            stop_requests,
            locations,
        }
    }
}
