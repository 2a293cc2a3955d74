//! Driving port for the location tracker.

use async_trait::async_trait;

use crate::domain::{DriverLocationSnapshot, Error, UserId};

/// Driving port exposing driver location operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationTracker: Send + Sync {
    /// Overwrite a driver's reported location and stamp the update time.
    /// Not-found unless the account exists and is a driver.
    async fn update_location(
        &self,
        driver_id: &UserId,
        location: String,
    ) -> Result<DriverLocationSnapshot, Error>;

    /// Snapshot of a driver's last reported position. Not-found unless the
    /// account exists and is a driver.
    async fn get_location(&self, driver_id: &UserId) -> Result<DriverLocationSnapshot, Error>;

    /// Snapshots for every driver that has reported a location.
    async fn list_reported_locations(&self) -> Result<Vec<DriverLocationSnapshot>, Error>;
}
