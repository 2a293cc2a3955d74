//! Location tracker domain service.
//!
//! Implements the [`LocationTracker`] driving port: overwriting a driver's
//! reported position and serving location snapshots.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::location::DriverLocationSnapshot;
use crate::domain::persistence_error_mapping::map_user_repository_error;
use crate::domain::ports::{LocationTracker, UserRepository, UserRoleFilter};
use crate::domain::user::{DriverProfile, User};
use crate::domain::{Error, UserId};

fn driver_profile<'a>(user: &'a User, id: &UserId) -> Result<&'a DriverProfile, Error> {
    user.as_driver()
        .ok_or_else(|| Error::not_found(format!("driver {id} not found")))
}

/// Location tracker service backed by the user repository.
#[derive(Clone)]
pub struct LocationTrackerService<U> {
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U> LocationTrackerService<U> {
    /// Create a new service with the user repository and clock.
    pub fn new(users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

impl<U> LocationTrackerService<U>
where
    U: UserRepository,
{
    async fn load_driver(&self, driver_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(driver_id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found(format!("driver {driver_id} not found")))
    }
}

#[async_trait]
impl<U> LocationTracker for LocationTrackerService<U>
where
    U: UserRepository,
{
    async fn update_location(
        &self,
        driver_id: &UserId,
        location: String,
    ) -> Result<DriverLocationSnapshot, Error> {
        let user = self.load_driver(driver_id).await?;
        let profile = driver_profile(&user, driver_id)?;

        let updated_at = self.clock.utc();
        self.users
            .set_driver_location(driver_id, &location, updated_at)
            .await
            .map_err(map_user_repository_error)?;

        let mut profile = profile.clone();
        profile.set_location(location, updated_at);
        Ok(DriverLocationSnapshot::from_driver(&user, &profile))
    }

    async fn get_location(&self, driver_id: &UserId) -> Result<DriverLocationSnapshot, Error> {
        let user = self.load_driver(driver_id).await?;
        let profile = driver_profile(&user, driver_id)?;
        Ok(DriverLocationSnapshot::from_driver(&user, profile))
    }

    async fn list_reported_locations(&self) -> Result<Vec<DriverLocationSnapshot>, Error> {
        let drivers = self
            .users
            .list(UserRoleFilter::Drivers)
            .await
            .map_err(map_user_repository_error)?;

        Ok(drivers
            .iter()
            .filter_map(|user| {
                user.as_driver()
                    .filter(|profile| profile.location().is_some())
                    .map(|profile| DriverLocationSnapshot::from_driver(user, profile))
            })
            .collect())
    }
}
