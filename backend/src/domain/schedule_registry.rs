//! Schedule registry domain service.
//!
//! Implements the [`ScheduleRegistry`] driving port: publishing street
//! visits for existing driver accounts and serving the schedule queries.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::persistence_error_mapping::{
    map_schedule_repository_error, map_user_repository_error,
};
use crate::domain::ports::{
    CreateScheduleRequest, ScheduleRegistry, ScheduleRepository, UserRepository,
};
use crate::domain::schedule::{Schedule, ScheduleDraft};
use crate::domain::{Error, UserId, UserRole};

/// Schedule registry service backed by user and schedule repositories.
#[derive(Clone)]
pub struct ScheduleRegistryService<U, S> {
    users: Arc<U>,
    schedules: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<U, S> ScheduleRegistryService<U, S> {
    /// Create a new service with its repositories and clock.
    pub fn new(users: Arc<U>, schedules: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            schedules,
            clock,
        }
    }
}

#[async_trait]
impl<U, S> ScheduleRegistry for ScheduleRegistryService<U, S>
where
    U: UserRepository,
    S: ScheduleRepository,
{
    async fn create_schedule(&self, request: CreateScheduleRequest) -> Result<Schedule, Error> {
        let driver = self
            .users
            .find_by_id(&request.driver_id)
            .await
            .map_err(map_user_repository_error)?;

        // A resident account cannot publish visits; the same not-found as a
        // missing account, so callers learn nothing about roles.
        if !driver.is_some_and(|user| user.role() == UserRole::Driver) {
            return Err(Error::not_found(format!(
                "driver {} not found",
                request.driver_id
            )));
        }

        let schedule = Schedule::new(ScheduleDraft {
            driver_id: request.driver_id,
            street: request.street,
            scheduled_start_time: request.scheduled_start_time,
            scheduled_end_time: request.scheduled_end_time,
        });

        self.schedules
            .insert(&schedule)
            .await
            .map_err(map_schedule_repository_error)?;

        Ok(schedule)
    }

    async fn get_schedule(&self, id: Uuid) -> Result<Option<Schedule>, Error> {
        self.schedules
            .find_by_id(id)
            .await
            .map_err(map_schedule_repository_error)
    }

    async fn schedules_for_street(&self, street: &str) -> Result<Vec<Schedule>, Error> {
        self.schedules
            .find_by_street_fragment(street)
            .await
            .map_err(map_schedule_repository_error)
    }

    async fn schedules_for_driver(&self, driver_id: &UserId) -> Result<Vec<Schedule>, Error> {
        self.schedules
            .find_by_driver(driver_id)
            .await
            .map_err(map_schedule_repository_error)
    }

    async fn upcoming_schedules(&self) -> Result<Vec<Schedule>, Error> {
        self.schedules
            .find_starting_at_or_after(self.clock.utc())
            .await
            .map_err(map_schedule_repository_error)
    }
}
