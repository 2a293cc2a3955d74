//! Stop request ledger domain service.
//!
//! Implements the [`StopRequestLedger`] driving port: filing requests under
//! the lead-time and uniqueness rules, listing them, and overwriting their
//! status.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::persistence_error_mapping::{
    map_schedule_repository_error, map_stop_request_repository_error, map_user_repository_error,
};
use crate::domain::ports::{
    ScheduleRepository, StopRequestLedger, StopRequestRepository, UserRepository,
};
use crate::domain::stop_request::{min_lead_time, StopRequest, StopRequestStatus};
use crate::domain::{Error, UserId, UserRole};

/// Stop request ledger service backed by user, schedule, and stop request
/// repositories.
#[derive(Clone)]
pub struct StopRequestLedgerService<U, S, R> {
    users: Arc<U>,
    schedules: Arc<S>,
    stop_requests: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<U, S, R> StopRequestLedgerService<U, S, R> {
    /// Create a new service with its repositories and clock.
    pub fn new(
        users: Arc<U>,
        schedules: Arc<S>,
        stop_requests: Arc<R>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            schedules,
            stop_requests,
            clock,
        }
    }
}

#[async_trait]
impl<U, S, R> StopRequestLedger for StopRequestLedgerService<U, S, R>
where
    U: UserRepository,
    S: ScheduleRepository,
    R: StopRequestRepository,
{
    async fn create_stop_request(
        &self,
        resident_id: &UserId,
        schedule_id: Uuid,
    ) -> Result<StopRequest, Error> {
        let schedule = self
            .schedules
            .find_by_id(schedule_id)
            .await
            .map_err(map_schedule_repository_error)?
            .ok_or_else(|| Error::not_found(format!("schedule {schedule_id} not found")))?;

        let resident = self
            .users
            .find_by_id(resident_id)
            .await
            .map_err(map_user_repository_error)?;
        if !resident.is_some_and(|user| user.role() == UserRole::Resident) {
            return Err(Error::not_found(format!(
                "resident {resident_id} not found"
            )));
        }

        // Strictly less than one hour fails; exactly one hour passes. A
        // departure already in the past yields a negative difference and
        // fails the same check.
        let now = self.clock.utc();
        if schedule.scheduled_start_time() - now < min_lead_time() {
            return Err(Error::invalid_request(
                "stop requests must be made at least one hour before departure",
            ));
        }

        let existing = self
            .stop_requests
            .find_by_resident_and_schedule(resident_id, schedule_id)
            .await
            .map_err(map_stop_request_repository_error)?;
        if existing.is_some() {
            return Err(Error::conflict(
                "stop request already exists for this schedule",
            ));
        }

        let request = StopRequest::new(*resident_id, schedule_id, now);
        self.stop_requests
            .insert(&request)
            .await
            .map_err(map_stop_request_repository_error)?;

        Ok(request)
    }

    async fn requests_for_resident(
        &self,
        resident_id: &UserId,
    ) -> Result<Vec<StopRequest>, Error> {
        self.stop_requests
            .find_by_resident(resident_id)
            .await
            .map_err(map_stop_request_repository_error)
    }

    async fn requests_for_schedule(&self, schedule_id: Uuid) -> Result<Vec<StopRequest>, Error> {
        self.stop_requests
            .find_by_schedule(schedule_id)
            .await
            .map_err(map_stop_request_repository_error)
    }

    async fn update_status(
        &self,
        request_id: Uuid,
        status: StopRequestStatus,
    ) -> Result<StopRequest, Error> {
        self.stop_requests
            .set_status(request_id, status)
            .await
            .map_err(map_stop_request_repository_error)?
            .ok_or_else(|| Error::not_found(format!("stop request {request_id} not found")))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the lead-time and uniqueness rules.

    use chrono::{DateTime, Duration, Local, TimeZone, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::password::hash_password;
    use crate::domain::ports::{
        MockScheduleRepository, MockStopRequestRepository, MockUserRepository,
        StopRequestRepositoryError,
    };
    use crate::domain::schedule::{Schedule, ScheduleDraft};
    use crate::domain::user::{
        DriverProfile, NewUser, ResidentProfile, User, UserProfile,
    };
    use crate::domain::ErrorCode;

    struct FixtureClock {
        utc_now: DateTime<Utc>,
    }

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc_now.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.utc_now
        }
    }

    fn fixture_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    fn fixture_clock() -> Arc<dyn Clock> {
        Arc::new(FixtureClock {
            utc_now: fixture_now(),
        })
    }

    fn resident_account() -> User {
        User::new(NewUser {
            username: "resident_jane".to_owned(),
            password_hash: hash_password("residentpass").expect("hashing succeeds"),
            email: "jane@example.com".to_owned(),
            name: "Jane Resident".to_owned(),
            profile: UserProfile::Resident(
                ResidentProfile::new("123 Main Street").expect("valid address"),
            ),
        })
        .expect("valid user")
    }

    fn driver_account() -> User {
        User::new(NewUser {
            username: "driver_john".to_owned(),
            password_hash: hash_password("driverpass").expect("hashing succeeds"),
            email: "john@breadvan.example".to_owned(),
            name: "John Driver".to_owned(),
            profile: UserProfile::Driver(
                DriverProfile::new("Bread Van", "BREAD123").expect("valid driver"),
            ),
        })
        .expect("valid user")
    }

    fn schedule_starting_in(lead: Duration) -> Schedule {
        let start = fixture_now() + lead;
        Schedule::new(ScheduleDraft {
            driver_id: UserId::random(),
            street: "Main Street".to_owned(),
            scheduled_start_time: start,
            scheduled_end_time: start + Duration::hours(4),
        })
    }

    struct LedgerFixture {
        users: MockUserRepository,
        schedules: MockScheduleRepository,
        stop_requests: MockStopRequestRepository,
    }

    impl LedgerFixture {
        fn new() -> Self {
            Self {
                users: MockUserRepository::new(),
                schedules: MockScheduleRepository::new(),
                stop_requests: MockStopRequestRepository::new(),
            }
        }

        fn with_schedule(mut self, schedule: Schedule) -> Self {
            self.schedules
                .expect_find_by_id()
                .returning(move |_| Ok(Some(schedule.clone())));
            self
        }

        fn with_resident(mut self, user: User) -> Self {
            self.users
                .expect_find_by_id()
                .returning(move |_| Ok(Some(user.clone())));
            self
        }

        fn build(
            self,
        ) -> StopRequestLedgerService<
            MockUserRepository,
            MockScheduleRepository,
            MockStopRequestRepository,
        > {
            StopRequestLedgerService::new(
                Arc::new(self.users),
                Arc::new(self.schedules),
                Arc::new(self.stop_requests),
                fixture_clock(),
            )
        }
    }

    #[rstest]
    #[case::two_hours(Duration::hours(2), true)]
    #[case::sixty_one_minutes(Duration::minutes(61), true)]
    #[case::exactly_one_hour(Duration::minutes(60), true)]
    #[case::fifty_nine_minutes(Duration::minutes(59), false)]
    #[case::departure_in_the_past(Duration::minutes(-30), false)]
    #[tokio::test]
    async fn lead_time_boundary_is_strictly_less_than_one_hour(
        #[case] lead: Duration,
        #[case] accepted: bool,
    ) {
        let resident = resident_account();
        let resident_id = *resident.id();
        let schedule = schedule_starting_in(lead);
        let schedule_id = schedule.id();

        let mut fixture = LedgerFixture::new()
            .with_schedule(schedule)
            .with_resident(resident);
        if accepted {
            fixture
                .stop_requests
                .expect_find_by_resident_and_schedule()
                .returning(|_, _| Ok(None));
            fixture
                .stop_requests
                .expect_insert()
                .times(1)
                .returning(|_| Ok(()));
        } else {
            fixture.stop_requests.expect_insert().times(0);
        }
        let service = fixture.build();

        let result = service.create_stop_request(&resident_id, schedule_id).await;

        match result {
            Ok(request) => {
                assert!(accepted, "request should have been rejected");
                assert_eq!(request.status(), StopRequestStatus::Requested);
                assert_eq!(request.request_time(), fixture_now());
            }
            Err(error) => {
                assert!(!accepted, "request should have been accepted");
                assert_eq!(error.code(), ErrorCode::InvalidRequest);
                assert!(error.message().contains("at least one hour"));
            }
        }
    }

    #[rstest]
    #[tokio::test]
    async fn missing_schedule_is_reported_before_the_resident_check() {
        let mut fixture = LedgerFixture::new();
        fixture.schedules.expect_find_by_id().returning(|_| Ok(None));
        fixture.users.expect_find_by_id().times(0);
        let service = fixture.build();

        let error = service
            .create_stop_request(&UserId::random(), Uuid::new_v4())
            .await
            .expect_err("missing schedule must fail");

        assert_eq!(error.code(), ErrorCode::NotFound);
        assert!(error.message().contains("schedule"));
    }

    #[rstest]
    #[tokio::test]
    async fn driver_accounts_cannot_file_stop_requests() {
        let driver = driver_account();
        let driver_id = *driver.id();
        let schedule = schedule_starting_in(Duration::hours(2));
        let schedule_id = schedule.id();
        let mut fixture = LedgerFixture::new()
            .with_schedule(schedule)
            .with_resident(driver);
        fixture.stop_requests.expect_insert().times(0);
        let service = fixture.build();

        let error = service
            .create_stop_request(&driver_id, schedule_id)
            .await
            .expect_err("driver must fail");

        assert_eq!(error.code(), ErrorCode::NotFound);
        assert!(error.message().contains("resident"));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_requests_conflict_without_a_second_insert() {
        let resident = resident_account();
        let resident_id = *resident.id();
        let schedule = schedule_starting_in(Duration::hours(2));
        let schedule_id = schedule.id();
        let existing = StopRequest::new(resident_id, schedule_id, fixture_now());

        let mut fixture = LedgerFixture::new()
            .with_schedule(schedule)
            .with_resident(resident);
        fixture
            .stop_requests
            .expect_find_by_resident_and_schedule()
            .returning(move |_, _| Ok(Some(existing.clone())));
        fixture.stop_requests.expect_insert().times(0);
        let service = fixture.build();

        let error = service
            .create_stop_request(&resident_id, schedule_id)
            .await
            .expect_err("duplicate must fail");

        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn losing_a_concurrent_insert_race_still_conflicts() {
        let resident = resident_account();
        let resident_id = *resident.id();
        let schedule = schedule_starting_in(Duration::hours(2));
        let schedule_id = schedule.id();

        let mut fixture = LedgerFixture::new()
            .with_schedule(schedule)
            .with_resident(resident);
        fixture
            .stop_requests
            .expect_find_by_resident_and_schedule()
            .returning(|_, _| Ok(None));
        // The existence check passed, but another request committed first;
        // the store's unique constraint rejects this insert.
        fixture.stop_requests.expect_insert().returning(|_| {
            Err(StopRequestRepositoryError::conflict(
                "duplicate (resident, schedule) pair",
            ))
        });
        let service = fixture.build();

        let error = service
            .create_stop_request(&resident_id, schedule_id)
            .await
            .expect_err("race loser must conflict");

        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[case(StopRequestStatus::Confirmed)]
    #[case(StopRequestStatus::Rejected)]
    #[case(StopRequestStatus::Completed)]
    #[case(StopRequestStatus::Requested)]
    #[tokio::test]
    async fn any_status_may_overwrite_any_other(#[case] next: StopRequestStatus) {
        let request_id = Uuid::new_v4();
        let mut fixture = LedgerFixture::new();
        fixture
            .stop_requests
            .expect_set_status()
            .returning(move |id, status| {
                Ok(Some(StopRequest::from_parts(
                    id,
                    UserId::random(),
                    Uuid::new_v4(),
                    fixture_now(),
                    status,
                )))
            });
        let service = fixture.build();

        let updated = service
            .update_status(request_id, next)
            .await
            .expect("status overwrite succeeds");

        assert_eq!(updated.status(), next);
    }

    #[rstest]
    #[tokio::test]
    async fn updating_a_missing_request_is_not_found() {
        let mut fixture = LedgerFixture::new();
        fixture
            .stop_requests
            .expect_set_status()
            .returning(|_, _| Ok(None));
        let service = fixture.build();

        let error = service
            .update_status(Uuid::new_v4(), StopRequestStatus::Confirmed)
            .await
            .expect_err("missing request must fail");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
