//! Domain ports.
//!
//! Driving ports ([`UserDirectory`], [`ScheduleRegistry`], [`StopRequestLedger`],
//! [`LocationTracker`]) are implemented by the domain services and consumed by
//! the inbound adapters. Driven ports ([`UserRepository`], [`ScheduleRepository`],
//! [`StopRequestRepository`]) are implemented by persistence adapters.

pub mod location_tracker;
pub mod schedule_registry;
pub mod schedule_repository;
pub mod stop_request_ledger;
pub mod stop_request_repository;
pub mod user_directory;
pub mod user_repository;

pub use self::location_tracker::LocationTracker;
pub use self::schedule_registry::{CreateScheduleRequest, ScheduleRegistry};
pub use self::schedule_repository::{ScheduleRepository, ScheduleRepositoryError};
pub use self::stop_request_ledger::StopRequestLedger;
pub use self::stop_request_repository::{StopRequestRepository, StopRequestRepositoryError};
pub use self::user_directory::{CreateUserRequest, NewUserProfile, UserDirectory};
pub use self::user_repository::{UserRepository, UserRepositoryError, UserRoleFilter};

#[cfg(test)]
pub use self::location_tracker::MockLocationTracker;
#[cfg(test)]
pub use self::schedule_registry::MockScheduleRegistry;
#[cfg(test)]
pub use self::schedule_repository::MockScheduleRepository;
#[cfg(test)]
pub use self::stop_request_ledger::MockStopRequestLedger;
#[cfg(test)]
pub use self::stop_request_repository::MockStopRequestRepository;
#[cfg(test)]
pub use self::user_directory::MockUserDirectory;
#[cfg(test)]
pub use self::user_repository::MockUserRepository;
