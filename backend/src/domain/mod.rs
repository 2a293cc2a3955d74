//! Domain entities, services, and ports.
//!
//! Purpose: define the strongly typed data model and the four component
//! services behind driving ports, so inbound adapters depend on traits and
//! persistence stays behind driven ports. Types are immutable views; the
//! relational store owns every record.

pub mod error;
pub mod location;
pub mod location_tracker;
pub mod password;
mod persistence_error_mapping;
pub mod ports;
pub mod schedule;
pub mod schedule_registry;
pub mod stop_request;
pub mod stop_request_ledger;
pub mod user;
pub mod user_directory;

pub use self::error::{Error, ErrorCode};
pub use self::location::DriverLocationSnapshot;
pub use self::location_tracker::LocationTrackerService;
pub use self::schedule::{Schedule, ScheduleDraft};
pub use self::schedule_registry::ScheduleRegistryService;
pub use self::stop_request::{StopRequest, StopRequestStatus, MIN_LEAD_TIME_MINUTES};
pub use self::stop_request_ledger::StopRequestLedgerService;
pub use self::user::{
    DriverProfile, NewUser, ResidentProfile, User, UserId, UserProfile, UserRole,
    UserValidationError,
};
pub use self::user_directory::UserDirectoryService;
