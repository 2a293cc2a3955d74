//! PostgreSQL persistence adapters built on Diesel.

mod diesel_error_mapping;
mod diesel_schedule_repository;
mod diesel_stop_request_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_schedule_repository::DieselScheduleRepository;
pub use diesel_stop_request_repository::DieselStopRequestRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{run_pending_migrations, MigrationError, MIGRATIONS};
pub use pool::{DbPool, PoolConfig, PoolError};
