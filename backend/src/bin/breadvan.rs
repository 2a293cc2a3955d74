//! Command-line surface mirroring the backend operations for manual testing.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use mockable::{Clock, DefaultClock};
use tokio::runtime::Builder;
use uuid::Uuid;

use backend::domain::ports::{
    CreateScheduleRequest, CreateUserRequest, LocationTracker, NewUserProfile, ScheduleRegistry,
    StopRequestLedger, UserDirectory, UserRoleFilter,
};
use backend::domain::{
    DriverLocationSnapshot, Error, Schedule, StopRequest, StopRequestStatus, User, UserId,
    UserProfile,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{run_pending_migrations, DbPool, PoolConfig};
use backend::server::build_state;

/// `breadvan` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "breadvan",
    about = "Manage bread van accounts, schedules, stop requests, and locations",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url", global = true)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply migrations and seed sample data.
    Init,
    /// Account commands.
    #[command(subcommand)]
    User(UserCommand),
    /// Schedule commands.
    #[command(subcommand)]
    Schedule(ScheduleCommand),
    /// Stop request commands.
    #[command(subcommand)]
    Stop(StopCommand),
    /// Driver location commands.
    #[command(subcommand)]
    Location(LocationCommand),
}

#[derive(Debug, Subcommand)]
enum UserCommand {
    /// Create a resident account.
    CreateResident {
        name: String,
        email: String,
        username: String,
        password: String,
        address: String,
    },
    /// Create a driver account.
    CreateDriver {
        name: String,
        email: String,
        username: String,
        password: String,
        vehicle_type: String,
        license_plate: String,
    },
    /// List accounts: all, residents, or drivers.
    List {
        #[arg(default_value = "all")]
        kind: String,
    },
    /// Show one account by username.
    Show { username: String },
    /// Delete an account and everything it owns.
    Delete { user_id: Uuid },
}

#[derive(Debug, Subcommand)]
enum ScheduleCommand {
    /// Publish a street visit for a driver.
    Create {
        driver_id: Uuid,
        street: String,
        /// RFC 3339 or `YYYY-MM-DD HH:MM:SS` (UTC).
        start_time: String,
        /// RFC 3339 or `YYYY-MM-DD HH:MM:SS` (UTC).
        end_time: String,
    },
    /// View schedules matching a street name.
    ViewStreet { street: String },
    /// View schedules for a driver.
    ViewDriver { driver_id: Uuid },
    /// View upcoming schedules, soonest first.
    Upcoming,
}

#[derive(Debug, Subcommand)]
enum StopCommand {
    /// Request a stop on a schedule.
    Request {
        resident_id: Uuid,
        schedule_id: Uuid,
    },
    /// List stop requests for a resident.
    ListResident { resident_id: Uuid },
    /// List stop requests for a schedule.
    ListSchedule { schedule_id: Uuid },
    /// Overwrite a stop request's status.
    UpdateStatus { request_id: Uuid, status: String },
}

#[derive(Debug, Subcommand)]
enum LocationCommand {
    /// Update a driver's reported location.
    Update { driver_id: Uuid, location: String },
    /// Show a driver's last reported location.
    Get { driver_id: Uuid },
    /// Show every driver with a reported location.
    ListAll,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let database_url = resolve_database_url(args.database_url)?;

    if matches!(args.command, Command::Init) {
        run_pending_migrations(&database_url)
            .await
            .map_err(|error| io::Error::other(format!("apply migrations: {error}")))?;
    }

    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;
    let state = build_state(&pool);

    match args.command {
        Command::Init => init(&state).await,
        Command::User(command) => user_command(&state, command).await,
        Command::Schedule(command) => schedule_command(&state, command).await,
        Command::Stop(command) => stop_command(&state, command).await,
        Command::Location(command) => location_command(&state, command).await,
    }
}

fn map_domain_error(error: Error) -> io::Error {
    io::Error::other(format!("Error: {}", error.message()))
}

async fn init(state: &HttpState) -> io::Result<()> {
    let driver = state
        .users
        .create_user(CreateUserRequest {
            username: "driver_john".to_owned(),
            password: "driverpass".to_owned(),
            email: "john.driver@breadvan.example".to_owned(),
            name: "John Driver".to_owned(),
            profile: NewUserProfile::Driver {
                vehicle_type: "Bread Van".to_owned(),
                license_plate: "BREAD123".to_owned(),
            },
        })
        .await
        .map_err(map_domain_error)?;
    println!("Created driver {} with ID {}", driver.name(), driver.id());

    let resident = state
        .users
        .create_user(CreateUserRequest {
            username: "resident_jane".to_owned(),
            password: "residentpass".to_owned(),
            email: "jane.resident@example.com".to_owned(),
            name: "Jane Resident".to_owned(),
            profile: NewUserProfile::Resident {
                home_address: "123 Main Street".to_owned(),
            },
        })
        .await
        .map_err(map_domain_error)?;
    println!(
        "Created resident {} with ID {}",
        resident.name(),
        resident.id()
    );

    let start = DefaultClock.utc() + Duration::hours(2);
    let schedule = state
        .schedules
        .create_schedule(CreateScheduleRequest {
            driver_id: *driver.id(),
            street: "Main Street".to_owned(),
            scheduled_start_time: start,
            scheduled_end_time: start + Duration::hours(4),
        })
        .await
        .map_err(map_domain_error)?;
    println!("Created schedule {} for Main Street", schedule.id());

    state
        .locations
        .update_location(driver.id(), "Starting location - Depot".to_owned())
        .await
        .map_err(map_domain_error)?;
    println!("Database initialized with sample data");

    Ok(())
}

fn print_user(user: &User) {
    match user.profile() {
        UserProfile::Resident(profile) => println!(
            "ID: {}, Name: {}, Username: {}, Email: {}, Type: resident, Address: {}",
            user.id(),
            user.name(),
            user.username(),
            user.email(),
            profile.home_address()
        ),
        UserProfile::Driver(profile) => println!(
            "ID: {}, Name: {}, Username: {}, Email: {}, Type: driver, Vehicle: {}, Plate: {}",
            user.id(),
            user.name(),
            user.username(),
            user.email(),
            profile.vehicle_type(),
            profile.license_plate()
        ),
    }
}

async fn user_command(state: &HttpState, command: UserCommand) -> io::Result<()> {
    match command {
        UserCommand::CreateResident {
            name,
            email,
            username,
            password,
            address,
        } => {
            let user = state
                .users
                .create_user(CreateUserRequest {
                    username,
                    password,
                    email,
                    name,
                    profile: NewUserProfile::Resident {
                        home_address: address,
                    },
                })
                .await
                .map_err(map_domain_error)?;
            println!("Resident {} created with ID {}", user.name(), user.id());
        }
        UserCommand::CreateDriver {
            name,
            email,
            username,
            password,
            vehicle_type,
            license_plate,
        } => {
            let user = state
                .users
                .create_user(CreateUserRequest {
                    username,
                    password,
                    email,
                    name,
                    profile: NewUserProfile::Driver {
                        vehicle_type,
                        license_plate,
                    },
                })
                .await
                .map_err(map_domain_error)?;
            println!("Driver {} created with ID {}", user.name(), user.id());
        }
        UserCommand::List { kind } => {
            let filter = parse_role_filter(&kind)?;
            let users = state
                .users
                .list_users(filter)
                .await
                .map_err(map_domain_error)?;
            if users.is_empty() {
                println!("No users found");
            }
            for user in &users {
                print_user(user);
            }
        }
        UserCommand::Show { username } => {
            let user = state
                .users
                .get_user_by_username(&username)
                .await
                .map_err(map_domain_error)?;
            match user {
                Some(user) => print_user(&user),
                None => println!("No user found with username {username}"),
            }
        }
        UserCommand::Delete { user_id } => {
            let id = UserId::from_uuid(user_id);
            state.users.delete_user(&id).await.map_err(map_domain_error)?;
            println!("Deleted user {id} and everything it owned");
        }
    }
    Ok(())
}

fn print_schedule(schedule: &Schedule) {
    println!(
        "ID: {}, Driver: {}, Street: {}, Start: {}, End: {}",
        schedule.id(),
        schedule.driver_id(),
        schedule.street(),
        schedule.scheduled_start_time().to_rfc3339(),
        schedule.scheduled_end_time().to_rfc3339()
    );
}

async fn schedule_command(state: &HttpState, command: ScheduleCommand) -> io::Result<()> {
    match command {
        ScheduleCommand::Create {
            driver_id,
            street,
            start_time,
            end_time,
        } => {
            let schedule = state
                .schedules
                .create_schedule(CreateScheduleRequest {
                    driver_id: UserId::from_uuid(driver_id),
                    street: street.clone(),
                    scheduled_start_time: parse_timestamp(&start_time)?,
                    scheduled_end_time: parse_timestamp(&end_time)?,
                })
                .await
                .map_err(map_domain_error)?;
            println!("Schedule created with ID {} for {street}", schedule.id());
        }
        ScheduleCommand::ViewStreet { street } => {
            let schedules = state
                .schedules
                .schedules_for_street(&street)
                .await
                .map_err(map_domain_error)?;
            if schedules.is_empty() {
                println!("No schedules found for {street}");
            }
            for schedule in &schedules {
                print_schedule(schedule);
            }
        }
        ScheduleCommand::ViewDriver { driver_id } => {
            let id = UserId::from_uuid(driver_id);
            let schedules = state
                .schedules
                .schedules_for_driver(&id)
                .await
                .map_err(map_domain_error)?;
            if schedules.is_empty() {
                println!("No schedules found for driver {id}");
            }
            for schedule in &schedules {
                print_schedule(schedule);
            }
        }
        ScheduleCommand::Upcoming => {
            let schedules = state
                .schedules
                .upcoming_schedules()
                .await
                .map_err(map_domain_error)?;
            if schedules.is_empty() {
                println!("No upcoming schedules");
            }
            for schedule in &schedules {
                print_schedule(schedule);
            }
        }
    }
    Ok(())
}

fn print_stop_request(request: &StopRequest) {
    println!(
        "ID: {}, Resident: {}, Schedule: {}, Status: {}, Requested: {}",
        request.id(),
        request.resident_id(),
        request.schedule_id(),
        request.status(),
        request.request_time().to_rfc3339()
    );
}

async fn stop_command(state: &HttpState, command: StopCommand) -> io::Result<()> {
    match command {
        StopCommand::Request {
            resident_id,
            schedule_id,
        } => {
            let id = UserId::from_uuid(resident_id);
            let request = state
                .stop_requests
                .create_stop_request(&id, schedule_id)
                .await
                .map_err(map_domain_error)?;
            println!("Stop request created with ID {}", request.id());
        }
        StopCommand::ListResident { resident_id } => {
            let id = UserId::from_uuid(resident_id);
            let requests = state
                .stop_requests
                .requests_for_resident(&id)
                .await
                .map_err(map_domain_error)?;
            if requests.is_empty() {
                println!("No stop requests found for resident {id}");
            }
            for request in &requests {
                print_stop_request(request);
            }
        }
        StopCommand::ListSchedule { schedule_id } => {
            let requests = state
                .stop_requests
                .requests_for_schedule(schedule_id)
                .await
                .map_err(map_domain_error)?;
            if requests.is_empty() {
                println!("No stop requests found for schedule {schedule_id}");
            }
            for request in &requests {
                print_stop_request(request);
            }
        }
        StopCommand::UpdateStatus { request_id, status } => {
            let status = parse_status(&status)?;
            let updated = state
                .stop_requests
                .update_status(request_id, status)
                .await
                .map_err(map_domain_error)?;
            println!(
                "Stop request {} status set to {}",
                updated.id(),
                updated.status()
            );
        }
    }
    Ok(())
}

fn print_location(snapshot: &DriverLocationSnapshot) {
    println!(
        "Driver: {} ({}), Location: {}, Updated: {}, Vehicle: {}, Plate: {}",
        snapshot.driver_name,
        snapshot.driver_id,
        snapshot.location.as_deref().unwrap_or("Not set"),
        snapshot
            .location_updated_at
            .map_or_else(|| "Never".to_owned(), |stamp| stamp.to_rfc3339()),
        snapshot.vehicle_type,
        snapshot.license_plate
    );
}

async fn location_command(state: &HttpState, command: LocationCommand) -> io::Result<()> {
    match command {
        LocationCommand::Update {
            driver_id,
            location,
        } => {
            let id = UserId::from_uuid(driver_id);
            let snapshot = state
                .locations
                .update_location(&id, location)
                .await
                .map_err(map_domain_error)?;
            println!(
                "Driver {} location updated to {}",
                snapshot.driver_name,
                snapshot.location.as_deref().unwrap_or_default()
            );
        }
        LocationCommand::Get { driver_id } => {
            let id = UserId::from_uuid(driver_id);
            let snapshot = state
                .locations
                .get_location(&id)
                .await
                .map_err(map_domain_error)?;
            print_location(&snapshot);
        }
        LocationCommand::ListAll => {
            let snapshots = state
                .locations
                .list_reported_locations()
                .await
                .map_err(map_domain_error)?;
            if snapshots.is_empty() {
                println!("No driver locations found");
            }
            for snapshot in &snapshots {
                print_location(snapshot);
            }
        }
    }
    Ok(())
}

fn parse_role_filter(kind: &str) -> io::Result<UserRoleFilter> {
    match kind {
        "all" => Ok(UserRoleFilter::All),
        "residents" => Ok(UserRoleFilter::Residents),
        "drivers" => Ok(UserRoleFilter::Drivers),
        other => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("kind must be all, residents, or drivers, not {other}"),
        )),
    }
}

fn parse_status(value: &str) -> io::Result<StopRequestStatus> {
    value.parse().map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "status must be requested, confirmed, rejected, or completed",
        )
    })
}

/// Parse an RFC 3339 timestamp, or a naive `YYYY-MM-DD HH:MM:SS` read as UTC.
fn parse_timestamp(value: &str) -> io::Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid datetime, use RFC 3339 or YYYY-MM-DD HH:MM:SS",
            )
        })
}

fn resolve_database_url(explicit: Option<String>) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }

    let from_env = env::var("DATABASE_URL").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "database URL missing: set --database-url or DATABASE_URL",
        )
    })?;
    if from_env.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "DATABASE_URL must not be empty",
        ));
    }
    Ok(from_env)
}
