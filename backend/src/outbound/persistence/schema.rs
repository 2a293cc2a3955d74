//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.
//! Regenerate with `diesel print-schema` when the migrations change.

diesel::table! {
    /// Base account records for residents and drivers.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// Argon2id digest in PHC string format.
        password_hash -> Varchar,
        /// Unique contact email.
        email -> Varchar,
        /// Display name.
        name -> Varchar,
        /// Role discriminator: `resident` or `driver`.
        user_type -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Resident specialization records, keyed by account identity.
    residents (user_id) {
        /// Primary key and foreign key into `users`.
        user_id -> Uuid,
        /// Street address for stop requests.
        home_address -> Varchar,
    }
}

diesel::table! {
    /// Driver specialization records, keyed by account identity.
    drivers (user_id) {
        /// Primary key and foreign key into `users`.
        user_id -> Uuid,
        /// Kind of vehicle the driver operates.
        vehicle_type -> Varchar,
        /// Registration plate.
        license_plate -> Varchar,
        /// Free-text availability status, defaults to `available`.
        current_status -> Varchar,
        /// Last reported location, if any.
        current_location -> Nullable<Varchar>,
        /// Timestamp of the last location report.
        location_updated_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Street-visit schedules published by drivers.
    schedules (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Foreign key into `users`; cascades on delete.
        driver_id -> Uuid,
        /// Street the van will visit.
        street -> Varchar,
        /// Planned start of the visit window.
        scheduled_start_time -> Timestamptz,
        /// Planned end of the visit window.
        scheduled_end_time -> Timestamptz,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Resident stop requests against schedules.
    stop_requests (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Foreign key into `users`; cascades on delete.
        resident_id -> Uuid,
        /// Foreign key into `schedules`; cascades on delete.
        schedule_id -> Uuid,
        /// Instant the request was recorded.
        request_time -> Timestamptz,
        /// Lifecycle status label.
        status -> Varchar,
    }
}

diesel::joinable!(residents -> users (user_id));
diesel::joinable!(drivers -> users (user_id));
diesel::joinable!(schedules -> users (driver_id));
diesel::joinable!(stop_requests -> schedules (schedule_id));

diesel::allow_tables_to_appear_in_same_query!(users, residents, drivers, schedules, stop_requests);
