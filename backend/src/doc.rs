//! OpenAPI surface used by Swagger UI and tooling.

use utoipa::OpenApi;

use crate::inbound::http::{health, locations, schedules, stop_requests, users};

/// Aggregated OpenAPI document for the REST endpoints.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bread Van Backend",
        description = "Scheduling and notification backend for a neighborhood delivery-van service."
    ),
    paths(
        users::create_user,
        users::list_users,
        users::get_user,
        users::delete_user,
        users::login,
        schedules::create_schedule,
        schedules::upcoming_schedules,
        schedules::schedules_for_street,
        schedules::schedules_for_driver,
        schedules::get_schedule,
        stop_requests::create_stop_request,
        stop_requests::stop_requests_for_resident,
        stop_requests::stop_requests_for_schedule,
        stop_requests::update_stop_request_status,
        locations::update_driver_location,
        locations::get_driver_location,
        locations::list_driver_locations,
        health::ready,
        health::live,
    ),
    components(schemas(
        users::CreateUserRequestBody,
        users::LoginRequestBody,
        users::UserResponseBody,
        schedules::CreateScheduleRequestBody,
        schedules::ScheduleResponseBody,
        stop_requests::CreateStopRequestBody,
        stop_requests::UpdateStopRequestStatusBody,
        stop_requests::StopRequestResponseBody,
        locations::UpdateLocationRequestBody,
        locations::DriverLocationResponseBody,
        crate::domain::Error,
        crate::domain::ErrorCode,
    )),
    tags(
        (name = "users", description = "Account registration, lookup, and login"),
        (name = "schedules", description = "Street-visit schedules"),
        (name = "stop-requests", description = "Resident stop requests"),
        (name = "locations", description = "Driver location reports"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;
