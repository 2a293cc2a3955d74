//! Schedule HTTP handlers.
//!
//! ```text
//! POST /api/v1/schedules
//! GET  /api/v1/schedules/upcoming
//! GET  /api/v1/schedules/by-street/{street}
//! GET  /api/v1/schedules/by-driver/{driver_id}
//! GET  /api/v1/schedules/{id}
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateScheduleRequest, ScheduleRegistry};
use crate::domain::{Error, Schedule};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    parse_rfc3339_timestamp, parse_user_id, parse_uuid, FieldName,
};
use crate::inbound::http::ApiResult;

/// Request payload for publishing a street visit.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequestBody {
    #[schema(format = "uuid")]
    pub driver_id: String,
    pub street: String,
    #[schema(format = "date-time")]
    pub scheduled_start_time: String,
    #[schema(format = "date-time")]
    pub scheduled_end_time: String,
}

/// Schedule payload returned by the schedule endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub driver_id: String,
    pub street: String,
    #[schema(format = "date-time")]
    pub scheduled_start_time: String,
    #[schema(format = "date-time")]
    pub scheduled_end_time: String,
}

impl From<Schedule> for ScheduleResponseBody {
    fn from(schedule: Schedule) -> Self {
        Self {
            id: schedule.id().to_string(),
            driver_id: schedule.driver_id().to_string(),
            street: schedule.street().to_owned(),
            scheduled_start_time: schedule.scheduled_start_time().to_rfc3339(),
            scheduled_end_time: schedule.scheduled_end_time().to_rfc3339(),
        }
    }
}

fn parse_create_request(body: CreateScheduleRequestBody) -> Result<CreateScheduleRequest, Error> {
    Ok(CreateScheduleRequest {
        driver_id: parse_user_id(&body.driver_id, FieldName::new("driverId"))?,
        street: body.street,
        scheduled_start_time: parse_rfc3339_timestamp(
            &body.scheduled_start_time,
            FieldName::new("scheduledStartTime"),
        )?,
        scheduled_end_time: parse_rfc3339_timestamp(
            &body.scheduled_end_time,
            FieldName::new("scheduledEndTime"),
        )?,
    })
}

/// Publish a street visit for a driver.
#[utoipa::path(
    post,
    path = "/api/v1/schedules",
    request_body = CreateScheduleRequestBody,
    responses(
        (status = 201, description = "Schedule created", body = ScheduleResponseBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Driver not found", body = Error)
    ),
    tags = ["schedules"],
    operation_id = "createSchedule"
)]
#[post("/schedules")]
pub async fn create_schedule(
    state: web::Data<HttpState>,
    payload: web::Json<CreateScheduleRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_create_request(payload.into_inner())?;
    let schedule = state.schedules.create_schedule(request).await?;
    Ok(HttpResponse::Created().json(ScheduleResponseBody::from(schedule)))
}

/// Schedules whose start lies at or after the current time, ascending.
#[utoipa::path(
    get,
    path = "/api/v1/schedules/upcoming",
    responses(
        (status = 200, description = "Upcoming schedules", body = [ScheduleResponseBody])
    ),
    tags = ["schedules"],
    operation_id = "upcomingSchedules"
)]
#[get("/schedules/upcoming")]
pub async fn upcoming_schedules(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ScheduleResponseBody>>> {
    let schedules = state.schedules.upcoming_schedules().await?;
    Ok(web::Json(
        schedules
            .into_iter()
            .map(ScheduleResponseBody::from)
            .collect(),
    ))
}

/// Case-insensitive substring search over street names.
#[utoipa::path(
    get,
    path = "/api/v1/schedules/by-street/{street}",
    params(("street" = String, Path, description = "Street name fragment")),
    responses(
        (status = 200, description = "Matching schedules", body = [ScheduleResponseBody])
    ),
    tags = ["schedules"],
    operation_id = "schedulesForStreet"
)]
#[get("/schedules/by-street/{street}")]
pub async fn schedules_for_street(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<ScheduleResponseBody>>> {
    let schedules = state.schedules.schedules_for_street(&path).await?;
    Ok(web::Json(
        schedules
            .into_iter()
            .map(ScheduleResponseBody::from)
            .collect(),
    ))
}

/// All schedules belonging to a driver.
#[utoipa::path(
    get,
    path = "/api/v1/schedules/by-driver/{driver_id}",
    params(("driver_id" = uuid::Uuid, Path, description = "Driver account identifier")),
    responses(
        (status = 200, description = "Driver schedules", body = [ScheduleResponseBody]),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["schedules"],
    operation_id = "schedulesForDriver"
)]
#[get("/schedules/by-driver/{driver_id}")]
pub async fn schedules_for_driver(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<ScheduleResponseBody>>> {
    let driver_id = parse_user_id(&path, FieldName::new("driverId"))?;
    let schedules = state.schedules.schedules_for_driver(&driver_id).await?;
    Ok(web::Json(
        schedules
            .into_iter()
            .map(ScheduleResponseBody::from)
            .collect(),
    ))
}

/// Fetch one schedule by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/schedules/{id}",
    params(("id" = uuid::Uuid, Path, description = "Schedule identifier")),
    responses(
        (status = 200, description = "Schedule", body = ScheduleResponseBody),
        (status = 404, description = "No such schedule", body = Error)
    ),
    tags = ["schedules"],
    operation_id = "getSchedule"
)]
#[get("/schedules/{id}")]
pub async fn get_schedule(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ScheduleResponseBody>> {
    let id = parse_uuid(&path, FieldName::new("id"))?;
    let schedule = state
        .schedules
        .get_schedule(id)
        .await?
        .ok_or_else(|| Error::not_found(format!("schedule {id} not found")))?;
    Ok(web::Json(ScheduleResponseBody::from(schedule)))
}

#[cfg(test)]
mod tests {
    //! Handler coverage against mocked driving ports.

    use std::sync::Arc;

    use actix_web::{test as actix_test, App};
    use chrono::{Duration, Utc};
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{
        MockLocationTracker, MockScheduleRegistry, MockStopRequestLedger, MockUserDirectory,
    };
    use crate::domain::{ScheduleDraft, UserId};

    fn state_with_schedules(schedules: MockScheduleRegistry) -> HttpState {
        HttpState::new(
            Arc::new(MockUserDirectory::new()),
            Arc::new(schedules),
            Arc::new(MockStopRequestLedger::new()),
            Arc::new(MockLocationTracker::new()),
        )
    }

    fn sample_schedule() -> Schedule {
        let start = Utc::now() + Duration::hours(2);
        Schedule::new(ScheduleDraft {
            driver_id: UserId::random(),
            street: "Main Street".to_owned(),
            scheduled_start_time: start,
            scheduled_end_time: start + Duration::hours(4),
        })
    }

    #[actix_web::test]
    async fn create_schedule_round_trips_payload() {
        let sample = sample_schedule();
        let mut schedules = MockScheduleRegistry::new();
        let reply = sample.clone();
        schedules
            .expect_create_schedule()
            .returning(move |_| Ok(reply.clone()));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_schedules(schedules)))
                .service(create_schedule),
        )
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/schedules")
            .set_json(CreateScheduleRequestBody {
                driver_id: sample.driver_id().to_string(),
                street: "Main Street".to_owned(),
                scheduled_start_time: sample.scheduled_start_time().to_rfc3339(),
                scheduled_end_time: sample.scheduled_end_time().to_rfc3339(),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
        let body: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json body");
        assert_eq!(body.get("street").and_then(Value::as_str), Some("Main Street"));
    }

    #[actix_web::test]
    async fn bad_driver_id_is_rejected_before_the_port() {
        let mut schedules = MockScheduleRegistry::new();
        schedules.expect_create_schedule().times(0);
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_schedules(schedules)))
                .service(create_schedule),
        )
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/schedules")
            .set_json(CreateScheduleRequestBody {
                driver_id: "not-a-uuid".to_owned(),
                street: "Main Street".to_owned(),
                scheduled_start_time: "2026-08-07T09:00:00Z".to_owned(),
                scheduled_end_time: "2026-08-07T13:00:00Z".to_owned(),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn upcoming_route_wins_over_the_id_route() {
        let mut schedules = MockScheduleRegistry::new();
        schedules
            .expect_upcoming_schedules()
            .times(1)
            .returning(|| Ok(vec![sample_schedule()]));
        schedules.expect_get_schedule().times(0);
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_schedules(schedules)))
                .service(upcoming_schedules)
                .service(get_schedule),
        )
        .await;

        let request = actix_test::TestRequest::get()
            .uri("/schedules/upcoming")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert!(response.status().is_success());
    }

    #[actix_web::test]
    async fn missing_schedule_maps_to_not_found() {
        let mut schedules = MockScheduleRegistry::new();
        schedules.expect_get_schedule().returning(|_| Ok(None));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_schedules(schedules)))
                .service(get_schedule),
        )
        .await;

        let request = actix_test::TestRequest::get()
            .uri(&format!("/schedules/{}", uuid::Uuid::new_v4()))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
