//! Stop request HTTP handlers.
//!
//! ```text
//! POST  /api/v1/stop-requests
//! GET   /api/v1/stop-requests/by-resident/{resident_id}
//! GET   /api/v1/stop-requests/by-schedule/{schedule_id}
//! PATCH /api/v1/stop-requests/{id}/status
//! ```

use actix_web::{get, patch, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::StopRequestLedger;
use crate::domain::{Error, StopRequest, StopRequestStatus};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_user_id, parse_uuid, FieldName};
use crate::inbound::http::ApiResult;

/// Request payload for filing a stop request.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStopRequestBody {
    #[schema(format = "uuid")]
    pub resident_id: String,
    #[schema(format = "uuid")]
    pub schedule_id: String,
}

/// Request payload for overwriting a request's status.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStopRequestStatusBody {
    /// `requested`, `confirmed`, `rejected`, or `completed`.
    pub status: String,
}

/// Stop request payload returned by the ledger endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StopRequestResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub resident_id: String,
    #[schema(format = "uuid")]
    pub schedule_id: String,
    #[schema(format = "date-time")]
    pub request_time: String,
    pub status: String,
}

impl From<StopRequest> for StopRequestResponseBody {
    fn from(request: StopRequest) -> Self {
        Self {
            id: request.id().to_string(),
            resident_id: request.resident_id().to_string(),
            schedule_id: request.schedule_id().to_string(),
            request_time: request.request_time().to_rfc3339(),
            status: request.status().to_string(),
        }
    }
}

/// File a stop request against a schedule.
#[utoipa::path(
    post,
    path = "/api/v1/stop-requests",
    request_body = CreateStopRequestBody,
    responses(
        (status = 201, description = "Stop request filed", body = StopRequestResponseBody),
        (status = 400, description = "Lead time too short or invalid request", body = Error),
        (status = 404, description = "Schedule or resident not found", body = Error),
        (status = 409, description = "Request already exists", body = Error)
    ),
    tags = ["stop-requests"],
    operation_id = "createStopRequest"
)]
#[post("/stop-requests")]
pub async fn create_stop_request(
    state: web::Data<HttpState>,
    payload: web::Json<CreateStopRequestBody>,
) -> ApiResult<HttpResponse> {
    let resident_id = parse_user_id(&payload.resident_id, FieldName::new("residentId"))?;
    let schedule_id = parse_uuid(&payload.schedule_id, FieldName::new("scheduleId"))?;

    let request = state
        .stop_requests
        .create_stop_request(&resident_id, schedule_id)
        .await?;
    Ok(HttpResponse::Created().json(StopRequestResponseBody::from(request)))
}

/// All stop requests filed by a resident.
#[utoipa::path(
    get,
    path = "/api/v1/stop-requests/by-resident/{resident_id}",
    params(("resident_id" = uuid::Uuid, Path, description = "Resident account identifier")),
    responses(
        (status = 200, description = "Stop requests", body = [StopRequestResponseBody]),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["stop-requests"],
    operation_id = "stopRequestsForResident"
)]
#[get("/stop-requests/by-resident/{resident_id}")]
pub async fn stop_requests_for_resident(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<StopRequestResponseBody>>> {
    let resident_id = parse_user_id(&path, FieldName::new("residentId"))?;
    let requests = state
        .stop_requests
        .requests_for_resident(&resident_id)
        .await?;
    Ok(web::Json(
        requests
            .into_iter()
            .map(StopRequestResponseBody::from)
            .collect(),
    ))
}

/// All stop requests filed against a schedule.
#[utoipa::path(
    get,
    path = "/api/v1/stop-requests/by-schedule/{schedule_id}",
    params(("schedule_id" = uuid::Uuid, Path, description = "Schedule identifier")),
    responses(
        (status = 200, description = "Stop requests", body = [StopRequestResponseBody]),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["stop-requests"],
    operation_id = "stopRequestsForSchedule"
)]
#[get("/stop-requests/by-schedule/{schedule_id}")]
pub async fn stop_requests_for_schedule(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<StopRequestResponseBody>>> {
    let schedule_id = parse_uuid(&path, FieldName::new("scheduleId"))?;
    let requests = state
        .stop_requests
        .requests_for_schedule(schedule_id)
        .await?;
    Ok(web::Json(
        requests
            .into_iter()
            .map(StopRequestResponseBody::from)
            .collect(),
    ))
}

/// Overwrite a stop request's status.
#[utoipa::path(
    patch,
    path = "/api/v1/stop-requests/{id}/status",
    request_body = UpdateStopRequestStatusBody,
    params(("id" = uuid::Uuid, Path, description = "Stop request identifier")),
    responses(
        (status = 200, description = "Updated stop request", body = StopRequestResponseBody),
        (status = 400, description = "Unknown status label", body = Error),
        (status = 404, description = "No such stop request", body = Error)
    ),
    tags = ["stop-requests"],
    operation_id = "updateStopRequestStatus"
)]
#[patch("/stop-requests/{id}/status")]
pub async fn update_stop_request_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateStopRequestStatusBody>,
) -> ApiResult<web::Json<StopRequestResponseBody>> {
    let id = parse_uuid(&path, FieldName::new("id"))?;
    let status: StopRequestStatus = payload.status.parse().map_err(|_| {
        Error::invalid_request("status must be requested, confirmed, rejected, or completed")
            .with_details(json!({ "field": "status", "value": payload.status.clone() }))
    })?;

    let updated = state.stop_requests.update_status(id, status).await?;
    Ok(web::Json(StopRequestResponseBody::from(updated)))
}

#[cfg(test)]
mod tests {
    //! Handler coverage against mocked driving ports.

    use std::sync::Arc;

    use actix_web::{test as actix_test, App};
    use chrono::Utc;
    use serde_json::Value;
    use uuid::Uuid;

    use super::*;
    use crate::domain::ports::{
        MockLocationTracker, MockScheduleRegistry, MockStopRequestLedger, MockUserDirectory,
    };
    use crate::domain::UserId;

    fn state_with_ledger(ledger: MockStopRequestLedger) -> HttpState {
        HttpState::new(
            Arc::new(MockUserDirectory::new()),
            Arc::new(MockScheduleRegistry::new()),
            Arc::new(ledger),
            Arc::new(MockLocationTracker::new()),
        )
    }

    #[actix_web::test]
    async fn filing_a_request_returns_created() {
        let mut ledger = MockStopRequestLedger::new();
        ledger
            .expect_create_stop_request()
            .returning(|resident_id, schedule_id| {
                Ok(StopRequest::new(*resident_id, schedule_id, Utc::now()))
            });
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_ledger(ledger)))
                .service(create_stop_request),
        )
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/stop-requests")
            .set_json(CreateStopRequestBody {
                resident_id: UserId::random().to_string(),
                schedule_id: Uuid::new_v4().to_string(),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
        let body: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json body");
        assert_eq!(body.get("status").and_then(Value::as_str), Some("requested"));
    }

    #[actix_web::test]
    async fn lead_time_violations_surface_as_bad_request() {
        let mut ledger = MockStopRequestLedger::new();
        ledger.expect_create_stop_request().returning(|_, _| {
            Err(Error::invalid_request(
                "stop requests must be made at least one hour before departure",
            ))
        });
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_ledger(ledger)))
                .service(create_stop_request),
        )
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/stop-requests")
            .set_json(CreateStopRequestBody {
                resident_id: UserId::random().to_string(),
                schedule_id: Uuid::new_v4().to_string(),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unknown_status_labels_are_rejected_before_the_port() {
        let mut ledger = MockStopRequestLedger::new();
        ledger.expect_update_status().times(0);
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_ledger(ledger)))
                .service(update_stop_request_status),
        )
        .await;

        let request = actix_test::TestRequest::patch()
            .uri(&format!("/stop-requests/{}/status", Uuid::new_v4()))
            .set_json(UpdateStopRequestStatusBody {
                status: "cancelled".to_owned(),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn status_updates_round_trip() {
        let mut ledger = MockStopRequestLedger::new();
        ledger.expect_update_status().returning(|id, status| {
            Ok(StopRequest::from_parts(
                id,
                UserId::random(),
                Uuid::new_v4(),
                Utc::now(),
                status,
            ))
        });
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_ledger(ledger)))
                .service(update_stop_request_status),
        )
        .await;

        let request = actix_test::TestRequest::patch()
            .uri(&format!("/stop-requests/{}/status", Uuid::new_v4()))
            .set_json(UpdateStopRequestStatusBody {
                status: "confirmed".to_owned(),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert!(response.status().is_success());
        let body: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json body");
        assert_eq!(body.get("status").and_then(Value::as_str), Some("confirmed"));
    }
}
