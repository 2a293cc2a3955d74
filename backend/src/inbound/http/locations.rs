//! Driver location HTTP handlers.
//!
//! ```text
//! PUT /api/v1/drivers/{driver_id}/location
//! GET /api/v1/drivers/{driver_id}/location
//! GET /api/v1/drivers/locations
//! ```

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::LocationTracker;
use crate::domain::{DriverLocationSnapshot, Error};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_user_id, FieldName};
use crate::inbound::http::ApiResult;

/// Request payload for reporting a driver position.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationRequestBody {
    pub location: String,
}

/// Location snapshot payload returned by the tracker endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriverLocationResponseBody {
    #[schema(format = "uuid")]
    pub driver_id: String,
    pub driver_name: String,
    pub current_location: Option<String>,
    /// RFC 3339 timestamp of the last report; `null` when never reported.
    #[schema(format = "date-time")]
    pub location_updated_at: Option<String>,
    pub vehicle_type: String,
    pub license_plate: String,
}

impl From<DriverLocationSnapshot> for DriverLocationResponseBody {
    fn from(snapshot: DriverLocationSnapshot) -> Self {
        Self {
            driver_id: snapshot.driver_id.to_string(),
            driver_name: snapshot.driver_name,
            current_location: snapshot.location,
            location_updated_at: snapshot
                .location_updated_at
                .map(|stamp| stamp.to_rfc3339()),
            vehicle_type: snapshot.vehicle_type,
            license_plate: snapshot.license_plate,
        }
    }
}

/// Report a driver's current position.
#[utoipa::path(
    put,
    path = "/api/v1/drivers/{driver_id}/location",
    request_body = UpdateLocationRequestBody,
    params(("driver_id" = uuid::Uuid, Path, description = "Driver account identifier")),
    responses(
        (status = 200, description = "Updated snapshot", body = DriverLocationResponseBody),
        (status = 404, description = "Driver not found", body = Error)
    ),
    tags = ["locations"],
    operation_id = "updateDriverLocation"
)]
#[put("/drivers/{driver_id}/location")]
pub async fn update_driver_location(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateLocationRequestBody>,
) -> ApiResult<web::Json<DriverLocationResponseBody>> {
    let driver_id = parse_user_id(&path, FieldName::new("driverId"))?;
    let snapshot = state
        .locations
        .update_location(&driver_id, payload.into_inner().location)
        .await?;
    Ok(web::Json(DriverLocationResponseBody::from(snapshot)))
}

/// Snapshot of a driver's last reported position.
#[utoipa::path(
    get,
    path = "/api/v1/drivers/{driver_id}/location",
    params(("driver_id" = uuid::Uuid, Path, description = "Driver account identifier")),
    responses(
        (status = 200, description = "Location snapshot", body = DriverLocationResponseBody),
        (status = 404, description = "Driver not found", body = Error)
    ),
    tags = ["locations"],
    operation_id = "getDriverLocation"
)]
#[get("/drivers/{driver_id}/location")]
pub async fn get_driver_location(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DriverLocationResponseBody>> {
    let driver_id = parse_user_id(&path, FieldName::new("driverId"))?;
    let snapshot = state.locations.get_location(&driver_id).await?;
    Ok(web::Json(DriverLocationResponseBody::from(snapshot)))
}

/// Snapshots for every driver that has reported a position.
#[utoipa::path(
    get,
    path = "/api/v1/drivers/locations",
    responses(
        (status = 200, description = "Reported locations", body = [DriverLocationResponseBody])
    ),
    tags = ["locations"],
    operation_id = "listDriverLocations"
)]
#[get("/drivers/locations")]
pub async fn list_driver_locations(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<DriverLocationResponseBody>>> {
    let snapshots = state.locations.list_reported_locations().await?;
    Ok(web::Json(
        snapshots
            .into_iter()
            .map(DriverLocationResponseBody::from)
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    //! Handler coverage against mocked driving ports.

    use std::sync::Arc;

    use actix_web::{test as actix_test, App};
    use chrono::Utc;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{
        MockLocationTracker, MockScheduleRegistry, MockStopRequestLedger, MockUserDirectory,
    };
    use crate::domain::UserId;

    fn state_with_locations(locations: MockLocationTracker) -> HttpState {
        HttpState::new(
            Arc::new(MockUserDirectory::new()),
            Arc::new(MockScheduleRegistry::new()),
            Arc::new(MockStopRequestLedger::new()),
            Arc::new(locations),
        )
    }

    fn snapshot_for(driver_id: UserId, location: Option<&str>) -> DriverLocationSnapshot {
        DriverLocationSnapshot {
            driver_id,
            driver_name: "John Driver".to_owned(),
            location: location.map(str::to_owned),
            location_updated_at: location.map(|_| Utc::now()),
            vehicle_type: "Bread Van".to_owned(),
            license_plate: "BREAD123".to_owned(),
        }
    }

    #[actix_web::test]
    async fn updates_echo_the_new_snapshot() {
        let mut locations = MockLocationTracker::new();
        locations
            .expect_update_location()
            .returning(|driver_id, location| Ok(snapshot_for(*driver_id, Some(location.as_str()))));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_locations(locations)))
                .service(update_driver_location),
        )
        .await;

        let request = actix_test::TestRequest::put()
            .uri(&format!("/drivers/{}/location", UserId::random()))
            .set_json(UpdateLocationRequestBody {
                location: "Main Street".to_owned(),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert!(response.status().is_success());
        let body: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json body");
        assert_eq!(
            body.get("currentLocation").and_then(Value::as_str),
            Some("Main Street")
        );
    }

    #[actix_web::test]
    async fn never_reported_drivers_serialise_null_markers() {
        let mut locations = MockLocationTracker::new();
        locations
            .expect_get_location()
            .returning(|driver_id| Ok(snapshot_for(*driver_id, None)));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_locations(locations)))
                .service(get_driver_location),
        )
        .await;

        let request = actix_test::TestRequest::get()
            .uri(&format!("/drivers/{}/location", UserId::random()))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert!(response.status().is_success());
        let body: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json body");
        assert!(body
            .get("currentLocation")
            .expect("field present")
            .is_null());
        assert!(body
            .get("locationUpdatedAt")
            .expect("field present")
            .is_null());
    }

    #[actix_web::test]
    async fn missing_driver_maps_to_not_found() {
        let mut locations = MockLocationTracker::new();
        locations
            .expect_get_location()
            .returning(|driver_id| Err(Error::not_found(format!("driver {driver_id} not found"))));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_locations(locations)))
                .service(get_driver_location),
        )
        .await;

        let request = actix_test::TestRequest::get()
            .uri(&format!("/drivers/{}/location", UserId::random()))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
