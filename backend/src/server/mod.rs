//! HTTP server assembly: wires persistence adapters into domain services and
//! mounts the REST endpoints.

pub mod config;

use std::io;
use std::sync::Arc;

use actix_web::{web, App, HttpServer, Scope};
use mockable::DefaultClock;
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::{
    LocationTrackerService, ScheduleRegistryService, StopRequestLedgerService,
    UserDirectoryService,
};
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{locations, schedules, stop_requests, users};
use crate::outbound::persistence::{
    run_pending_migrations, DbPool, DieselScheduleRepository, DieselStopRequestRepository,
    DieselUserRepository, PoolConfig,
};

pub use config::{ConfigError, ServerConfig};

/// Build the HTTP state from database-backed services.
pub fn build_state(pool: &DbPool) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let schedules = Arc::new(DieselScheduleRepository::new(pool.clone()));
    let stop_requests = Arc::new(DieselStopRequestRepository::new(pool.clone()));
    let clock = Arc::new(DefaultClock);

    HttpState::new(
        Arc::new(UserDirectoryService::new(users.clone())),
        Arc::new(ScheduleRegistryService::new(
            users.clone(),
            schedules.clone(),
            clock.clone(),
        )),
        Arc::new(StopRequestLedgerService::new(
            users.clone(),
            schedules,
            stop_requests,
            clock.clone(),
        )),
        Arc::new(LocationTrackerService::new(users, clock)),
    )
}

/// Mount every REST endpoint under `/api/v1`.
///
/// Fixed-path schedule routes register ahead of the `{id}` route so
/// `/schedules/upcoming` is not captured as an identifier.
pub fn api_scope(state: HttpState) -> Scope {
    web::scope("/api/v1")
        .app_data(web::Data::new(state))
        .service(users::create_user)
        .service(users::list_users)
        .service(users::login)
        .service(users::get_user)
        .service(users::delete_user)
        .service(schedules::create_schedule)
        .service(schedules::upcoming_schedules)
        .service(schedules::schedules_for_street)
        .service(schedules::schedules_for_driver)
        .service(schedules::get_schedule)
        .service(stop_requests::create_stop_request)
        .service(stop_requests::stop_requests_for_resident)
        .service(stop_requests::stop_requests_for_schedule)
        .service(stop_requests::update_stop_request_status)
        .service(locations::list_driver_locations)
        .service(locations::update_driver_location)
        .service(locations::get_driver_location)
}

/// Run migrations, build the pool and services, and serve until shutdown.
pub async fn run(config: ServerConfig) -> io::Result<()> {
    run_pending_migrations(config.database_url())
        .await
        .map_err(|err| io::Error::other(format!("apply migrations: {err}")))?;

    let pool = DbPool::new(PoolConfig::new(config.database_url()))
        .await
        .map_err(|err| io::Error::other(format!("create database pool: {err}")))?;

    let state = build_state(&pool);
    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(server_health_state.clone())
            .service(api_scope(state.clone()))
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(config.bind_addr())?;

    info!(addr = %config.bind_addr(), "server listening");
    health_state.mark_ready();
    server.run().await
}

#[cfg(test)]
mod tests {
    //! Route registration coverage against mocked ports.

    use actix_web::{test as actix_test, App};

    use super::*;
    use crate::domain::ports::{
        MockLocationTracker, MockScheduleRegistry, MockStopRequestLedger, MockUserDirectory,
    };

    fn mock_state() -> HttpState {
        HttpState::new(
            Arc::new(MockUserDirectory::new()),
            Arc::new(MockScheduleRegistry::new()),
            Arc::new(MockStopRequestLedger::new()),
            Arc::new(MockLocationTracker::new()),
        )
    }

    #[actix_web::test]
    async fn unknown_routes_fall_through_to_404() {
        let app =
            actix_test::init_service(App::new().service(api_scope(mock_state()))).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/nonexistent")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn listing_users_is_routed() {
        let mut users = MockUserDirectory::new();
        users.expect_list_users().returning(|_| Ok(Vec::new()));
        let state = HttpState::new(
            Arc::new(users),
            Arc::new(MockScheduleRegistry::new()),
            Arc::new(MockStopRequestLedger::new()),
            Arc::new(MockLocationTracker::new()),
        );
        let app = actix_test::init_service(App::new().service(api_scope(state))).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/users").to_request(),
        )
        .await;

        assert!(response.status().is_success());
    }
}
