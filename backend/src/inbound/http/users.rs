//! User account HTTP handlers.
//!
//! ```text
//! POST   /api/v1/users
//! GET    /api/v1/users?role=residents|drivers|all
//! GET    /api/v1/users/{id}
//! DELETE /api/v1/users/{id}
//! POST   /api/v1/login
//! ```

use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{CreateUserRequest, NewUserProfile, UserDirectory, UserRoleFilter};
use crate::domain::{Error, User, UserProfile, UserRole};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_user_id, FieldName};
use crate::inbound::http::ApiResult;

/// Request payload for registering an account.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequestBody {
    pub username: String,
    pub password: String,
    pub email: String,
    pub name: String,
    /// `resident` or `driver`; selects which extra fields are required.
    pub user_type: String,
    pub home_address: Option<String>,
    pub vehicle_type: Option<String>,
    pub license_plate: Option<String>,
}

/// Credentials payload for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequestBody {
    pub username: String,
    pub password: String,
}

/// Account payload returned by the user endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub name: String,
    pub user_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(format = "date-time")]
    pub location_updated_at: Option<String>,
}

impl From<User> for UserResponseBody {
    fn from(user: User) -> Self {
        let mut body = Self {
            id: user.id().to_string(),
            username: user.username().to_owned(),
            email: user.email().to_owned(),
            name: user.name().to_owned(),
            user_type: user.role().to_string(),
            home_address: None,
            vehicle_type: None,
            license_plate: None,
            current_status: None,
            current_location: None,
            location_updated_at: None,
        };
        match user.profile() {
            UserProfile::Resident(profile) => {
                body.home_address = Some(profile.home_address().to_owned());
            }
            UserProfile::Driver(profile) => {
                body.vehicle_type = Some(profile.vehicle_type().to_owned());
                body.license_plate = Some(profile.license_plate().to_owned());
                body.current_status = Some(profile.status().to_owned());
                body.current_location = profile.location().map(str::to_owned);
                body.location_updated_at = profile
                    .location_updated_at()
                    .map(|stamp| stamp.to_rfc3339());
            }
        }
        body
    }
}

fn missing_field(message: &str, field: &str) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field }))
}

fn parse_create_request(body: CreateUserRequestBody) -> Result<CreateUserRequest, Error> {
    let role: UserRole = body.user_type.parse().map_err(|_| {
        missing_field("userType must be resident or driver", "userType")
    })?;

    let profile = match role {
        UserRole::Resident => NewUserProfile::Resident {
            home_address: body.home_address.ok_or_else(|| {
                missing_field("home address required for residents", "homeAddress")
            })?,
        },
        UserRole::Driver => NewUserProfile::Driver {
            vehicle_type: body.vehicle_type.ok_or_else(|| {
                missing_field("vehicle type required for drivers", "vehicleType")
            })?,
            license_plate: body.license_plate.ok_or_else(|| {
                missing_field("license plate required for drivers", "licensePlate")
            })?,
        },
    };

    Ok(CreateUserRequest {
        username: body.username,
        password: body.password,
        email: body.email,
        name: body.name,
        profile,
    })
}

/// Query parameters for the account listing.
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    role: Option<String>,
}

fn parse_role_filter(query: &ListUsersQuery) -> Result<UserRoleFilter, Error> {
    match query.role.as_deref() {
        None | Some("all") => Ok(UserRoleFilter::All),
        Some("residents") => Ok(UserRoleFilter::Residents),
        Some("drivers") => Ok(UserRoleFilter::Drivers),
        Some(other) => Err(Error::invalid_request(format!(
            "role must be residents, drivers, or all, not {other}"
        ))),
    }
}

/// Register an account.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequestBody,
    responses(
        (status = 201, description = "Account created", body = UserResponseBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username or email already taken", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_create_request(payload.into_inner())?;
    let user = state.users.create_user(request).await?;
    Ok(HttpResponse::Created().json(UserResponseBody::from(user)))
}

/// List accounts, optionally filtered by role.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(("role" = Option<String>, Query, description = "residents, drivers, or all")),
    responses(
        (status = 200, description = "Accounts", body = [UserResponseBody]),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<ListUsersQuery>,
) -> ApiResult<web::Json<Vec<UserResponseBody>>> {
    let filter = parse_role_filter(&query)?;
    let users = state.users.list_users(filter).await?;
    Ok(web::Json(
        users.into_iter().map(UserResponseBody::from).collect(),
    ))
}

/// Fetch one account by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = uuid::Uuid, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Account", body = UserResponseBody),
        (status = 404, description = "No such account", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponseBody>> {
    let id = parse_user_id(&path, FieldName::new("id"))?;
    let user = state
        .users
        .get_user(&id)
        .await?
        .ok_or_else(|| Error::not_found(format!("user {id} not found")))?;
    Ok(web::Json(UserResponseBody::from(user)))
}

/// Delete an account and, through the store, everything it owns.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = uuid::Uuid, Path, description = "Account identifier")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 404, description = "No such account", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path, FieldName::new("id"))?;
    state.users.delete_user(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Verify credentials and return the account.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequestBody,
    responses(
        (status = 200, description = "Authenticated account", body = UserResponseBody),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["users"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequestBody>,
) -> ApiResult<web::Json<UserResponseBody>> {
    let user = state
        .users
        .authenticate(&payload.username, &payload.password)
        .await?;
    Ok(web::Json(UserResponseBody::from(user)))
}
