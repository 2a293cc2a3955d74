//! User directory domain service.
//!
//! Implements the [`UserDirectory`] driving port over a user repository:
//! account registration with Argon2id password hashing, lookups, listings,
//! credential verification, and account deletion.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::password::{hash_password, verify_password};
use crate::domain::persistence_error_mapping::map_user_repository_error;
use crate::domain::ports::{
    CreateUserRequest, NewUserProfile, UserDirectory, UserRepository, UserRoleFilter,
};
use crate::domain::user::{
    DriverProfile, NewUser, ResidentProfile, User, UserProfile, UserValidationError,
};
use crate::domain::{Error, UserId};

fn map_validation_error(error: UserValidationError) -> Error {
    let field = match error {
        UserValidationError::EmptyUsername => "username",
        UserValidationError::EmptyEmail | UserValidationError::InvalidEmail => "email",
        UserValidationError::EmptyName => "name",
        UserValidationError::EmptyHomeAddress => "homeAddress",
        UserValidationError::EmptyVehicleType => "vehicleType",
        UserValidationError::EmptyLicensePlate => "licensePlate",
    };
    Error::invalid_request(error.to_string()).with_details(json!({ "field": field }))
}

fn build_profile(profile: NewUserProfile) -> Result<UserProfile, Error> {
    match profile {
        NewUserProfile::Resident { home_address } => ResidentProfile::new(home_address)
            .map(UserProfile::Resident)
            .map_err(map_validation_error),
        NewUserProfile::Driver {
            vehicle_type,
            license_plate,
        } => DriverProfile::new(vehicle_type, license_plate)
            .map(UserProfile::Driver)
            .map_err(map_validation_error),
    }
}

/// User directory service backed by a user repository.
#[derive(Clone)]
pub struct UserDirectoryService<R> {
    users: Arc<R>,
}

impl<R> UserDirectoryService<R> {
    /// Create a new service with the user repository.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R> UserDirectory for UserDirectoryService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error> {
        let profile = build_profile(request.profile)?;
        let password_hash =
            hash_password(&request.password).map_err(|err| Error::internal(err.to_string()))?;

        let user = User::new(NewUser {
            username: request.username,
            password_hash,
            email: request.email,
            name: request.name,
            profile,
        })
        .map_err(map_validation_error)?;

        self.users
            .insert(&user)
            .await
            .map_err(map_user_repository_error)?;

        Ok(user)
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_repository_error)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        self.users
            .find_by_username(username)
            .await
            .map_err(map_user_repository_error)
    }

    async fn list_users(&self, filter: UserRoleFilter) -> Result<Vec<User>, Error> {
        self.users
            .list(filter)
            .await
            .map_err(map_user_repository_error)
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<User, Error> {
        let user = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_user_repository_error)?;

        // One generic failure for both unknown usernames and wrong passwords.
        match user {
            Some(user) if verify_password(password, user.password_hash()) => Ok(user),
            _ => Err(Error::unauthorized("invalid username or password")),
        }
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), Error> {
        let deleted = self
            .users
            .delete(id)
            .await
            .map_err(map_user_repository_error)?;

        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(format!("user {id} not found")))
        }
    }
}
