//! User account data model.
//!
//! One identity record with a role-tagged specialization payload: residents
//! carry a home address, drivers carry vehicle details plus their last
//! reported location. The discriminator is fixed at construction and never
//! changes afterwards.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default status assigned to a newly registered driver.
pub const DEFAULT_DRIVER_STATUS: &str = "available";

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    EmptyEmail,
    InvalidEmail,
    EmptyName,
    EmptyHomeAddress,
    EmptyVehicleType,
    EmptyLicensePlate,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must contain an @ sign"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyHomeAddress => write!(f, "home address must not be empty"),
            Self::EmptyVehicleType => write!(f, "vehicle type must not be empty"),
            Self::EmptyLicensePlate => write!(f, "license plate must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable account identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID, e.g. one read back from the store.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account role discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Resident,
    Driver,
}

impl UserRole {
    /// Stable lowercase label used in storage and payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Resident => "resident",
            Self::Driver => "driver",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "resident" => Ok(Self::Resident),
            "driver" => Ok(Self::Driver),
            other => Err(format!("unknown user role: {other}")),
        }
    }
}

/// Resident specialization payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidentProfile {
    home_address: String,
}

impl ResidentProfile {
    /// Validate and construct a resident profile.
    pub fn new(home_address: impl Into<String>) -> Result<Self, UserValidationError> {
        let home_address = home_address.into();
        if home_address.trim().is_empty() {
            return Err(UserValidationError::EmptyHomeAddress);
        }
        Ok(Self { home_address })
    }

    /// Street address where the resident wants the van to stop.
    pub fn home_address(&self) -> &str {
        &self.home_address
    }
}

/// Driver specialization payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverProfile {
    vehicle_type: String,
    license_plate: String,
    status: String,
    location: Option<String>,
    location_updated_at: Option<DateTime<Utc>>,
}

impl DriverProfile {
    /// Validate and construct a driver profile with default status and no
    /// reported location.
    pub fn new(
        vehicle_type: impl Into<String>,
        license_plate: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let vehicle_type = vehicle_type.into();
        if vehicle_type.trim().is_empty() {
            return Err(UserValidationError::EmptyVehicleType);
        }
        let license_plate = license_plate.into();
        if license_plate.trim().is_empty() {
            return Err(UserValidationError::EmptyLicensePlate);
        }
        Ok(Self {
            vehicle_type,
            license_plate,
            status: DEFAULT_DRIVER_STATUS.to_owned(),
            location: None,
            location_updated_at: None,
        })
    }

    /// Rebuild a driver profile from stored parts without re-defaulting.
    pub fn from_parts(
        vehicle_type: String,
        license_plate: String,
        status: String,
        location: Option<String>,
        location_updated_at: Option<DateTime<Utc>>,
    ) -> Result<Self, UserValidationError> {
        let mut profile = Self::new(vehicle_type, license_plate)?;
        profile.status = status;
        profile.location = location;
        profile.location_updated_at = location_updated_at;
        Ok(profile)
    }

    /// Kind of vehicle the driver operates.
    pub fn vehicle_type(&self) -> &str {
        &self.vehicle_type
    }

    /// Registration plate of the vehicle.
    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    /// Free-text availability status.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Last reported location, if the driver has reported one.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Timestamp of the last location report.
    pub fn location_updated_at(&self) -> Option<DateTime<Utc>> {
        self.location_updated_at
    }

    /// Overwrite the reported location and its timestamp.
    pub fn set_location(&mut self, location: impl Into<String>, updated_at: DateTime<Utc>) {
        self.location = Some(location.into());
        self.location_updated_at = Some(updated_at);
    }
}

/// Role-tagged specialization payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserProfile {
    Resident(ResidentProfile),
    Driver(DriverProfile),
}

impl UserProfile {
    /// Role implied by the payload variant.
    pub fn role(&self) -> UserRole {
        match self {
            Self::Resident(_) => UserRole::Resident,
            Self::Driver(_) => UserRole::Driver,
        }
    }
}

/// Draft carrying the validated parts of a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub name: String,
    pub profile: UserProfile,
}

/// A registered account.
///
/// ## Invariants
/// - `username`, `email`, and `name` are non-empty; `email` contains `@`.
/// - The role discriminator is derived from the profile payload and cannot
///   change after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    password_hash: String,
    email: String,
    name: String,
    profile: UserProfile,
}

impl User {
    /// Build a new account with a freshly generated identifier.
    pub fn new(draft: NewUser) -> Result<Self, UserValidationError> {
        Self::from_parts(UserId::random(), draft)
    }

    /// Rebuild an account from stored parts, re-checking the base invariants.
    pub fn from_parts(id: UserId, draft: NewUser) -> Result<Self, UserValidationError> {
        if draft.username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if draft.email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !draft.email.contains('@') {
            return Err(UserValidationError::InvalidEmail);
        }
        if draft.name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self {
            id,
            username: draft.username,
            password_hash: draft.password_hash,
            email: draft.email,
            name: draft.name,
            profile: draft.profile,
        })
    }

    /// Stable account identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Unique login name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Stored password digest.
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Unique contact email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Role discriminator.
    pub fn role(&self) -> UserRole {
        self.profile.role()
    }

    /// Specialization payload.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Resident payload, when the account is a resident.
    pub fn as_resident(&self) -> Option<&ResidentProfile> {
        match &self.profile {
            UserProfile::Resident(profile) => Some(profile),
            UserProfile::Driver(_) => None,
        }
    }

    /// Driver payload, when the account is a driver.
    pub fn as_driver(&self) -> Option<&DriverProfile> {
        match &self.profile {
            UserProfile::Driver(profile) => Some(profile),
            UserProfile::Resident(_) => None,
        }
    }
}
