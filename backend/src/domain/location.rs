//! Driver location snapshot returned to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::{DriverProfile, User, UserId};

/// Point-in-time view of a driver's reported position.
///
/// A transient projection assembled per call; the store remains the owner of
/// the underlying account record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverLocationSnapshot {
    pub driver_id: UserId,
    pub driver_name: String,
    pub location: Option<String>,
    pub location_updated_at: Option<DateTime<Utc>>,
    pub vehicle_type: String,
    pub license_plate: String,
}

impl DriverLocationSnapshot {
    /// Project a snapshot from a driver account.
    pub fn from_driver(user: &User, profile: &DriverProfile) -> Self {
        Self {
            driver_id: *user.id(),
            driver_name: user.name().to_owned(),
            location: profile.location().map(str::to_owned),
            location_updated_at: profile.location_updated_at(),
            vehicle_type: profile.vehicle_type().to_owned(),
            license_plate: profile.license_plate().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;
    use crate::domain::user::{NewUser, UserProfile};

    #[rstest]
    fn snapshot_carries_absent_markers_before_first_report() {
        let profile = DriverProfile::new("Bread Van", "BREAD123").expect("valid driver");
        let user = User::new(NewUser {
            username: "driver_john".to_owned(),
            password_hash: "digest".to_owned(),
            email: "john@breadvan.example".to_owned(),
            name: "John Driver".to_owned(),
            profile: UserProfile::Driver(profile.clone()),
        })
        .expect("valid user");

        let snapshot = DriverLocationSnapshot::from_driver(&user, &profile);

        assert_eq!(snapshot.driver_name, "John Driver");
        assert!(snapshot.location.is_none());
        assert!(snapshot.location_updated_at.is_none());
        assert_eq!(snapshot.vehicle_type, "Bread Van");
        assert_eq!(snapshot.license_plate, "BREAD123");
    }
}
