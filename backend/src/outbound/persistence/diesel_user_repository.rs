//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Accounts span two tables: the `users` base row plus a specialization row
//! in `residents` or `drivers` keyed by the same identity. Both rows are
//! written in one transaction so a failed insert leaves nothing behind.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{UserRepository, UserRepositoryError, UserRoleFilter};
use crate::domain::user::{
    DriverProfile, NewUser, ResidentProfile, User, UserId, UserProfile, UserRole,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    DriverRow, NewDriverRow, NewResidentRow, NewUserRow, ResidentRow, UserRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{drivers, residents, users};

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_user_pool_error(error: PoolError) -> UserRepositoryError {
    map_pool_error(error, UserRepositoryError::connection)
}

fn map_user_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_diesel_error(
        error,
        UserRepositoryError::conflict,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

fn invariant_error(message: impl std::fmt::Display) -> UserRepositoryError {
    UserRepositoryError::query(message.to_string())
}

/// Convert a base row plus resident specialization into a domain account.
fn resident_to_user(row: UserRow, resident: ResidentRow) -> Result<User, UserRepositoryError> {
    let profile = ResidentProfile::new(resident.home_address).map_err(invariant_error)?;
    User::from_parts(
        UserId::from_uuid(row.id),
        NewUser {
            username: row.username,
            password_hash: row.password_hash,
            email: row.email,
            name: row.name,
            profile: UserProfile::Resident(profile),
        },
    )
    .map_err(invariant_error)
}

/// Convert a base row plus driver specialization into a domain account.
fn driver_to_user(row: UserRow, driver: DriverRow) -> Result<User, UserRepositoryError> {
    let profile = DriverProfile::from_parts(
        driver.vehicle_type,
        driver.license_plate,
        driver.current_status,
        driver.current_location,
        driver.location_updated_at,
    )
    .map_err(invariant_error)?;
    User::from_parts(
        UserId::from_uuid(row.id),
        NewUser {
            username: row.username,
            password_hash: row.password_hash,
            email: row.email,
            name: row.name,
            profile: UserProfile::Driver(profile),
        },
    )
    .map_err(invariant_error)
}

impl DieselUserRepository {
    /// Attach the specialization row to a base row already loaded.
    async fn complete_user(
        conn: &mut AsyncPgConnection,
        row: UserRow,
    ) -> Result<User, UserRepositoryError> {
        let role: UserRole = row.user_type.parse().map_err(invariant_error)?;
        match role {
            UserRole::Resident => {
                let resident = residents::table
                    .find(row.id)
                    .select(ResidentRow::as_select())
                    .first::<ResidentRow>(conn)
                    .await
                    .optional()
                    .map_err(map_user_diesel_error)?
                    .ok_or_else(|| invariant_error("resident record missing for account"))?;
                resident_to_user(row, resident)
            }
            UserRole::Driver => {
                let driver = drivers::table
                    .find(row.id)
                    .select(DriverRow::as_select())
                    .first::<DriverRow>(conn)
                    .await
                    .optional()
                    .map_err(map_user_diesel_error)?
                    .ok_or_else(|| invariant_error("driver record missing for account"))?;
                driver_to_user(row, driver)
            }
        }
    }

    async fn find_base_row(
        &self,
        lookup: impl FnOnce() -> users::BoxedQuery<'static, diesel::pg::Pg>,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;

        let row = lookup()
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_user_diesel_error)?;

        match row {
            Some(row) => Self::complete_user(&mut conn, row).await.map(Some),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;

        let base_row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username(),
            password_hash: user.password_hash(),
            email: user.email(),
            name: user.name(),
            user_type: user.role().as_str(),
        };

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::insert_into(users::table)
                    .values(&base_row)
                    .execute(conn)
                    .await?;

                match user.profile() {
                    UserProfile::Resident(profile) => {
                        let row = NewResidentRow {
                            user_id: *user.id().as_uuid(),
                            home_address: profile.home_address(),
                        };
                        diesel::insert_into(residents::table)
                            .values(&row)
                            .execute(conn)
                            .await?;
                    }
                    UserProfile::Driver(profile) => {
                        let row = NewDriverRow {
                            user_id: *user.id().as_uuid(),
                            vehicle_type: profile.vehicle_type(),
                            license_plate: profile.license_plate(),
                            current_status: profile.status(),
                            current_location: profile.location(),
                            location_updated_at: profile.location_updated_at(),
                        };
                        diesel::insert_into(drivers::table)
                            .values(&row)
                            .execute(conn)
                            .await?;
                    }
                }

                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_user_diesel_error)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let id = *id.as_uuid();
        self.find_base_row(move || users::table.find(id).into_boxed())
            .await
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        let username = username.to_owned();
        self.find_base_row(move || {
            users::table
                .filter(users::username.eq(username))
                .into_boxed()
        })
        .await
    }

    async fn list(&self, filter: UserRoleFilter) -> Result<Vec<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;

        let mut result = Vec::new();

        if matches!(filter, UserRoleFilter::All | UserRoleFilter::Residents) {
            let rows: Vec<(UserRow, ResidentRow)> = users::table
                .inner_join(residents::table)
                .select((UserRow::as_select(), ResidentRow::as_select()))
                .load(&mut conn)
                .await
                .map_err(map_user_diesel_error)?;
            for (row, resident) in rows {
                result.push(resident_to_user(row, resident)?);
            }
        }

        if matches!(filter, UserRoleFilter::All | UserRoleFilter::Drivers) {
            let rows: Vec<(UserRow, DriverRow)> = users::table
                .inner_join(drivers::table)
                .select((UserRow::as_select(), DriverRow::as_select()))
                .load(&mut conn)
                .await
                .map_err(map_user_diesel_error)?;
            for (row, driver) in rows {
                result.push(driver_to_user(row, driver)?);
            }
        }

        Ok(result)
    }

    async fn set_driver_location(
        &self,
        id: &UserId,
        location: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;

        diesel::update(drivers::table.find(id.as_uuid()))
            .set((
                drivers::current_location.eq(Some(location)),
                drivers::location_updated_at.eq(Some(updated_at)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_user_diesel_error)
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;

        // Dependent schedule and stop request rows go with the account via
        // ON DELETE CASCADE in the migrations.
        let deleted: usize = diesel::delete(users::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_user_diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion and error mapping.

    use rstest::rstest;

    use super::*;

    fn base_row(user_type: &str) -> UserRow {
        let now = Utc::now();
        UserRow {
            id: Uuid::new_v4(),
            username: "resident_jane".to_owned(),
            password_hash: "digest".to_owned(),
            email: "jane@example.com".to_owned(),
            name: "Jane Resident".to_owned(),
            user_type: user_type.to_owned(),
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn resident_rows_convert_to_domain_accounts() {
        let row = base_row("resident");
        let resident = ResidentRow {
            user_id: row.id,
            home_address: "123 Main Street".to_owned(),
        };

        let user = resident_to_user(row, resident).expect("valid conversion");

        assert_eq!(user.role(), UserRole::Resident);
        assert_eq!(
            user.as_resident().expect("resident payload").home_address(),
            "123 Main Street"
        );
    }

    #[rstest]
    fn driver_rows_preserve_location_fields() {
        let row = base_row("driver");
        let reported_at = Utc::now();
        let driver = DriverRow {
            user_id: row.id,
            vehicle_type: "Bread Van".to_owned(),
            license_plate: "BREAD123".to_owned(),
            current_status: "on-route".to_owned(),
            current_location: Some("Main Street".to_owned()),
            location_updated_at: Some(reported_at),
        };

        let user = driver_to_user(row, driver).expect("valid conversion");

        let profile = user.as_driver().expect("driver payload");
        assert_eq!(profile.status(), "on-route");
        assert_eq!(profile.location(), Some("Main Street"));
        assert_eq!(profile.location_updated_at(), Some(reported_at));
    }

    #[rstest]
    fn blank_stored_addresses_are_rejected() {
        let row = base_row("resident");
        let resident = ResidentRow {
            user_id: row.id,
            home_address: "  ".to_owned(),
        };

        let error = resident_to_user(row, resident).expect_err("invalid row must fail");
        assert!(matches!(error, UserRepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let mapped = map_user_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(mapped, UserRepositoryError::Connection { .. }));
    }
}
