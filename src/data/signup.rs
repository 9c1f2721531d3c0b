//! Signup data repository.
//!
//! Uniqueness of a signup per Discord user is enforced by the table's primary key, and
//! `create` relies on that constraint rather than a separate existence check so two
//! racing callbacks can never both succeed.

use chrono::Utc;
use sea_orm::{
    ActiveValue, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, SqlErr,
};

use crate::model::signup::{CreateSignupParam, SignupRecord};

/// Repository providing database operations for tournament signups.
pub struct SignupRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SignupRepository<'a> {
    /// Creates a new SignupRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Checks whether a Discord user has signed up.
    ///
    /// # Returns
    /// - `Ok(true)` - A signup exists for the user
    /// - `Ok(false)` - No signup exists
    /// - `Err(DbErr)` - Database error during query
    pub async fn exists(&self, discord_id: u64) -> Result<bool, DbErr> {
        let count = entity::prelude::Signup::find_by_id(discord_id.to_string())
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Records a signup if the Discord user has none yet.
    ///
    /// A single INSERT is issued; a primary key violation means another signup for the
    /// same user committed first.
    ///
    /// # Returns
    /// - `Ok(Some(SignupRecord))` - Signup recorded
    /// - `Ok(None)` - The user was already signed up, nothing was written
    /// - `Err(DbErr)` - Any other database error
    pub async fn create(&self, param: CreateSignupParam) -> Result<Option<SignupRecord>, DbErr> {
        let created_at = Utc::now();

        let result = entity::prelude::Signup::insert(entity::signup::ActiveModel {
            discord_id: ActiveValue::Set(param.discord_id.to_string()),
            osu_id: ActiveValue::Set(param.osu_id),
            country_code: ActiveValue::Set(param.country_code.clone()),
            created_at: ActiveValue::Set(created_at),
        })
        .exec_without_returning(self.db)
        .await;

        match result {
            Ok(_) => Ok(Some(SignupRecord {
                discord_id: param.discord_id,
                osu_id: param.osu_id,
                country_code: param.country_code,
                created_at,
            })),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Finds the signup for a Discord user.
    ///
    /// # Returns
    /// - `Ok(Some(SignupRecord))` - Signup found
    /// - `Ok(None)` - The user has not signed up
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_discord_id(&self, discord_id: u64) -> Result<Option<SignupRecord>, DbErr> {
        let entity = entity::prelude::Signup::find_by_id(discord_id.to_string())
            .one(self.db)
            .await?;

        Ok(entity.map(|e| SignupRecord {
            discord_id,
            osu_id: e.osu_id,
            country_code: e.country_code,
            created_at: e.created_at,
        }))
    }

    /// Counts all signups.
    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Signup::find().count(self.db).await
    }
}
