//! Signup factory for creating test signup rows.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test signups with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::signup::SignupFactory;
///
/// let signup = SignupFactory::new(&db)
///     .discord_id(123456789)
///     .osu_id(9001)
///     .build()
///     .await?;
/// ```
pub struct SignupFactory<'a> {
    db: &'a DatabaseConnection,
    discord_id: u64,
    osu_id: i64,
    country_code: String,
}

impl<'a> SignupFactory<'a> {
    /// Creates a new SignupFactory with default values.
    ///
    /// Defaults:
    /// - discord_id: auto-incremented
    /// - osu_id: `1_000_000 + discord_id`
    /// - country_code: `"AU"`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            discord_id: id,
            osu_id: 1_000_000 + id as i64,
            country_code: "AU".to_string(),
        }
    }

    pub fn discord_id(mut self, discord_id: u64) -> Self {
        self.discord_id = discord_id;
        self
    }

    pub fn osu_id(mut self, osu_id: i64) -> Self {
        self.osu_id = osu_id;
        self
    }

    pub fn country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = country_code.into();
        self
    }

    /// Inserts the signup row.
    ///
    /// # Returns
    /// - `Ok(Model)` - The inserted signup entity
    /// - `Err(DbErr)` - Insert failed, e.g. the Discord ID is already signed up
    pub async fn build(self) -> Result<entity::signup::Model, DbErr> {
        entity::signup::ActiveModel {
            discord_id: ActiveValue::Set(self.discord_id.to_string()),
            osu_id: ActiveValue::Set(self.osu_id),
            country_code: ActiveValue::Set(self.country_code),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a signup with default values.
pub async fn create_signup(db: &DatabaseConnection) -> Result<entity::signup::Model, DbErr> {
    SignupFactory::new(db).build().await
}
