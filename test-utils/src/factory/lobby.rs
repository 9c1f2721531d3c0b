//! Lobby factory for creating qualifier lobbies and placing players in them.

use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Factory for creating test lobbies.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::lobby::LobbyFactory;
///
/// let lobby = LobbyFactory::new(&db).lobby_id(3).build().await?;
/// ```
pub struct LobbyFactory<'a> {
    db: &'a DatabaseConnection,
    lobby_id: i32,
    starts_at: chrono::DateTime<Utc>,
}

impl<'a> LobbyFactory<'a> {
    /// Creates a new LobbyFactory with default values.
    ///
    /// Defaults:
    /// - lobby_id: auto-incremented
    /// - starts_at: one day from now
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            lobby_id: next_id() as i32,
            starts_at: Utc::now() + Duration::days(1),
        }
    }

    pub fn lobby_id(mut self, lobby_id: i32) -> Self {
        self.lobby_id = lobby_id;
        self
    }

    pub fn starts_at(mut self, starts_at: chrono::DateTime<Utc>) -> Self {
        self.starts_at = starts_at;
        self
    }

    pub async fn build(self) -> Result<entity::lobby::Model, DbErr> {
        entity::lobby::ActiveModel {
            lobby_id: ActiveValue::Set(self.lobby_id),
            starts_at: ActiveValue::Set(self.starts_at),
        }
        .insert(self.db)
        .await
    }
}

/// Places a signed-up player in a lobby, bypassing the capacity check.
///
/// # Returns
/// - `Ok(Model)` - The inserted lobby signup
/// - `Err(DbErr)` - The player or lobby does not exist, or the player is already placed
pub async fn place_in_lobby(
    db: &DatabaseConnection,
    discord_id: u64,
    lobby_id: i32,
) -> Result<entity::lobby_signup::Model, DbErr> {
    entity::lobby_signup::ActiveModel {
        discord_id: ActiveValue::Set(discord_id.to_string()),
        lobby_id: ActiveValue::Set(lobby_id),
    }
    .insert(db)
    .await
}
