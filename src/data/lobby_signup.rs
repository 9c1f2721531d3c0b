//! Qualifier lobby signup data repository.
//!
//! A player holds at most one lobby signup (the table's primary key is the Discord ID),
//! and a lobby never holds more than `LOBBY_CAPACITY` players. Joining and switching
//! are the same upsert, with the capacity check inside the statement, so two players
//! racing for the last spot cannot both get it.

use sea_orm::{
    sea_query::Query, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Statement,
};

use crate::model::signup::SignupRecord;

/// Players per qualifier lobby.
pub const LOBBY_CAPACITY: u64 = 16;

const JOIN_LOBBY_SQL: &str = "\
INSERT INTO lobby_signup (discord_id, lobby_id) \
SELECT ?, ? WHERE (SELECT COUNT(*) FROM lobby_signup WHERE lobby_id = ?) < ? \
ON CONFLICT (discord_id) DO UPDATE SET lobby_id = excluded.lobby_id \
WHERE lobby_signup.lobby_id <> excluded.lobby_id";

/// Repository providing database operations for qualifier lobby signups.
pub struct LobbySignupRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LobbySignupRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Checks whether a lobby with the given ID exists.
    pub async fn lobby_exists(&self, lobby_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Lobby::find_by_id(lobby_id)
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets the lobby a player is signed up to.
    ///
    /// # Returns
    /// - `Ok(Some(lobby_id))` - The player is in a lobby
    /// - `Ok(None)` - The player is in no lobby
    /// - `Err(DbErr)` - Database error during query
    pub async fn current_lobby(&self, discord_id: u64) -> Result<Option<i32>, DbErr> {
        let entity = entity::prelude::LobbySignup::find_by_id(discord_id.to_string())
            .one(self.db)
            .await?;

        Ok(entity.map(|e| e.lobby_id))
    }

    /// Puts a player in a lobby, moving them out of any other lobby.
    ///
    /// # Returns
    /// - `Ok(true)` - The player is now in the lobby
    /// - `Ok(false)` - Nothing changed: the lobby is full or the player was already in it
    /// - `Err(DbErr)` - Database error, including unknown players or lobbies
    pub async fn join(&self, discord_id: u64, lobby_id: i32) -> Result<bool, DbErr> {
        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            JOIN_LOBBY_SQL,
            [
                discord_id.to_string().into(),
                lobby_id.into(),
                lobby_id.into(),
                (LOBBY_CAPACITY as i64).into(),
            ],
        );

        let result = self.db.execute_raw(stmt).await?;

        Ok(result.rows_affected() > 0)
    }

    /// Removes a player from a lobby.
    ///
    /// # Returns
    /// - `Ok(true)` - The player was in the lobby and has been removed
    /// - `Ok(false)` - The player was not in that lobby
    /// - `Err(DbErr)` - Database error during delete
    pub async fn leave(&self, discord_id: u64, lobby_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::LobbySignup::delete_many()
            .filter(entity::lobby_signup::Column::DiscordId.eq(discord_id.to_string()))
            .filter(entity::lobby_signup::Column::LobbyId.eq(lobby_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets registered players who are not in any lobby, oldest signup first.
    pub async fn unsigned(&self) -> Result<Vec<SignupRecord>, DbErr> {
        let placed = Query::select()
            .column(entity::lobby_signup::Column::DiscordId)
            .from(entity::prelude::LobbySignup)
            .to_owned();

        let entities = entity::prelude::Signup::find()
            .filter(entity::signup::Column::DiscordId.not_in_subquery(placed))
            .order_by_asc(entity::signup::Column::CreatedAt)
            .order_by_asc(entity::signup::Column::DiscordId)
            .all(self.db)
            .await?;

        entities
            .into_iter()
            .map(|e| {
                let discord_id = e.discord_id.parse::<u64>().map_err(|err| {
                    DbErr::Custom(format!("Invalid discord_id {}: {}", e.discord_id, err))
                })?;

                Ok(SignupRecord {
                    discord_id,
                    osu_id: e.osu_id,
                    country_code: e.country_code,
                    created_at: e.created_at,
                })
            })
            .collect()
    }
}
