use crate::data::lobby_signup::{LobbySignupRepository, LOBBY_CAPACITY};
use sea_orm::{DatabaseConnection, DbErr};
use test_utils::{
    builder::TestBuilder,
    factory::{
        lobby::{place_in_lobby, LobbyFactory},
        signup::SignupFactory,
    },
};

mod current_lobby;
mod join;
mod leave;
mod lobby_exists;
mod unsigned;

/// Signs up `count` players and places them all in a lobby.
///
/// Their Discord IDs start at `100_000 * lobby_id` so they never collide with the
/// small IDs tests use for the player under test.
async fn seat_players(db: &DatabaseConnection, lobby_id: i32, count: u64) -> Result<(), DbErr> {
    let first = 100_000 * lobby_id as u64;
    for discord_id in first..first + count {
        SignupFactory::new(db).discord_id(discord_id).build().await?;
        place_in_lobby(db, discord_id, lobby_id).await?;
    }

    Ok(())
}
