//! Qualifier lobby signups.
//!
//! Registered players pick one qualifier lobby with `!lobby <id>`. Asking for the lobby
//! they are already in takes them out of it; asking for another moves them.

use sea_orm::DatabaseConnection;

use crate::{
    data::{lobby_signup::LobbySignupRepository, signup::SignupRepository},
    error::lobby::LobbyError,
    model::signup::SignupRecord,
};

/// Result of a successful `!lobby` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LobbyChange {
    Joined(i32),
    Left(i32),
    Switched { from: i32, to: i32 },
}

impl LobbyChange {
    /// Confirmation shown to the player.
    pub fn message(&self) -> String {
        match self {
            Self::Joined(lobby_id) => format!("Added you to lobby {lobby_id}."),
            Self::Left(lobby_id) => format!("Removed you from lobby {lobby_id}."),
            Self::Switched { to, .. } => format!("Switched you to lobby {to}."),
        }
    }
}

#[derive(Clone)]
pub struct LobbyService {
    db: DatabaseConnection,
}

impl LobbyService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Joins, leaves or switches to a lobby for a registered player.
    ///
    /// # Returns
    /// - `Ok(LobbyChange)` - What happened to the player's lobby signup
    /// - `Err(LobbyError::NotRegistered)` - The player is not in the signup ledger
    /// - `Err(LobbyError::UnknownLobby)` - No lobby has that ID
    /// - `Err(LobbyError::Full)` - The lobby has no free spots
    /// - `Err(LobbyError::DbErr)` - Database error
    pub async fn toggle(&self, discord_id: u64, lobby_id: i32) -> Result<LobbyChange, LobbyError> {
        if !SignupRepository::new(&self.db).exists(discord_id).await? {
            return Err(LobbyError::NotRegistered(discord_id));
        }

        let repo = LobbySignupRepository::new(&self.db);
        if !repo.lobby_exists(lobby_id).await? {
            return Err(LobbyError::UnknownLobby(lobby_id));
        }

        let change = match repo.current_lobby(discord_id).await? {
            Some(current) if current == lobby_id => {
                repo.leave(discord_id, lobby_id).await?;
                LobbyChange::Left(lobby_id)
            }
            current => {
                if !repo.join(discord_id, lobby_id).await? {
                    return Err(LobbyError::Full(lobby_id));
                }

                match current {
                    Some(from) => LobbyChange::Switched { from, to: lobby_id },
                    None => LobbyChange::Joined(lobby_id),
                }
            }
        };

        tracing::info!("Lobby signup for {}: {:?}", discord_id, change);

        Ok(change)
    }

    /// Gets registered players who have not picked a lobby.
    pub async fn unsigned(&self) -> Result<Vec<SignupRecord>, LobbyError> {
        Ok(LobbySignupRepository::new(&self.db).unsigned().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::lobby_signup::LOBBY_CAPACITY;
    use test_utils::{
        builder::TestBuilder,
        context::TestContext,
        factory::{
            lobby::{place_in_lobby, LobbyFactory},
            signup::SignupFactory,
        },
    };

    /// Database with player 1 registered and lobbies 1 and 2.
    async fn setup() -> (TestContext, LobbyService) {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.clone().unwrap();

        SignupFactory::new(&db).discord_id(1).build().await.unwrap();
        LobbyFactory::new(&db).lobby_id(1).build().await.unwrap();
        LobbyFactory::new(&db).lobby_id(2).build().await.unwrap();

        (test, LobbyService::new(db))
    }

    /// Tests the join, switch and leave sequence for one player.
    ///
    /// Expected: Joined, then Switched, then Left, leaving the player unplaced
    #[tokio::test]
    async fn joins_switches_and_leaves() {
        let (test, service) = setup().await;

        assert_eq!(service.toggle(1, 1).await.unwrap(), LobbyChange::Joined(1));
        assert_eq!(
            service.toggle(1, 2).await.unwrap(),
            LobbyChange::Switched { from: 1, to: 2 }
        );
        assert_eq!(service.toggle(1, 2).await.unwrap(), LobbyChange::Left(2));

        let db = test.db.as_ref().unwrap();
        assert_eq!(
            LobbySignupRepository::new(db).current_lobby(1).await.unwrap(),
            None
        );
    }

    /// Tests that unregistered users cannot pick a lobby.
    ///
    /// Expected: Err(NotRegistered)
    #[tokio::test]
    async fn rejects_unregistered_user() {
        let (_test, service) = setup().await;

        let result = service.toggle(2, 1).await;

        assert!(matches!(result, Err(LobbyError::NotRegistered(2))));
    }

    /// Tests that an unknown lobby is reported before anything is written.
    ///
    /// Expected: Err(UnknownLobby)
    #[tokio::test]
    async fn rejects_unknown_lobby() {
        let (_test, service) = setup().await;

        let result = service.toggle(1, 9).await;

        assert!(matches!(result, Err(LobbyError::UnknownLobby(9))));
    }

    /// Tests that a full lobby is refused.
    ///
    /// Expected: Err(Full) and the player's current lobby kept
    #[tokio::test]
    async fn refuses_full_lobby() {
        let (test, service) = setup().await;
        let db = test.db.as_ref().unwrap();
        for discord_id in 1_000..1_000 + LOBBY_CAPACITY {
            SignupFactory::new(db).discord_id(discord_id).build().await.unwrap();
            place_in_lobby(db, discord_id, 2).await.unwrap();
        }
        service.toggle(1, 1).await.unwrap();

        let result = service.toggle(1, 2).await;

        assert!(matches!(result, Err(LobbyError::Full(2))));
        assert_eq!(
            LobbySignupRepository::new(db).current_lobby(1).await.unwrap(),
            Some(1)
        );
    }

    /// Tests listing players without a lobby.
    ///
    /// Expected: player drops off the list after joining
    #[tokio::test]
    async fn lists_unsigned_players() {
        let (_test, service) = setup().await;

        assert_eq!(service.unsigned().await.unwrap().len(), 1);
        service.toggle(1, 1).await.unwrap();
        assert!(service.unsigned().await.unwrap().is_empty());
    }

    /// Tests user-facing confirmations.
    ///
    /// Expected: the new lobby named in each message
    #[test]
    fn describes_changes() {
        assert_eq!(LobbyChange::Joined(3).message(), "Added you to lobby 3.");
        assert_eq!(LobbyChange::Left(3).message(), "Removed you from lobby 3.");
        assert_eq!(
            LobbyChange::Switched { from: 1, to: 4 }.message(),
            "Switched you to lobby 4."
        );
    }
}
