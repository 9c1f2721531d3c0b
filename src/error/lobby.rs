use thiserror::Error;

/// Reasons a `!lobby` request is refused.
#[derive(Error, Debug)]
pub enum LobbyError {
    /// Only players in the signup ledger can pick a lobby.
    #[error("Discord user {0} is not signed up")]
    NotRegistered(u64),

    #[error("Lobby {0} does not exist")]
    UnknownLobby(i32),

    #[error("Lobby {0} is full")]
    Full(i32),

    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
}

impl LobbyError {
    /// Message safe to display to the player.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotRegistered(_) => {
                "You don't appear to be registered for this tourney.".to_string()
            }
            Self::UnknownLobby(lobby_id) => format!("I can't find a lobby with id {lobby_id}."),
            Self::Full(lobby_id) => format!("Lobby {lobby_id} is full."),
            Self::DbErr(_) => "Sorry, something went wrong on our end. It will be investigated."
                .to_string(),
        }
    }
}
