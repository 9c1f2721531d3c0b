use thiserror::Error;

use crate::error::token::TokenError;

/// Message returned to the user when a signup completes.
pub const SIGNUP_SUCCESS_MESSAGE: &str = "You're now registered!";

/// Outcomes of a signup callback other than success.
///
/// Variants are checked in declaration order, so a user always receives the most
/// specific reason available.
#[derive(Error, Debug)]
pub enum SignupError {
    /// The state token failed to decode, authenticate, or has expired.
    #[error("Rejected signup state: {0}")]
    InvalidState(#[from] TokenError),

    /// The Discord user already has a signup. A normal outcome, not a fault.
    #[error("Discord user {0} is already signed up")]
    AlreadyRegistered(u64),

    /// Either leg of the osu! OAuth exchange failed.
    #[error(transparent)]
    ProviderUnavailable(#[from] ProviderError),

    /// The osu! account's country is not on the allow-list.
    #[error("osu! user {osu_id} from {country} is not in an allowed country")]
    NotAllowed {
        osu_id: i64,
        country: String,
        allowed: Vec<String>,
    },

    /// The signup ledger failed.
    #[error(transparent)]
    Ledger(#[from] sea_orm::DbErr),

    /// Any other unexpected failure.
    #[error("{0}")]
    Internal(String),
}

/// Failure of the identity provider exchange.
///
/// Both variants are shown to the user identically; the distinction only matters
/// for the logs.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Exchanging the authorization code for an access token failed. The code is
    /// single-use so this is final for that code.
    #[error("Failed to exchange authorization code for an access token: {0}")]
    ExchangeFailed(String),

    /// Fetching the profile with the access token failed.
    #[error("Failed to fetch osu! profile: {0}")]
    ProfileFetchFailed(String),
}

impl SignupError {
    /// Whether the failure is a fault that operators should be told about.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Ledger(_) | Self::Internal(_))
    }

    /// Message safe to display to the end user.
    ///
    /// Never contains codes, tokens or credentials.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidState(_) => "Your registration link is invalid or has expired, \
                please request a new one with !register."
                .to_string(),
            Self::AlreadyRegistered(_) => "You're already signed up!".to_string(),
            Self::ProviderUnavailable(_) => "Couldn't reach osu! to confirm your account, \
                please try again shortly."
                .to_string(),
            Self::NotAllowed {
                country, allowed, ..
            } => format!(
                "Sorry, this tournament is only open to players from {}. \
                 Your osu! account is registered in {}.",
                allowed.join(", "),
                country
            ),
            Self::Ledger(_) | Self::Internal(_) => {
                "Sorry, something went wrong on our end. It will be investigated.".to_string()
            }
        }
    }
}
