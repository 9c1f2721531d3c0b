//! Error types for the bot process.
//!
//! `AppError` is the top-level error returned from startup, the Discord handlers and the
//! scheduled jobs. Signup callbacks use the narrower `SignupError`, whose variants map
//! one-to-one onto the outcomes reported back to the user through the callback bridge.

pub mod config;
pub mod lobby;
pub mod signup;
pub mod token;

use thiserror::Error;

use crate::error::{
    config::ConfigError, lobby::LobbyError, signup::SignupError, token::TokenError,
};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Socket error, e.g. binding the callback receiver.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Signup token key or codec failure.
    #[error(transparent)]
    TokenErr(#[from] TokenError),

    /// Signup flow failure outside of the callback bridge.
    #[error(transparent)]
    SignupErr(#[from] SignupError),

    /// Qualifier lobby signup failure.
    #[error(transparent)]
    LobbyErr(#[from] LobbyError),

    /// A third-party API responded with an error or unexpected payload.
    #[error("{0}")]
    ExternalApi(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
