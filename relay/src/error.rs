//! Relay error types and HTTP response mapping.

use anzt_bridge::{sender::UNREACHABLE_MESSAGE, BridgeError, CallbackResult};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable is set but cannot be used.
    #[error("Invalid value for environment variable {name}: {reason}")]
    InvalidEnvVar { name: String, reason: String },
}

#[derive(Error, Debug)]
pub enum RelayError {
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Binding or serving the HTTP listener failed.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// The redirect arrived without one of its query parameters.
    ///
    /// Results in 400 Bad Request. The bot is not contacted.
    #[error("Missing query parameter `{0}`")]
    MissingParameter(&'static str),

    /// The bot's callback receiver could not be reached or did not answer in time.
    ///
    /// Results in 503 Service Unavailable.
    #[error(transparent)]
    BridgeErr(#[from] BridgeError),
}

/// Converts relay errors into the same `{success, message}` body the bot returns.
///
/// - `MissingParameter` → 400 Bad Request
/// - `BridgeErr` → 503 Service Unavailable
/// - Other errors → 500 Internal Server Error with a generic message
impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingParameter(name) => {
                tracing::debug!("Rejected callback missing `{}`", name);
                (
                    StatusCode::BAD_REQUEST,
                    Json(CallbackResult::failure(
                        "Incorrect arguments, please start registration again from Discord.",
                    )),
                )
                    .into_response()
            }
            Self::BridgeErr(err) => {
                tracing::warn!("Could not complete callback with bot: {}", err);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(CallbackResult::failure(UNREACHABLE_MESSAGE)),
                )
                    .into_response()
            }
            err => {
                tracing::error!("{}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(CallbackResult::failure("Internal server error")),
                )
                    .into_response()
            }
        }
    }
}
