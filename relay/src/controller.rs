use anzt_bridge::CallbackEnvelope;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{error::RelayError, state::RelayState};

/// Query parameters of the osu! OAuth redirect.
///
/// Both are optional at extraction time so a malformed redirect gets a friendly
/// message instead of axum's default rejection.
#[derive(Deserialize)]
pub struct CallbackParams {
    /// One-time authorization code issued by osu!.
    pub code: Option<String>,
    /// Encrypted signup token minted by the bot.
    pub state: Option<String>,
}

/// Forwards the OAuth redirect to the bot and relays its verdict.
///
/// # Returns
/// - `200 OK` - The bot processed the callback; the body says whether signup succeeded
/// - `400 Bad Request` - `code` or `state` is missing
/// - `503 Service Unavailable` - The bot could not be reached or did not answer in time
pub async fn callback(
    State(state): State<RelayState>,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, RelayError> {
    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or(RelayError::MissingParameter("code"))?;
    let oauth_state = params
        .state
        .filter(|s| !s.is_empty())
        .ok_or(RelayError::MissingParameter("state"))?;

    let result = state
        .sender
        .forward(&CallbackEnvelope::new(code, oauth_state))
        .await?;

    tracing::info!(success = result.success, "Relayed callback result");

    Ok((StatusCode::OK, Json(result)))
}
