//! Twitch Helix client for the presence poller.

use std::sync::Arc;
use std::time::{Duration, Instant};

use oauth2::TokenResponse;
use reqwest::StatusCode;
use tokio::sync::RwLock;

use crate::{
    error::AppError,
    model::stream::{LiveStream, StreamsResponse},
    state::TwitchOAuthClient,
};

/// Margin subtracted from token lifetimes so a token is never used right at expiry.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// App access token with the instant it stops being used.
#[derive(Clone)]
struct AppToken {
    secret: String,
    refresh_at: Instant,
}

/// Client looking up whether a Twitch channel is live.
///
/// Authenticates with an app access token from the client-credentials grant, cached
/// until shortly before it expires.
#[derive(Clone)]
pub struct TwitchClient {
    oauth_client: TwitchOAuthClient,
    http_client: reqwest::Client,
    client_id: String,
    streams_url: String,
    token: Arc<RwLock<Option<AppToken>>>,
}

impl TwitchClient {
    /// Creates a new TwitchClient.
    ///
    /// # Arguments
    /// - `oauth_client` - OAuth2 client with Twitch credentials and token endpoint
    /// - `http_client` - HTTP client with redirects disabled and a short timeout
    /// - `client_id` - Twitch application client ID, sent with every Helix request
    /// - `streams_url` - Helix streams endpoint
    pub fn new(
        oauth_client: TwitchOAuthClient,
        http_client: reqwest::Client,
        client_id: String,
        streams_url: String,
    ) -> Self {
        Self {
            oauth_client,
            http_client,
            client_id,
            streams_url,
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Looks up the live stream of a channel.
    ///
    /// # Arguments
    /// - `channel_login` - Twitch login name of the channel
    ///
    /// # Returns
    /// - `Ok(Some(LiveStream))` - The channel is live
    /// - `Ok(None)` - The channel is offline
    /// - `Err(AppError)` - Token request or Helix request failed
    pub async fn fetch_live_stream(&self, channel_login: &str) -> Result<Option<LiveStream>, AppError> {
        let token = self.app_token().await?;

        let response = self
            .http_client
            .get(&self.streams_url)
            .query(&[("user_login", channel_login)])
            .header("Client-Id", &self.client_id)
            .bearer_auth(&token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let streams = response.json::<StreamsResponse>().await?;
                Ok(streams.data.into_iter().next())
            }
            StatusCode::UNAUTHORIZED => {
                // Revoked or expired early; the next tick fetches a fresh token.
                *self.token.write().await = None;
                Err(AppError::ExternalApi(
                    "Twitch rejected the app access token".to_string(),
                ))
            }
            status => Err(AppError::ExternalApi(format!(
                "Twitch streams endpoint responded with {status}"
            ))),
        }
    }

    /// Returns a cached app access token, requesting a new one when needed.
    async fn app_token(&self) -> Result<String, AppError> {
        if let Some(token) = self.token.read().await.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.secret.clone());
            }
        }

        let response = self
            .oauth_client
            .exchange_client_credentials()
            .request_async(&self.http_client)
            .await
            .map_err(|e| AppError::ExternalApi(format!("Twitch token request failed: {e}")))?;

        let lifetime = response
            .expires_in()
            .unwrap_or(Duration::from_secs(60 * 60))
            .saturating_sub(TOKEN_EXPIRY_MARGIN);
        let token = AppToken {
            secret: response.access_token().secret().clone(),
            refresh_at: Instant::now() + lifetime,
        };

        tracing::debug!("Obtained Twitch app access token valid for {:?}", lifetime);

        *self.token.write().await = Some(token.clone());
        Ok(token.secret)
    }
}
