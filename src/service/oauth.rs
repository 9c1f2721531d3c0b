//! osu! OAuth identity exchange.
//!
//! Turns the single-use authorization code from the osu! redirect into the profile of
//! the account that approved it. Codes cannot be reused, so nothing here retries.

use async_trait::async_trait;
use oauth2::{
    basic::{BasicErrorResponseType, BasicTokenType},
    AuthorizationCode, CsrfToken, EmptyExtraTokenFields, RequestTokenError, Scope,
    StandardErrorResponse, StandardTokenResponse, TokenResponse,
};
use url::Url;

use crate::{
    error::signup::ProviderError, model::signup::ExternalProfile,
    service::signup::IdentityExchange, state::OAuth2Client,
};

/// Client for the osu! authorization code flow.
#[derive(Clone)]
pub struct OsuIdentityClient {
    oauth_client: OAuth2Client,
    http_client: reqwest::Client,
    profile_url: String,
}

impl OsuIdentityClient {
    /// Creates a new OsuIdentityClient.
    ///
    /// # Arguments
    /// - `oauth_client` - OAuth2 client configured with osu! credentials and endpoints
    /// - `http_client` - HTTP client with redirects disabled and a short timeout
    /// - `profile_url` - osu! endpoint returning the authenticated user's profile
    pub fn new(oauth_client: OAuth2Client, http_client: reqwest::Client, profile_url: String) -> Self {
        Self {
            oauth_client,
            http_client,
            profile_url,
        }
    }

    /// Builds the osu! authorization URL for a registration prompt.
    ///
    /// # Arguments
    /// - `state` - Sealed signup token identifying the Discord user
    ///
    /// # Returns
    /// - `Url` - Authorization URL carrying client ID, redirect URI and state
    pub fn authorize_url(&self, state: String) -> Url {
        let (url, _) = self
            .oauth_client
            .authorize_url(|| CsrfToken::new(state))
            .add_scope(Scope::new("identify".to_string()))
            .url();

        url
    }

    /// Exchanges an authorization code for an access token.
    async fn exchange_code(
        &self,
        code: &str,
    ) -> Result<StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>, ProviderError> {
        self.oauth_client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&self.http_client)
            .await
            .map_err(map_token_error)
    }

    /// Fetches the osu! profile belonging to an access token.
    async fn fetch_profile(
        &self,
        token: &StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    ) -> Result<ExternalProfile, ProviderError> {
        let response = self
            .http_client
            .get(&self.profile_url)
            .bearer_auth(token.access_token().secret())
            .send()
            .await
            .map_err(|e| ProviderError::ProfileFetchFailed(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::ProfileFetchFailed(format!(
                "profile endpoint responded with {status}"
            )));
        }

        response
            .json::<ExternalProfile>()
            .await
            .map_err(|e| ProviderError::ProfileFetchFailed(e.without_url().to_string()))
    }
}

#[async_trait]
impl IdentityExchange for OsuIdentityClient {
    async fn exchange_code_for_profile(&self, code: &str) -> Result<ExternalProfile, ProviderError> {
        let token = self.exchange_code(code).await?;

        self.fetch_profile(&token).await
    }
}

/// Describes a failed token request without echoing the request body.
fn map_token_error<RE: std::error::Error + 'static>(
    err: RequestTokenError<RE, StandardErrorResponse<BasicErrorResponseType>>,
) -> ProviderError {
    let reason = match err {
        RequestTokenError::ServerResponse(server_err) => {
            let error_type = server_err.error();
            server_err
                .error_description()
                .cloned()
                .unwrap_or_else(|| error_type.to_string())
        }
        RequestTokenError::Request(req_err) => format!("token request failed: {req_err}"),
        RequestTokenError::Parse(parse_err, _) => {
            format!("failed to parse token response: {parse_err}")
        }
        RequestTokenError::Other(msg) => msg,
    };

    ProviderError::ExchangeFailed(reason)
}
