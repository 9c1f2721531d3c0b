use std::time::Duration;

use oauth2::{basic::BasicClient, AuthType, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    error::{config::ConfigError, AppError},
    state::{OAuth2Client, TwitchOAuthClient},
};

/// Upper bound for each outbound provider request. Kept below the relay's bridge
/// timeout so a slow provider surfaces as a provider failure rather than a bridge
/// timeout.
const PROVIDER_REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

/// Initialises the global tracing subscriber.
///
/// Filter directives come from `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connects to the Sqlite database and runs pending migrations.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client used for provider requests.
///
/// Redirects are disabled so a provider response can never steer requests elsewhere,
/// and every request is bounded by a short timeout since codes are single-use.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(PROVIDER_REQUEST_TIMEOUT)
        .build()?;

    Ok(client)
}

/// Builds the osu! OAuth2 client.
///
/// Credentials are sent in the request body as osu! expects.
pub fn setup_osu_oauth_client(
    client_id: &str,
    client_secret: &str,
    auth_url: &str,
    token_url: &str,
    redirect_url: &str,
) -> Result<OAuth2Client, AppError> {
    let client = BasicClient::new(ClientId::new(client_id.to_string()))
        .set_client_secret(ClientSecret::new(client_secret.to_string()))
        .set_auth_uri(AuthUrl::new(auth_url.to_string()).map_err(|e| invalid_url("OSU_AUTH_URL", e))?)
        .set_token_uri(
            TokenUrl::new(token_url.to_string()).map_err(|e| invalid_url("OSU_TOKEN_URL", e))?,
        )
        .set_redirect_uri(
            RedirectUrl::new(redirect_url.to_string())
                .map_err(|e| invalid_url("OSU_REDIRECT_URL", e))?,
        )
        .set_auth_type(AuthType::RequestBody);

    Ok(client)
}

/// Builds the Twitch OAuth2 client for app access tokens.
pub fn setup_twitch_oauth_client(
    client_id: &str,
    client_secret: &str,
    token_url: &str,
) -> Result<TwitchOAuthClient, AppError> {
    let client = BasicClient::new(ClientId::new(client_id.to_string()))
        .set_client_secret(ClientSecret::new(client_secret.to_string()))
        .set_token_uri(
            TokenUrl::new(token_url.to_string()).map_err(|e| invalid_url("TWITCH_TOKEN_URL", e))?,
        )
        .set_auth_type(AuthType::RequestBody);

    Ok(client)
}

fn invalid_url(name: &str, err: url::ParseError) -> AppError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: err.to_string(),
    }
    .into()
}
