use std::{net::SocketAddr, time::Duration};

use crate::{
    error::{config::ConfigError, AppError},
    service::signup::prompt::{DEFAULT_PROMPT_TRACKER_CAPACITY, DEFAULT_PROMPT_TRACKER_TTL},
};

const OSU_AUTH_URL: &str = "https://osu.ppy.sh/oauth/authorize";
const OSU_TOKEN_URL: &str = "https://osu.ppy.sh/oauth/token";
const OSU_PROFILE_URL: &str = "https://osu.ppy.sh/api/v2/me/osu";

const TWITCH_TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
const TWITCH_STREAMS_URL: &str = "https://api.twitch.tv/helix/streams";

const DEFAULT_BRIDGE_BIND_ADDR: &str = "127.0.0.1:7865";
const DEFAULT_ALLOWED_COUNTRIES: &str = "AU,NZ";
const DEFAULT_SIGNUP_TOKEN_MAX_AGE_SECS: u64 = 24 * 60 * 60;

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    /// Base64-encoded 32-byte key for signup state tokens.
    pub signup_token_key: String,
    pub signup_token_max_age: Duration,
    /// Shown in the registration prompt, e.g. "June 15th".
    pub signup_close_text: String,
    /// Upper-cased osu! country codes permitted to sign up.
    pub allowed_countries: Vec<String>,

    pub osu_client_id: String,
    pub osu_client_secret: String,
    pub osu_redirect_url: String,
    pub osu_auth_url: String,
    pub osu_token_url: String,
    pub osu_profile_url: String,

    /// Loopback address the callback receiver listens on.
    pub bridge_bind_addr: SocketAddr,

    /// Pinned message whose reactions trigger registration prompts.
    pub registration_message_id: Option<u64>,
    /// Discord user allowed to run operator commands.
    pub owner_id: Option<u64>,
    /// Channel that receives incident reports.
    pub error_channel_id: Option<u64>,

    /// Most users the prompt tracker remembers at once.
    pub prompt_tracker_capacity: u64,
    /// How long a prompt suppresses repeat prompts from reactions.
    pub prompt_tracker_ttl: Duration,

    /// Role members toggle with `!streamping` and stream announcements mention.
    pub stream_ping_role_id: Option<u64>,

    /// Presence polling is disabled when unset.
    pub twitch: Option<TwitchConfig>,
}

pub struct TwitchConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Login name of the monitored channel.
    pub channel: String,
    pub token_url: String,
    pub streams_url: String,
    /// Stream pings are disabled when unset.
    pub ping: Option<StreamPingConfig>,
}

pub struct StreamPingConfig {
    pub guild_id: u64,
    pub channel_id: u64,
    pub role_id: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let bridge_bind_addr: SocketAddr =
            parse_var("BRIDGE_BIND_ADDR", DEFAULT_BRIDGE_BIND_ADDR)?;
        if !bridge_bind_addr.ip().is_loopback() {
            return Err(ConfigError::InvalidEnvVar {
                name: "BRIDGE_BIND_ADDR".to_string(),
                reason: "the callback bridge must be bound to a loopback address".to_string(),
            }
            .into());
        }

        let max_age_secs: u64 = parse_var(
            "SIGNUP_TOKEN_MAX_AGE_SECS",
            &DEFAULT_SIGNUP_TOKEN_MAX_AGE_SECS.to_string(),
        )?;

        let prompt_tracker_capacity: u64 = parse_var(
            "PROMPT_TRACKER_CAPACITY",
            &DEFAULT_PROMPT_TRACKER_CAPACITY.to_string(),
        )?;
        if prompt_tracker_capacity == 0 {
            return Err(ConfigError::InvalidEnvVar {
                name: "PROMPT_TRACKER_CAPACITY".to_string(),
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }
        let prompt_tracker_ttl_secs: u64 = parse_var(
            "PROMPT_TRACKER_TTL_SECS",
            &DEFAULT_PROMPT_TRACKER_TTL.as_secs().to_string(),
        )?;

        let stream_ping_role_id = optional_id("STREAM_PING_ROLE_ID")?;

        let allowed_countries =
            parse_country_list(&var_or("ALLOWED_COUNTRIES", DEFAULT_ALLOWED_COUNTRIES));
        if allowed_countries.is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                name: "ALLOWED_COUNTRIES".to_string(),
                reason: "at least one country code is required".to_string(),
            }
            .into());
        }

        Ok(Self {
            database_url: required_var("DATABASE_URL")?,
            discord_bot_token: required_var("DISCORD_BOT_TOKEN")?,
            signup_token_key: required_var("SIGNUP_TOKEN_KEY")?,
            signup_token_max_age: Duration::from_secs(max_age_secs),
            signup_close_text: required_var("SIGNUP_CLOSE_TEXT")?,
            allowed_countries,
            osu_client_id: required_var("OSU_CLIENT_ID")?,
            osu_client_secret: required_var("OSU_CLIENT_SECRET")?,
            osu_redirect_url: required_var("OSU_REDIRECT_URL")?,
            osu_auth_url: var_or("OSU_AUTH_URL", OSU_AUTH_URL),
            osu_token_url: var_or("OSU_TOKEN_URL", OSU_TOKEN_URL),
            osu_profile_url: var_or("OSU_PROFILE_URL", OSU_PROFILE_URL),
            bridge_bind_addr,
            registration_message_id: optional_id("REGISTRATION_MESSAGE_ID")?,
            owner_id: optional_id("OWNER_ID")?,
            error_channel_id: optional_id("ERROR_CHANNEL_ID")?,
            prompt_tracker_capacity,
            prompt_tracker_ttl: Duration::from_secs(prompt_tracker_ttl_secs),
            stream_ping_role_id,
            twitch: TwitchConfig::from_env(stream_ping_role_id)?,
        })
    }
}

impl TwitchConfig {
    fn from_env(stream_ping_role_id: Option<u64>) -> Result<Option<Self>, AppError> {
        let Some(channel) = non_empty_var("TWITCH_CHANNEL") else {
            return Ok(None);
        };

        let ping = match optional_id("GUILD_ID")? {
            Some(guild_id) => Some(StreamPingConfig {
                guild_id,
                channel_id: required_id("STREAM_PING_CHANNEL_ID")?,
                role_id: stream_ping_role_id
                    .ok_or_else(|| ConfigError::MissingEnvVar("STREAM_PING_ROLE_ID".to_string()))?,
            }),
            None => None,
        };

        Ok(Some(Self {
            client_id: required_var("TWITCH_CLIENT_ID")?,
            client_secret: required_var("TWITCH_CLIENT_SECRET")?,
            channel,
            token_url: var_or("TWITCH_TOKEN_URL", TWITCH_TOKEN_URL),
            streams_url: var_or("TWITCH_STREAMS_URL", TWITCH_STREAMS_URL),
            ping,
        }))
    }
}

/// Splits a comma-separated list of country codes, upper-casing and dropping blanks.
pub fn parse_country_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|code| code.trim().to_ascii_uppercase())
        .filter(|code| !code.is_empty())
        .collect()
}

/// Reads a variable, treating an empty value the same as an unset one.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    non_empty_var(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn var_or(name: &str, default: &str) -> String {
    non_empty_var(name).unwrap_or_else(|| default.to_string())
}

fn parse_var<T>(name: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    var_or(name, default)
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

fn optional_id(name: &str) -> Result<Option<u64>, ConfigError> {
    non_empty_var(name)
        .map(|value| parse_id(name, &value))
        .transpose()
}

/// Parses a Discord snowflake. Zero is not a valid ID.
fn parse_id(name: &str, value: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason,
    };

    match value.trim().parse::<u64>() {
        Ok(0) => Err(invalid("Discord IDs are never zero".to_string())),
        Ok(id) => Ok(id),
        Err(e) => Err(invalid(e.to_string())),
    }
}

fn required_id(name: &str) -> Result<u64, ConfigError> {
    optional_id(name)?.ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}
