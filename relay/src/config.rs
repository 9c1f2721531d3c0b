use std::{net::SocketAddr, time::Duration};

use crate::error::{ConfigError, RelayError};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_BRIDGE_ADDR: &str = "127.0.0.1:7865";
const DEFAULT_BRIDGE_TIMEOUT_SECS: u64 = 20;

pub struct Config {
    /// Address the HTTP server listens on, usually behind a reverse proxy.
    pub bind_addr: SocketAddr,
    /// Loopback address of the bot's callback receiver.
    pub bridge_addr: SocketAddr,
    /// Upper bound for a whole bridge exchange.
    pub bridge_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, RelayError> {
        let bridge_addr: SocketAddr = parse_var("BRIDGE_ADDR", DEFAULT_BRIDGE_ADDR)?;
        if !bridge_addr.ip().is_loopback() {
            return Err(ConfigError::InvalidEnvVar {
                name: "BRIDGE_ADDR".to_string(),
                reason: "the callback bridge must be on a loopback address".to_string(),
            }
            .into());
        }

        let timeout_secs: u64 =
            parse_var("BRIDGE_TIMEOUT_SECS", &DEFAULT_BRIDGE_TIMEOUT_SECS.to_string())?;

        Ok(Self {
            bind_addr: parse_var("RELAY_BIND_ADDR", DEFAULT_BIND_ADDR)?,
            bridge_addr,
            bridge_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_var<T>(name: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let value = std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string());

    value.parse().map_err(|e: T::Err| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
