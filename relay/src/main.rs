//! HTTP front-end for the osu! OAuth redirect.
//!
//! Receives the browser redirect carrying `code` and `state`, forwards them to the
//! running bot over the local callback bridge and shows the bot's verdict to the user.

mod config;
mod controller;
mod error;
mod router;
mod state;

use anzt_bridge::BridgeSender;
use tracing_subscriber::EnvFilter;

use crate::{config::Config, error::RelayError, state::RelayState};

#[tokio::main]
async fn main() -> Result<(), RelayError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let sender = BridgeSender::new(config.bridge_addr, config.bridge_timeout);
    let app = router::router().with_state(RelayState::new(sender));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Relay listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
