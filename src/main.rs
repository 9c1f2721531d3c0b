mod bot;
mod bridge;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod state;

use std::sync::Arc;

use serenity::http::Http;

use crate::{
    bot::presence::{DiscordStreamNotifier, ShardPresence},
    bridge::receiver::{self, CallbackReceiver},
    config::Config,
    data::signup::SignupRepository,
    error::AppError,
    scheduler::stream_presence,
    service::{
        incident::IncidentReporter,
        lobby::LobbyService,
        oauth::OsuIdentityClient,
        presence::{PresenceService, StreamNotifier},
        signup::{ledger::DatabaseSignupLedger, prompt::PromptTracker, SignupService},
        token::SignupTokenCodec,
        twitch::TwitchClient,
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_osu_oauth_client(
        &config.osu_client_id,
        &config.osu_client_secret,
        &config.osu_auth_url,
        &config.osu_token_url,
        &config.osu_redirect_url,
    )?;

    let codec =
        SignupTokenCodec::from_base64_key(&config.signup_token_key, config.signup_token_max_age)?;
    let identity = OsuIdentityClient::new(
        oauth_client,
        http_client.clone(),
        config.osu_profile_url.clone(),
    );
    let signup = SignupService::new(
        codec,
        Arc::new(DatabaseSignupLedger::new(db.clone())),
        Arc::new(identity.clone()),
        config.allowed_countries.clone(),
    );

    let discord_http = Arc::new(Http::new(&config.discord_bot_token));
    let incidents = IncidentReporter::new(discord_http.clone(), config.error_channel_id);

    let signups = SignupRepository::new(&db).count().await?;
    tracing::info!(
        "{} signup(s) recorded, open to {} until {}",
        signups,
        config.allowed_countries.join(", "),
        config.signup_close_text
    );

    // Bind before connecting to Discord so a taken port fails startup.
    let listener = receiver::bind(config.bridge_bind_addr).await?;
    let callback_receiver = CallbackReceiver::new(signup.clone(), incidents.clone());
    tokio::spawn(callback_receiver.serve(listener));

    let state = AppState {
        signup,
        identity,
        prompts: PromptTracker::new(config.prompt_tracker_capacity, config.prompt_tracker_ttl),
        lobbies: LobbyService::new(db.clone()),
        incidents: incidents.clone(),
        signup_close_text: config.signup_close_text.clone(),
        registration_message_id: config.registration_message_id,
        owner_id: config.owner_id,
        stream_ping_role_id: config.stream_ping_role_id,
    };
    let bot_client = bot::start::init_bot(&config, state).await?;

    // Keep the scheduler alive for the lifetime of the process.
    let _scheduler = match &config.twitch {
        Some(twitch) => {
            let twitch_oauth = startup::setup_twitch_oauth_client(
                &twitch.client_id,
                &twitch.client_secret,
                &twitch.token_url,
            )?;
            let notifier = twitch.ping.as_ref().map(|ping| {
                Arc::new(DiscordStreamNotifier::new(discord_http.clone(), ping))
                    as Arc<dyn StreamNotifier>
            });
            let presence = PresenceService::new(
                db.clone(),
                TwitchClient::new(
                    twitch_oauth,
                    http_client.clone(),
                    twitch.client_id.clone(),
                    twitch.streams_url.clone(),
                ),
                twitch.channel.clone(),
                Arc::new(ShardPresence::new(bot_client.shard_manager.clone())),
                notifier,
            );

            Some(stream_presence::start_scheduler(presence, incidents.clone()).await?)
        }
        None => {
            tracing::info!("TWITCH_CHANNEL not set, stream presence polling disabled");
            None
        }
    };

    bot::start::start_bot(bot_client).await
}
