//! Chat command handler.
//!
//! - `!register` - DM the author a registration prompt
//! - `!lobby <id>` - Join, leave or switch qualifier lobby
//! - `!streamping` - Toggle the stream ping role
//! - `!unsigned` - List registered players without a lobby (owner only)
//! - `!resetprompts` - Forget who has been prompted (owner only)

use serenity::all::{Context, CreateAllowedMentions, CreateMessage, Message, RoleId};

use crate::{
    bot::{
        prompt::{self, PromptOutcome},
        role,
    },
    error::lobby::LobbyError,
    model::signup::SignupRecord,
    state::AppState,
};

const INTERNAL_ERROR_REPLY: &str =
    "Sorry, something went wrong on our end. It will be investigated.";

const STREAM_PING_ROLE_NAME: &str = "Stream Ping";

/// Discord's message length limit.
const MAX_MESSAGE_LENGTH: usize = 2000;

/// A recognised chat command.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Register,
    /// Carries the requested lobby, `None` when missing or not a number.
    Lobby(Option<i32>),
    StreamPing,
    Unsigned,
    ResetPrompts,
}

impl Command {
    /// Parses a message's content into a command.
    pub fn parse(content: &str) -> Option<Self> {
        let mut words = content.split_whitespace();
        let name = words.next()?;

        match name.to_ascii_lowercase().as_str() {
            "!register" => Some(Self::Register),
            "!lobby" => Some(Self::Lobby(words.next().and_then(|id| id.parse().ok()))),
            "!streamping" => Some(Self::StreamPing),
            "!unsigned" => Some(Self::Unsigned),
            "!resetprompts" => Some(Self::ResetPrompts),
            _ => None,
        }
    }
}

/// Handle message creation in a channel or DM
pub async fn handle_message(state: &AppState, ctx: Context, message: Message) {
    if message.author.bot {
        return;
    }

    let Some(command) = Command::parse(&message.content) else {
        return;
    };

    match command {
        Command::Register => handle_register(state, &ctx, &message).await,
        Command::Lobby(lobby_id) => handle_lobby(state, &ctx, &message, lobby_id).await,
        Command::StreamPing => handle_stream_ping(state, &ctx, &message).await,
        Command::Unsigned => handle_unsigned(state, &ctx, &message).await,
        Command::ResetPrompts => handle_reset_prompts(state, &ctx, &message).await,
    }
}

async fn reply(ctx: &Context, message: &Message, command: &str, content: String) {
    if let Err(e) = message.reply(ctx, content).await {
        tracing::warn!("Failed to reply to {}: {}", command, e);
    }
}

fn is_owner(state: &AppState, message: &Message, command: &str) -> bool {
    let allowed = state.owner_id == Some(message.author.id.get());
    if !allowed {
        tracing::debug!("Ignoring {} from non-owner {}", command, message.author.id);
    }

    allowed
}

async fn handle_register(state: &AppState, ctx: &Context, message: &Message) {
    let content = match prompt::prompt_user(state, ctx, &message.author, false).await {
        Ok(PromptOutcome::Sent) if message.guild_id.is_some() => {
            Some("I've sent you a DM with your registration link!".to_string())
        }
        Ok(PromptOutcome::Sent) | Ok(PromptOutcome::AlreadyPrompted) => None,
        Ok(PromptOutcome::AlreadyRegistered(osu_id)) => Some(format!(
            "You're already signed up! (osu! user {osu_id})"
        )),
        Ok(PromptOutcome::DirectMessagesClosed) => Some(
            "I couldn't DM you. Please allow direct messages from server members and try again."
                .to_string(),
        ),
        Err(e) => {
            state
                .incidents
                .report("!register failed", &e.to_string())
                .await;
            Some(INTERNAL_ERROR_REPLY.to_string())
        }
    };

    if let Some(content) = content {
        reply(ctx, message, "!register", content).await;
    }
}

async fn handle_lobby(state: &AppState, ctx: &Context, message: &Message, lobby_id: Option<i32>) {
    let Some(lobby_id) = lobby_id else {
        reply(ctx, message, "!lobby", "Usage: `!lobby <lobby id>`".to_string()).await;
        return;
    };

    let content = match state.lobbies.toggle(message.author.id.get(), lobby_id).await {
        Ok(change) => change.message(),
        Err(e @ LobbyError::DbErr(_)) => {
            state.incidents.report("!lobby failed", &e.to_string()).await;
            e.user_message()
        }
        Err(e) => e.user_message(),
    };

    reply(ctx, message, "!lobby", content).await;
}

async fn handle_stream_ping(state: &AppState, ctx: &Context, message: &Message) {
    let (Some(guild_id), Some(role_id)) = (message.guild_id, state.stream_ping_role_id) else {
        tracing::debug!("Ignoring !streamping outside a guild or without a ping role");
        return;
    };

    let content = match role::toggle_member_role(
        ctx,
        guild_id,
        message.author.id,
        RoleId::new(role_id),
    )
    .await
    {
        Ok(change) => change.message(STREAM_PING_ROLE_NAME),
        Err(e) => {
            state
                .incidents
                .report("!streamping failed", &e.to_string())
                .await;
            INTERNAL_ERROR_REPLY.to_string()
        }
    };

    reply(ctx, message, "!streamping", content).await;
}

async fn handle_unsigned(state: &AppState, ctx: &Context, message: &Message) {
    if !is_owner(state, message, "!unsigned") {
        return;
    }

    let content = match state.lobbies.unsigned().await {
        Ok(players) => format_unsigned(&players),
        Err(e) => {
            state.incidents.report("!unsigned failed", &e.to_string()).await;
            INTERNAL_ERROR_REPLY.to_string()
        }
    };

    let listing = CreateMessage::new()
        .content(content)
        .allowed_mentions(CreateAllowedMentions::new());
    if let Err(e) = message.channel_id.send_message(ctx, listing).await {
        tracing::warn!("Failed to reply to !unsigned: {}", e);
    }
}

/// Lists players without a lobby by mention and osu! ID, within one message.
pub fn format_unsigned(players: &[SignupRecord]) -> String {
    let header = format!("{} players have not yet picked a lobby.", players.len());
    if players.is_empty() {
        return header;
    }

    let mut listing = header;
    for (shown, player) in players.iter().enumerate() {
        let line = format!("\n<@{}> (osu! user {})", player.discord_id, player.osu_id);
        let remaining = players.len() - shown;
        let overflow = format!("\n...and {remaining} more");

        if listing.len() + line.len() + overflow.len() > MAX_MESSAGE_LENGTH {
            listing.push_str(&overflow);
            break;
        }
        listing.push_str(&line);
    }

    listing
}

async fn handle_reset_prompts(state: &AppState, ctx: &Context, message: &Message) {
    if !is_owner(state, message, "!resetprompts") {
        return;
    }

    let cleared = state.prompts.reset().await;
    tracing::info!("Prompt tracker reset by owner, {} entries cleared", cleared);

    reply(
        ctx,
        message,
        "!resetprompts",
        format!("Cleared {cleared} prompted user(s)."),
    )
    .await;
}
