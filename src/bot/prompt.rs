//! Registration prompts.
//!
//! A prompt is a direct message carrying the osu! authorization link for the user. The
//! link's `state` is a sealed token naming the user, which is how the callback later
//! knows whose signup it is completing.

use serenity::all::{CacheHttp, CreateEmbed, CreateEmbedFooter, CreateMessage, User};

use crate::{
    error::{signup::SignupError, AppError},
    model::signup::SignupRecord,
    service::signup::{prompt::PromptTracker, SignupService},
    state::AppState,
};

const PROMPT_COLOR: u32 = 0xf5a623;

/// What to do for a user asking (or reacting) to register.
#[derive(Debug, PartialEq)]
pub enum PromptDecision {
    /// Send a prompt.
    Send,
    /// The user is already in the signup ledger.
    AlreadyRegistered(SignupRecord),
    /// The user was already prompted and repeat prompts are suppressed.
    AlreadyPrompted,
}

/// Result of attempting to prompt a user.
#[derive(Debug, PartialEq, Eq)]
pub enum PromptOutcome {
    Sent,
    /// Carries the osu! user ID the Discord user signed up with.
    AlreadyRegistered(i64),
    AlreadyPrompted,
    /// The user does not accept direct messages from the bot.
    DirectMessagesClosed,
}

/// Decides whether a user should be prompted.
///
/// # Arguments
/// - `signup` - Signup service answering whether the user is registered
/// - `prompts` - Users prompted so far
/// - `discord_id` - User to decide for
/// - `suppress_repeats` - Skip users already prompted, used for reaction triggers
pub async fn decide(
    signup: &SignupService,
    prompts: &PromptTracker,
    discord_id: u64,
    suppress_repeats: bool,
) -> Result<PromptDecision, SignupError> {
    if suppress_repeats && prompts.has_been_prompted(discord_id).await {
        return Ok(PromptDecision::AlreadyPrompted);
    }

    if let Some(record) = signup.registration(discord_id).await? {
        return Ok(PromptDecision::AlreadyRegistered(record));
    }

    Ok(PromptDecision::Send)
}

/// Sends a registration prompt to a user if they need one.
///
/// The user is marked as prompted only after the direct message was delivered.
pub async fn prompt_user(
    state: &AppState,
    cache_http: impl CacheHttp,
    user: &User,
    suppress_repeats: bool,
) -> Result<PromptOutcome, AppError> {
    let discord_id = user.id.get();

    match decide(&state.signup, &state.prompts, discord_id, suppress_repeats).await? {
        PromptDecision::AlreadyRegistered(record) => {
            return Ok(PromptOutcome::AlreadyRegistered(record.osu_id));
        }
        PromptDecision::AlreadyPrompted => return Ok(PromptOutcome::AlreadyPrompted),
        PromptDecision::Send => {}
    }

    let token = state.signup.issue_state(discord_id)?;
    let authorize_url = state.identity.authorize_url(token);

    let message = CreateMessage::new().embeds(build_prompt_embeds(
        authorize_url.as_str(),
        &state.signup_close_text,
    ));

    if let Err(e) = user.direct_message(cache_http, message).await {
        tracing::info!("Could not DM registration prompt to {}: {}", discord_id, e);
        return Ok(PromptOutcome::DirectMessagesClosed);
    }

    state.prompts.mark_prompted(discord_id).await;
    tracing::info!("Sent registration prompt to {}", discord_id);

    Ok(PromptOutcome::Sent)
}

/// Builds the prompt embed linking to osu! and the explanation that follows it.
pub fn build_prompt_embeds(authorize_url: &str, close_text: &str) -> Vec<CreateEmbed> {
    let prompt = CreateEmbed::new()
        .title("Click here to register for ANZT!")
        .url(authorize_url)
        .color(PROMPT_COLOR)
        .description("Log in with osu! to link your osu! account to this Discord account.")
        .footer(CreateEmbedFooter::new(format!(
            "Registrations close {close_text}"
        )));

    let explanation = CreateEmbed::new().color(PROMPT_COLOR).description(
        "```fix\nYou will be prompted to log in on the official osu! site.\n\n\
         This lets us confirm you own both this Discord account and the osu! account.```\
         The link is personal to you. If it stops working, run !register for a fresh one.",
    );

    vec![prompt, explanation]
}
