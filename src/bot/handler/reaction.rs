//! Reaction handler for the registration message.

use serenity::all::{Context, Reaction};

use crate::{
    bot::prompt::{self, PromptOutcome},
    state::AppState,
};

/// Prompts users who react to the registration message.
///
/// Repeat reactions from a user who was already prompted are ignored, as are reactions
/// on any other message.
pub async fn handle_reaction_add(state: &AppState, ctx: Context, reaction: Reaction) {
    let Some(registration_message_id) = state.registration_message_id else {
        return;
    };
    if reaction.message_id.get() != registration_message_id {
        return;
    }

    let user = match reaction.user(&ctx).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("Failed to resolve reacting user: {}", e);
            return;
        }
    };
    if user.bot {
        return;
    }

    match prompt::prompt_user(state, &ctx, &user, true).await {
        Ok(PromptOutcome::DirectMessagesClosed) => {
            tracing::info!(
                "User {} reacted for registration but has DMs closed",
                user.id
            );
        }
        Ok(outcome) => {
            tracing::debug!("Registration reaction from {}: {:?}", user.id, outcome);
        }
        Err(e) => {
            state
                .incidents
                .report("Registration reaction failed", &e.to_string())
                .await;
        }
    }
}
