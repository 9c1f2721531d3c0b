//! Discord bot integration.
//!
//! The bot sends registration prompts, manages qualifier lobby signups, answers
//! operator commands and mirrors the tournament stream in its presence. It runs in its own tokio task next to the
//! callback receiver and the presence scheduler.
//!
//! # Gateway Intents
//!
//! - `GUILD_MESSAGES` / `DIRECT_MESSAGES` - Receive chat commands
//! - `MESSAGE_CONTENT` - Read command text (privileged intent)
//! - `GUILD_MESSAGE_REACTIONS` - Receive reactions on the registration message
//!
//! `MESSAGE_CONTENT` must be enabled in the Discord Developer Portal for the bot
//! application.

pub mod handler;
pub mod presence;
pub mod prompt;
pub mod role;
pub mod start;
