//! Service layer.
//!
//! Services hold the bot's behaviour. Discord handlers, the callback receiver and the
//! scheduler only translate their inputs and call into here.

pub mod incident;
pub mod lobby;
pub mod oauth;
pub mod presence;
pub mod signup;
pub mod token;
pub mod twitch;
