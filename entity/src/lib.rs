//! SeaORM entity models for the bot's persistent tables.

pub mod prelude;

pub mod lobby;
pub mod lobby_signup;
pub mod signup;
pub mod stream_announcement;
