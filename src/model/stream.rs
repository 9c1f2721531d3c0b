//! Twitch stream models.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A live stream as reported by the Twitch Helix streams endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LiveStream {
    pub user_login: String,
    pub user_name: String,
    pub title: String,
    pub started_at: DateTime<Utc>,
}

impl LiveStream {
    /// Public URL of the channel.
    pub fn url(&self) -> String {
        format!("https://www.twitch.tv/{}", self.user_login)
    }

    /// Title used for the bot's presence and announcements.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "with no title"
        } else {
            &self.title
        }
    }
}

/// Envelope of the Helix streams response.
#[derive(Debug, Deserialize)]
pub struct StreamsResponse {
    pub data: Vec<LiveStream>,
}
