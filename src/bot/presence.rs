//! Discord implementations of the presence poller's outputs.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::{
    all::{
        ActivityData, ChannelId, CreateAllowedMentions, CreateEmbed, CreateEmbedAuthor,
        CreateMessage, EditRole, GuildId, RoleId, ShardManager, Timestamp,
    },
    http::Http,
};

use crate::{
    config::StreamPingConfig,
    error::AppError,
    model::stream::LiveStream,
    service::presence::{PresenceSink, StreamNotifier},
};

/// Twitch purple.
const STREAM_EMBED_COLOR: u32 = 0x9146ff;

/// Sets the bot's activity on every running shard.
pub struct ShardPresence {
    shard_manager: Arc<ShardManager>,
}

impl ShardPresence {
    pub fn new(shard_manager: Arc<ShardManager>) -> Self {
        Self { shard_manager }
    }

    async fn set_activity(&self, activity: Option<ActivityData>) {
        let runners = self.shard_manager.runners.lock().await;
        for runner in runners.values() {
            runner.runner_tx.set_activity(activity.clone());
        }
    }
}

#[async_trait]
impl PresenceSink for ShardPresence {
    async fn show_stream(&self, stream: &LiveStream) {
        match ActivityData::streaming(stream.display_title(), stream.url()) {
            Ok(activity) => self.set_activity(Some(activity)).await,
            Err(e) => tracing::warn!("Invalid streaming activity for {}: {}", stream.url(), e),
        }
    }

    async fn clear(&self) {
        self.set_activity(None).await;
    }
}

/// Pings the stream role in the announcement channel.
pub struct DiscordStreamNotifier {
    http: Arc<Http>,
    guild_id: GuildId,
    channel_id: ChannelId,
    role_id: RoleId,
}

impl DiscordStreamNotifier {
    pub fn new(http: Arc<Http>, ping: &StreamPingConfig) -> Self {
        Self {
            http,
            guild_id: GuildId::new(ping.guild_id),
            channel_id: ChannelId::new(ping.channel_id),
            role_id: RoleId::new(ping.role_id),
        }
    }

    async fn set_mentionable(&self, mentionable: bool) -> Result<(), AppError> {
        self.guild_id
            .edit_role(
                &self.http,
                self.role_id,
                EditRole::new().mentionable(mentionable),
            )
            .await?;

        Ok(())
    }
}

#[async_trait]
impl StreamNotifier for DiscordStreamNotifier {
    async fn announce(&self, stream: &LiveStream) -> Result<(), AppError> {
        let message = CreateMessage::new()
            .content(format!("<@&{}>", self.role_id))
            .embed(build_stream_embed(stream))
            .allowed_mentions(CreateAllowedMentions::new().roles(vec![self.role_id]));

        // The role stays unmentionable outside of announcements.
        self.set_mentionable(true).await?;
        let sent = self.channel_id.send_message(&self.http, message).await;
        let restored = self.set_mentionable(false).await;

        sent?;
        restored
    }
}

/// Builds the embed announcing a live stream.
pub fn build_stream_embed(stream: &LiveStream) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(stream.display_title())
        .url(stream.url())
        .color(STREAM_EMBED_COLOR)
        .author(CreateEmbedAuthor::new(format!("{} is now live!", stream.user_name)).url(stream.url()));

    if let Ok(timestamp) = Timestamp::from_unix_timestamp(stream.started_at.timestamp()) {
        embed = embed.timestamp(timestamp);
    }

    embed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    /// Tests the announcement embed links to the channel.
    ///
    /// Expected: title, url and author set from the stream
    #[test]
    fn builds_stream_embed() {
        let stream = LiveStream {
            user_login: "anztournament".to_string(),
            user_name: "ANZTournament".to_string(),
            title: "Grand Finals".to_string(),
            started_at: Utc.with_ymd_and_hms(2025, 12, 1, 8, 0, 0).unwrap(),
        };

        let embed = serde_json::to_value(build_stream_embed(&stream)).unwrap();

        assert_eq!(embed["title"], "Grand Finals");
        assert_eq!(embed["url"], "https://www.twitch.tv/anztournament");
        assert_eq!(embed["author"]["name"], "ANZTournament is now live!");
    }
}
