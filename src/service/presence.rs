//! Stream presence polling.
//!
//! Each tick asks Twitch whether the tournament channel is live, mirrors the answer in
//! the bot's presence and announces streams that have not been announced before. The
//! last announced start time per channel is kept in the database so a restart does not
//! ping the same stream twice.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::{
    data::stream_announcement::StreamAnnouncementRepository, error::AppError,
    model::stream::LiveStream, service::twitch::TwitchClient,
};

/// Where the bot's presence is displayed.
#[async_trait]
pub trait PresenceSink: Send + Sync {
    /// Shows the bot as streaming `stream`.
    async fn show_stream(&self, stream: &LiveStream);

    /// Clears any streaming presence.
    async fn clear(&self);
}

/// Announces a stream that just went live.
#[async_trait]
pub trait StreamNotifier: Send + Sync {
    async fn announce(&self, stream: &LiveStream) -> Result<(), AppError>;
}

/// Outcome of one poll, for logging and tests.
#[derive(Debug, PartialEq, Eq)]
pub enum PresenceUpdate {
    Offline,
    Live { announced: bool },
}

/// Polls Twitch and updates presence and stream pings.
#[derive(Clone)]
pub struct PresenceService {
    db: DatabaseConnection,
    twitch: TwitchClient,
    channel: String,
    sink: Arc<dyn PresenceSink>,
    notifier: Option<Arc<dyn StreamNotifier>>,
}

impl PresenceService {
    /// Creates a new PresenceService.
    ///
    /// # Arguments
    /// - `db` - Database connection for the announcement record
    /// - `twitch` - Twitch Helix client
    /// - `channel` - Login name of the monitored channel
    /// - `sink` - Where presence is shown
    /// - `notifier` - Stream ping target, `None` disables pings
    pub fn new(
        db: DatabaseConnection,
        twitch: TwitchClient,
        channel: String,
        sink: Arc<dyn PresenceSink>,
        notifier: Option<Arc<dyn StreamNotifier>>,
    ) -> Self {
        Self {
            db,
            twitch,
            channel,
            sink,
            notifier,
        }
    }

    /// Runs one poll.
    ///
    /// # Returns
    /// - `Ok(PresenceUpdate)` - What the poll observed and did
    /// - `Err(AppError)` - Twitch, database or Discord failure; the next tick is unaffected
    pub async fn tick(&self) -> Result<PresenceUpdate, AppError> {
        let Some(stream) = self.twitch.fetch_live_stream(&self.channel).await? else {
            self.sink.clear().await;
            return Ok(PresenceUpdate::Offline);
        };

        self.sink.show_stream(&stream).await;

        let Some(notifier) = &self.notifier else {
            return Ok(PresenceUpdate::Live { announced: false });
        };

        // Recorded before sending so a failed send is never retried into a double ping.
        let is_new = StreamAnnouncementRepository::new(&self.db)
            .record_if_newer(&stream.user_login, stream.started_at)
            .await?;
        if !is_new {
            return Ok(PresenceUpdate::Live { announced: false });
        }

        tracing::info!(
            channel = %stream.user_login,
            started_at = %stream.started_at,
            "Announcing live stream"
        );
        notifier.announce(&stream).await?;

        Ok(PresenceUpdate::Live { announced: true })
    }
}
