//! Stream announcement data repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
};

/// Repository tracking which stream start was last announced per Twitch channel.
pub struct StreamAnnouncementRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StreamAnnouncementRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records `started_at` as the latest announced stream start if it is newer than the
    /// stored one.
    ///
    /// The comparison happens inside a single upsert so concurrent pollers cannot both
    /// claim the same stream.
    ///
    /// # Returns
    /// - `Ok(true)` - The stream start is new and was recorded; it should be announced
    /// - `Ok(false)` - This stream (or a later one) was already announced
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn record_if_newer(
        &self,
        channel_login: &str,
        started_at: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::StreamAnnouncement::insert(
            entity::stream_announcement::ActiveModel {
                channel_login: ActiveValue::Set(channel_login.to_string()),
                started_at: ActiveValue::Set(started_at),
            },
        )
        .on_conflict(
            OnConflict::column(entity::stream_announcement::Column::ChannelLogin)
                .update_column(entity::stream_announcement::Column::StartedAt)
                .action_and_where(entity::stream_announcement::Column::StartedAt.lt(started_at))
                .to_owned(),
        )
        .exec_without_returning(self.db)
        .await;

        match result {
            Ok(rows) => Ok(rows > 0),
            Err(DbErr::RecordNotInserted) => Ok(false),
            Err(err) => Err(err),
        }
    }
}
