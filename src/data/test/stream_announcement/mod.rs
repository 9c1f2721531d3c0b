use crate::data::stream_announcement::StreamAnnouncementRepository;
use chrono::{Duration, TimeZone, Utc};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};
use test_utils::builder::TestBuilder;

mod record_if_newer;

async fn stored_start(
    db: &DatabaseConnection,
    channel_login: &str,
) -> Result<Option<chrono::DateTime<Utc>>, DbErr> {
    Ok(
        entity::prelude::StreamAnnouncement::find_by_id(channel_login.to_string())
            .one(db)
            .await?
            .map(|row| row.started_at),
    )
}
