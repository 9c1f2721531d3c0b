use super::*;

/// Tests that the first stream seen for a channel is recorded.
///
/// Expected: Ok(true) and the start time stored
#[tokio::test]
async fn records_first_stream() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::StreamAnnouncement)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let started_at = Utc.with_ymd_and_hms(2025, 12, 1, 8, 0, 0).unwrap();
    let repo = StreamAnnouncementRepository::new(db);

    assert!(repo.record_if_newer("anztournament", started_at).await?);
    assert_eq!(stored_start(db, "anztournament").await?, Some(started_at));

    Ok(())
}

/// Tests that polling the same live stream again is not announced twice.
///
/// Expected: Ok(false) on the repeat
#[tokio::test]
async fn skips_already_announced_stream() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::StreamAnnouncement)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let started_at = Utc.with_ymd_and_hms(2025, 12, 1, 8, 0, 0).unwrap();
    let repo = StreamAnnouncementRepository::new(db);

    assert!(repo.record_if_newer("anztournament", started_at).await?);
    assert!(!repo.record_if_newer("anztournament", started_at).await?);

    Ok(())
}

/// Tests that a later stream on the same channel is announced and an older one is not.
///
/// Expected: newer start recorded, older start ignored
#[tokio::test]
async fn only_newer_streams_replace_record() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::StreamAnnouncement)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = Utc.with_ymd_and_hms(2025, 12, 1, 8, 0, 0).unwrap();
    let second = first + Duration::hours(24);
    let repo = StreamAnnouncementRepository::new(db);

    assert!(repo.record_if_newer("anztournament", first).await?);
    assert!(repo.record_if_newer("anztournament", second).await?);
    assert!(!repo.record_if_newer("anztournament", first).await?);
    assert_eq!(stored_start(db, "anztournament").await?, Some(second));

    Ok(())
}

/// Tests that channels are tracked independently.
///
/// Expected: Ok(true) for each channel
#[tokio::test]
async fn tracks_channels_independently() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::StreamAnnouncement)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let started_at = Utc.with_ymd_and_hms(2025, 12, 1, 8, 0, 0).unwrap();
    let repo = StreamAnnouncementRepository::new(db);

    assert!(repo.record_if_newer("first_channel", started_at).await?);
    assert!(repo.record_if_newer("second_channel", started_at).await?);

    Ok(())
}
