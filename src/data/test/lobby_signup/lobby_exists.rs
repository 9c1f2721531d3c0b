use super::*;

/// Tests looking up a lobby by ID.
///
/// Expected: true for a created lobby, false otherwise
#[tokio::test]
async fn finds_existing_lobby() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    LobbyFactory::new(db).lobby_id(3).build().await?;

    let repo = LobbySignupRepository::new(db);
    assert!(repo.lobby_exists(3).await?);
    assert!(!repo.lobby_exists(4).await?);

    Ok(())
}
