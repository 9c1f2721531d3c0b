use super::*;

/// Tests leaving the lobby the player is in.
///
/// Expected: Ok(true) and the player no longer placed
#[tokio::test]
async fn leaves_lobby() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    SignupFactory::new(db).discord_id(1).build().await?;
    LobbyFactory::new(db).lobby_id(1).build().await?;
    place_in_lobby(db, 1, 1).await?;

    let repo = LobbySignupRepository::new(db);
    assert!(repo.leave(1, 1).await?);
    assert_eq!(repo.current_lobby(1).await?, None);

    Ok(())
}

/// Tests leaving a lobby the player is not in.
///
/// Expected: Ok(false) and the player's actual lobby kept
#[tokio::test]
async fn ignores_other_lobby() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    SignupFactory::new(db).discord_id(1).build().await?;
    LobbyFactory::new(db).lobby_id(1).build().await?;
    LobbyFactory::new(db).lobby_id(2).build().await?;
    place_in_lobby(db, 1, 1).await?;

    let repo = LobbySignupRepository::new(db);
    assert!(!repo.leave(1, 2).await?);
    assert_eq!(repo.current_lobby(1).await?, Some(1));

    Ok(())
}
