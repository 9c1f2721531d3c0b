use super::*;

/// Tests joining a lobby with no previous lobby signup.
///
/// Expected: Ok(true) and the player placed in the lobby
#[tokio::test]
async fn joins_lobby() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    SignupFactory::new(db).discord_id(1).build().await?;
    LobbyFactory::new(db).lobby_id(1).build().await?;

    let repo = LobbySignupRepository::new(db);
    assert!(repo.join(1, 1).await?);
    assert_eq!(repo.current_lobby(1).await?, Some(1));

    Ok(())
}

/// Tests that joining another lobby moves the player instead of adding a second signup.
///
/// Expected: Ok(true) and only the new lobby recorded
#[tokio::test]
async fn switches_lobby() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    SignupFactory::new(db).discord_id(1).build().await?;
    LobbyFactory::new(db).lobby_id(1).build().await?;
    LobbyFactory::new(db).lobby_id(2).build().await?;
    place_in_lobby(db, 1, 1).await?;

    let repo = LobbySignupRepository::new(db);
    assert!(repo.join(1, 2).await?);
    assert_eq!(repo.current_lobby(1).await?, Some(2));

    Ok(())
}

/// Tests joining the lobby the player is already in.
///
/// Expected: Ok(false) and the signup unchanged
#[tokio::test]
async fn rejoining_same_lobby_changes_nothing() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    SignupFactory::new(db).discord_id(1).build().await?;
    LobbyFactory::new(db).lobby_id(1).build().await?;
    place_in_lobby(db, 1, 1).await?;

    let repo = LobbySignupRepository::new(db);
    assert!(!repo.join(1, 1).await?);
    assert_eq!(repo.current_lobby(1).await?, Some(1));

    Ok(())
}

/// Tests that a full lobby refuses new players.
///
/// Expected: Ok(false) and the player left unplaced
#[tokio::test]
async fn refuses_full_lobby() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    LobbyFactory::new(db).lobby_id(1).build().await?;
    seat_players(db, 1, LOBBY_CAPACITY).await?;
    SignupFactory::new(db).discord_id(1).build().await?;

    let repo = LobbySignupRepository::new(db);
    assert!(!repo.join(1, 1).await?);
    assert_eq!(repo.current_lobby(1).await?, None);

    Ok(())
}

/// Tests that switching into a full lobby keeps the player's current lobby.
///
/// Expected: Ok(false) and the original lobby kept
#[tokio::test]
async fn switch_to_full_lobby_keeps_current() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    LobbyFactory::new(db).lobby_id(1).build().await?;
    LobbyFactory::new(db).lobby_id(2).build().await?;
    seat_players(db, 2, LOBBY_CAPACITY).await?;
    SignupFactory::new(db).discord_id(1).build().await?;
    place_in_lobby(db, 1, 1).await?;

    let repo = LobbySignupRepository::new(db);
    assert!(!repo.join(1, 2).await?);
    assert_eq!(repo.current_lobby(1).await?, Some(1));

    Ok(())
}

/// Tests that players racing for the last spot in a lobby cannot overfill it.
///
/// Expected: exactly one of the racing joins succeeds
#[tokio::test]
async fn concurrent_joins_respect_capacity() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    LobbyFactory::new(db).lobby_id(1).build().await?;
    seat_players(db, 1, LOBBY_CAPACITY - 1).await?;
    SignupFactory::new(db).discord_id(1).build().await?;
    SignupFactory::new(db).discord_id(2).build().await?;
    SignupFactory::new(db).discord_id(3).build().await?;

    let repo = LobbySignupRepository::new(db);
    let (a, b, c) = tokio::join!(repo.join(1, 1), repo.join(2, 1), repo.join(3, 1));

    let joined = [a?, b?, c?].into_iter().filter(|joined| *joined).count();
    assert_eq!(joined, 1);

    Ok(())
}

/// Tests that joining a lobby that does not exist is a database error.
///
/// Expected: Err(DbErr) from the foreign key
#[tokio::test]
async fn fails_for_unknown_lobby() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    SignupFactory::new(db).discord_id(1).build().await?;

    let repo = LobbySignupRepository::new(db);
    assert!(repo.join(1, 99).await.is_err());

    Ok(())
}
