use super::*;

/// Tests getting the lobby a player is in.
///
/// Expected: Some(lobby_id) for a placed player, None for an unplaced one
#[tokio::test]
async fn returns_players_lobby() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    SignupFactory::new(db).discord_id(1).build().await?;
    SignupFactory::new(db).discord_id(2).build().await?;
    LobbyFactory::new(db).lobby_id(7).build().await?;
    place_in_lobby(db, 1, 7).await?;

    let repo = LobbySignupRepository::new(db);
    assert_eq!(repo.current_lobby(1).await?, Some(7));
    assert_eq!(repo.current_lobby(2).await?, None);

    Ok(())
}
