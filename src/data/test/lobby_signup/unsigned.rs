use super::*;

/// Tests listing registered players who are in no lobby.
///
/// Expected: only the unplaced players, oldest signup first
#[tokio::test]
async fn lists_players_without_lobby() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    SignupFactory::new(db).discord_id(1).osu_id(11).build().await?;
    SignupFactory::new(db).discord_id(2).osu_id(22).build().await?;
    SignupFactory::new(db).discord_id(3).osu_id(33).build().await?;
    LobbyFactory::new(db).lobby_id(1).build().await?;
    place_in_lobby(db, 2, 1).await?;

    let repo = LobbySignupRepository::new(db);
    let unsigned: Vec<i64> = repo
        .unsigned()
        .await?
        .into_iter()
        .map(|record| record.osu_id)
        .collect();

    assert_eq!(unsigned, vec![11, 33]);

    Ok(())
}

/// Tests that no players are listed once everyone is placed.
///
/// Expected: empty list
#[tokio::test]
async fn empty_when_all_placed() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    SignupFactory::new(db).discord_id(1).build().await?;
    LobbyFactory::new(db).lobby_id(1).build().await?;
    place_in_lobby(db, 1, 1).await?;

    let repo = LobbySignupRepository::new(db);
    assert!(repo.unsigned().await?.is_empty());

    Ok(())
}
