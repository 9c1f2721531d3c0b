use super::*;

/// Tests finding an existing signup by Discord ID.
///
/// Expected: Ok(Some(SignupRecord)) with matching data
#[tokio::test]
async fn finds_existing_signup() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Signup)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    SignupFactory::new(db)
        .discord_id(987654321)
        .osu_id(31337)
        .country_code("NZ")
        .build()
        .await?;

    let repo = SignupRepository::new(db);
    let record = repo.find_by_discord_id(987654321).await?.unwrap();

    assert_eq!(record.discord_id, 987654321);
    assert_eq!(record.osu_id, 31337);
    assert_eq!(record.country_code, "NZ");

    Ok(())
}

/// Tests querying for a Discord user who never signed up.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_signup() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Signup)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SignupRepository::new(db);
    assert!(repo.find_by_discord_id(1).await?.is_none());

    Ok(())
}
