use super::*;

/// Tests recording a first signup for a Discord user.
///
/// Expected: Ok(Some(SignupRecord)) carrying the provided identifiers
#[tokio::test]
async fn creates_signup() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Signup)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SignupRepository::new(db);
    let record = repo
        .create(CreateSignupParam {
            discord_id: 123456789,
            osu_id: 4242,
            country_code: "NZ".to_string(),
        })
        .await?;

    let record = record.expect("first signup should be recorded");
    assert_eq!(record.discord_id, 123456789);
    assert_eq!(record.osu_id, 4242);
    assert_eq!(record.country_code, "NZ");
    assert_eq!(repo.count().await?, 1);

    Ok(())
}

/// Tests that a second signup for the same Discord user writes nothing.
///
/// Expected: Ok(None) and the original row unchanged
#[tokio::test]
async fn returns_none_for_duplicate_discord_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Signup)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    SignupFactory::new(db)
        .discord_id(555)
        .osu_id(1)
        .build()
        .await?;

    let repo = SignupRepository::new(db);
    let result = repo
        .create(CreateSignupParam {
            discord_id: 555,
            osu_id: 2,
            country_code: "AU".to_string(),
        })
        .await?;

    assert!(result.is_none());
    assert_eq!(repo.count().await?, 1);
    let stored = repo.find_by_discord_id(555).await?.unwrap();
    assert_eq!(stored.osu_id, 1);

    Ok(())
}

/// Tests that concurrent signups for one Discord user produce exactly one row.
///
/// Expected: exactly one Some among the results
#[tokio::test]
async fn concurrent_duplicates_record_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Signup)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SignupRepository::new(db);
    let param = |osu_id| CreateSignupParam {
        discord_id: 777,
        osu_id,
        country_code: "AU".to_string(),
    };

    let (a, b, c) = tokio::join!(
        repo.create(param(1)),
        repo.create(param(2)),
        repo.create(param(3))
    );

    let recorded = [a?, b?, c?].into_iter().flatten().count();
    assert_eq!(recorded, 1);
    assert_eq!(repo.count().await?, 1);

    Ok(())
}

/// Tests that a missing table surfaces as a database error rather than a duplicate.
///
/// Expected: Err(DbErr)
#[tokio::test]
async fn fails_without_table() -> Result<(), DbErr> {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SignupRepository::new(db);
    let result = repo
        .create(CreateSignupParam {
            discord_id: 1,
            osu_id: 1,
            country_code: "AU".to_string(),
        })
        .await;

    assert!(result.is_err());

    Ok(())
}
