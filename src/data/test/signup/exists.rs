use super::*;

/// Tests existence check for a signed up user.
///
/// Expected: Ok(true)
#[tokio::test]
async fn returns_true_for_signed_up_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Signup)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    SignupFactory::new(db).discord_id(42).build().await?;

    let repo = SignupRepository::new(db);
    assert!(repo.exists(42).await?);

    Ok(())
}

/// Tests existence check when only other users have signed up.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_unknown_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Signup)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    SignupFactory::new(db).discord_id(42).build().await?;

    let repo = SignupRepository::new(db);
    assert!(!repo.exists(43).await?);

    Ok(())
}
