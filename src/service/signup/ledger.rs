//! Database-backed signup ledger.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr};

use crate::{
    data::signup::SignupRepository,
    model::signup::{CreateSignupParam, SignupRecord},
    service::signup::SignupLedger,
};

/// Signup ledger persisted through SeaORM.
#[derive(Clone)]
pub struct DatabaseSignupLedger {
    db: DatabaseConnection,
}

impl DatabaseSignupLedger {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SignupLedger for DatabaseSignupLedger {
    async fn exists(&self, discord_id: u64) -> Result<bool, DbErr> {
        SignupRepository::new(&self.db).exists(discord_id).await
    }

    async fn find(&self, discord_id: u64) -> Result<Option<SignupRecord>, DbErr> {
        SignupRepository::new(&self.db)
            .find_by_discord_id(discord_id)
            .await
    }

    async fn insert(&self, param: CreateSignupParam) -> Result<Option<SignupRecord>, DbErr> {
        SignupRepository::new(&self.db).create(param).await
    }
}
