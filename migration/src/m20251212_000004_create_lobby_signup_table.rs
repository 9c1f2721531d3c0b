use sea_orm_migration::{prelude::*, schema::*};

use super::m20251210_000001_create_signup_table::Signup;
use super::m20251212_000003_create_lobby_table::Lobby;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LobbySignup::Table)
                    .if_not_exists()
                    .col(string(LobbySignup::DiscordId).primary_key())
                    .col(integer(LobbySignup::LobbyId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lobby_signup_discord_id")
                            .from(LobbySignup::Table, LobbySignup::DiscordId)
                            .to(Signup::Table, Signup::DiscordId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lobby_signup_lobby_id")
                            .from(LobbySignup::Table, LobbySignup::LobbyId)
                            .to(Lobby::Table, Lobby::LobbyId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx_lobby_signup_lobby_id")
                            .col(LobbySignup::LobbyId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LobbySignup::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum LobbySignup {
    Table,
    DiscordId,
    LobbyId,
}
