use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lobby::Table)
                    .if_not_exists()
                    .col(integer(Lobby::LobbyId).primary_key())
                    .col(timestamp_with_time_zone(Lobby::StartsAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Lobby::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Lobby {
    Table,
    LobbyId,
    StartsAt,
}
