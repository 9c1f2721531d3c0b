pub use sea_orm_migration::prelude::*;

mod m20251210_000001_create_signup_table;
mod m20251211_000002_create_stream_announcement_table;
mod m20251212_000003_create_lobby_table;
mod m20251212_000004_create_lobby_signup_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251210_000001_create_signup_table::Migration),
            Box::new(m20251211_000002_create_stream_announcement_table::Migration),
            Box::new(m20251212_000003_create_lobby_table::Migration),
            Box::new(m20251212_000004_create_lobby_signup_table::Migration),
        ]
    }
}
