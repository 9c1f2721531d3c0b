//! Verified tournament signups, one row per Discord user.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "signup")]
pub struct Model {
    /// Discord user ID, stored as a string to avoid signed 64-bit overflow.
    #[sea_orm(primary_key, auto_increment = false)]
    pub discord_id: String,
    pub osu_id: i64,
    pub country_code: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
