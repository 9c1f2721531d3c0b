//! Qualifier lobbies players can sign up to.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "lobby")]
pub struct Model {
    /// Number players type after `!lobby`.
    #[sea_orm(primary_key, auto_increment = false)]
    pub lobby_id: i32,
    pub starts_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::lobby_signup::Entity")]
    LobbySignup,
}

impl Related<super::lobby_signup::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LobbySignup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
