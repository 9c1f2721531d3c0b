//! Which qualifier lobby a signed-up player is in, at most one per player.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "lobby_signup")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub discord_id: String,
    pub lobby_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lobby::Entity",
        from = "Column::LobbyId",
        to = "super::lobby::Column::LobbyId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Lobby,
    #[sea_orm(
        belongs_to = "super::signup::Entity",
        from = "Column::DiscordId",
        to = "super::signup::Column::DiscordId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Signup,
}

impl Related<super::lobby::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lobby.def()
    }
}

impl Related<super::signup::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Signup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
