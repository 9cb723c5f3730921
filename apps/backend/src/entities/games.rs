use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

use super::players::DbTeam;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum DbPhase {
    #[sea_orm(string_value = "lobby")]
    Lobby,
    #[sea_orm(string_value = "playing")]
    Playing,
    #[sea_orm(string_value = "finished")]
    Finished,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "room_id")]
    pub room_id: String,
    pub phase: DbPhase,
    #[sea_orm(column_name = "current_team")]
    pub current_team: DbTeam,
    #[sea_orm(column_name = "current_clue")]
    pub current_clue: String,
    #[sea_orm(column_name = "current_number")]
    pub current_number: i32,
    #[sea_orm(column_name = "guesses_left")]
    pub guesses_left: i32,
    pub winner: Option<DbTeam>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rooms::Entity",
        from = "Column::RoomId",
        to = "super::rooms::Column::Id"
    )]
    Room,
    #[sea_orm(has_many = "super::cards::Entity")]
    Cards,
}

impl Related<super::rooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl Related<super::cards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cards.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
