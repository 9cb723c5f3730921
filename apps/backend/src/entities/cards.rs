use sea_orm::entity::prelude::*;

use super::players::DbTeam;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum DbCardType {
    #[sea_orm(string_value = "red")]
    Red,
    #[sea_orm(string_value = "blue")]
    Blue,
    #[sea_orm(string_value = "neutral")]
    Neutral,
    #[sea_orm(string_value = "assassin")]
    Assassin,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "game_id")]
    pub game_id: i64,
    pub word: String,
    #[sea_orm(column_name = "card_type")]
    pub card_type: DbCardType,
    #[sea_orm(column_type = "SmallInteger")]
    pub position: i16,
    pub revealed: bool,
    #[sea_orm(column_name = "revealed_by")]
    pub revealed_by: Option<DbTeam>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::games::Entity",
        from = "Column::GameId",
        to = "super::games::Column::Id"
    )]
    Game,
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
