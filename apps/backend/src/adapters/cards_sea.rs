//! SeaORM adapter for cards - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::cards::{self, DbCardType};
use crate::entities::players::DbTeam;

pub struct CardCreate {
    pub word: String,
    pub card_type: DbCardType,
    pub position: i16,
}

pub async fn insert_many<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    cells: Vec<CardCreate>,
) -> Result<(), sea_orm::DbErr> {
    if cells.is_empty() {
        return Ok(());
    }
    let rows = cells.into_iter().map(|c| cards::ActiveModel {
        id: NotSet,
        game_id: Set(game_id),
        word: Set(c.word),
        card_type: Set(c.card_type),
        position: Set(c.position),
        revealed: Set(false),
        revealed_by: Set(None),
    });
    cards::Entity::insert_many(rows)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<cards::Model>, sea_orm::DbErr> {
    cards::Entity::find()
        .filter(cards::Column::GameId.eq(game_id))
        .order_by_asc(cards::Column::Position)
        .all(conn)
        .await
}

pub async fn reveal<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_id: i64,
    team: DbTeam,
) -> Result<(), sea_orm::DbErr> {
    cards::ActiveModel {
        id: Set(card_id),
        revealed: Set(true),
        revealed_by: Set(Some(team)),
        ..Default::default()
    }
    .update(conn)
    .await?;
    Ok(())
}
