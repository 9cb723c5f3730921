//! SeaORM adapter for games - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::games::{self, DbPhase};
use crate::entities::players::DbTeam;

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
    first_team: DbTeam,
) -> Result<games::Model, sea_orm::DbErr> {
    games::ActiveModel {
        id: NotSet,
        room_id: Set(room_id.to_string()),
        phase: Set(DbPhase::Playing),
        current_team: Set(first_team),
        current_clue: Set(String::new()),
        current_number: Set(0),
        guesses_left: Set(0),
        winner: Set(None),
        created_at: Set(time::OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await
}

/// Latest non-lobby game for the room; id breaks created_at ties.
pub async fn find_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::RoomId.eq(room_id))
        .filter(games::Column::Phase.ne(DbPhase::Lobby))
        .order_by_desc(games::Column::CreatedAt)
        .order_by_desc(games::Column::Id)
        .one(conn)
        .await
}

pub struct GameUpdate {
    pub id: i64,
    pub phase: DbPhase,
    pub current_team: DbTeam,
    pub current_clue: String,
    pub current_number: i32,
    pub guesses_left: i32,
    pub winner: Option<DbTeam>,
}

pub async fn update_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameUpdate,
) -> Result<(), sea_orm::DbErr> {
    games::ActiveModel {
        id: Set(dto.id),
        phase: Set(dto.phase),
        current_team: Set(dto.current_team),
        current_clue: Set(dto.current_clue),
        current_number: Set(dto.current_number),
        guesses_left: Set(dto.guesses_left),
        winner: Set(dto.winner),
        ..Default::default()
    }
    .update(conn)
    .await?;
    Ok(())
}

pub async fn finish_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    winner: DbTeam,
) -> Result<(), sea_orm::DbErr> {
    games::ActiveModel {
        id: Set(game_id),
        phase: Set(DbPhase::Finished),
        winner: Set(Some(winner)),
        ..Default::default()
    }
    .update(conn)
    .await?;
    Ok(())
}
