//! SeaORM adapter for players - generic over ConnectionTrait.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::players::{self, DbRole, DbTeam};

pub async fn find_by_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: &str,
    room_id: &str,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .filter(players::Column::RoomId.eq(room_id))
        .filter(players::Column::SessionId.eq(session_id))
        .one(conn)
        .await
}

/// Insert, or on (room_id, session_id) conflict rename and mark online.
/// Team and role of an existing player are preserved.
pub async fn upsert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
    session_id: &str,
    name: &str,
) -> Result<players::Model, sea_orm::DbErr> {
    let row = players::ActiveModel {
        id: NotSet,
        room_id: Set(room_id.to_string()),
        session_id: Set(session_id.to_string()),
        name: Set(name.to_string()),
        team: Set(None),
        role: Set(None),
        is_online: Set(true),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    players::Entity::insert(row)
        .on_conflict(
            OnConflict::columns([players::Column::RoomId, players::Column::SessionId])
                .update_columns([players::Column::Name, players::Column::IsOnline])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    find_by_session(conn, session_id, room_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Player not found".to_string()))
}

pub async fn list_by_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<Vec<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .filter(players::Column::RoomId.eq(room_id))
        .order_by_asc(players::Column::Name)
        .order_by_asc(players::Column::Id)
        .all(conn)
        .await
}

pub async fn set_team_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    team: Option<DbTeam>,
    role: Option<DbRole>,
) -> Result<(), sea_orm::DbErr> {
    players::ActiveModel {
        id: Set(player_id),
        team: Set(team),
        role: Set(role),
        ..Default::default()
    }
    .update(conn)
    .await?;
    Ok(())
}

pub async fn set_online<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    online: bool,
) -> Result<(), sea_orm::DbErr> {
    players::ActiveModel {
        id: Set(player_id),
        is_online: Set(online),
        ..Default::default()
    }
    .update(conn)
    .await?;
    Ok(())
}

pub async fn reset_teams_and_roles<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: &str,
) -> Result<u64, sea_orm::DbErr> {
    let result = players::Entity::update_many()
        .set(players::ActiveModel {
            team: Set(None),
            role: Set(None),
            ..Default::default()
        })
        .filter(players::Column::RoomId.eq(room_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
