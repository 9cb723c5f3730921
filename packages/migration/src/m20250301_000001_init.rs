use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKey, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Rooms {
    Table,
    Id,
    CreatedAt,
}

#[derive(Iden)]
enum Players {
    Table,
    Id,
    RoomId,
    SessionId,
    Name,
    Team,
    Role,
    IsOnline,
    CreatedAt,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    RoomId,
    Phase,
    CurrentTeam,
    CurrentClue,
    CurrentNumber,
    GuessesLeft,
    Winner,
    CreatedAt,
}

#[derive(Iden)]
enum Cards {
    Table,
    Id,
    GameId,
    Word,
    CardType,
    Position,
    Revealed,
    RevealedBy,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rooms::Id)
                            .string_len(16)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Rooms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Players::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Players::RoomId).string_len(16).not_null())
                    .col(ColumnDef::new(Players::SessionId).string_len(128).not_null())
                    .col(ColumnDef::new(Players::Name).string_len(64).not_null())
                    .col(ColumnDef::new(Players::Team).string_len(16).null())
                    .col(ColumnDef::new(Players::Role).string_len(16).null())
                    .col(
                        ColumnDef::new(Players::IsOnline)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Players::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_players_room")
                            .from(Players::Table, Players::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one player row per (room, session)
        manager
            .create_index(
                Index::create()
                    .name("ux_players_room_session")
                    .table(Players::Table)
                    .col(Players::RoomId)
                    .col(Players::SessionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Games::RoomId).string_len(16).not_null())
                    .col(ColumnDef::new(Games::Phase).string_len(16).not_null())
                    .col(ColumnDef::new(Games::CurrentTeam).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Games::CurrentClue)
                            .string_len(128)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Games::CurrentNumber)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Games::GuessesLeft)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Games::Winner).string_len(16).null())
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_room")
                            .from(Games::Table, Games::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_games_room_created")
                    .table(Games::Table)
                    .col(Games::RoomId)
                    .col(Games::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Cards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cards::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cards::GameId).big_integer().not_null())
                    .col(ColumnDef::new(Cards::Word).string_len(64).not_null())
                    .col(ColumnDef::new(Cards::CardType).string_len(16).not_null())
                    .col(ColumnDef::new(Cards::Position).small_integer().not_null())
                    .col(
                        ColumnDef::new(Cards::Revealed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Cards::RevealedBy).string_len(16).null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cards_game")
                            .from(Cards::Table, Cards::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Board positions are unique within a game
        manager
            .create_index(
                Index::create()
                    .name("ux_cards_game_position")
                    .table(Cards::Table)
                    .col(Cards::GameId)
                    .col(Cards::Position)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cards::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Players::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rooms::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
