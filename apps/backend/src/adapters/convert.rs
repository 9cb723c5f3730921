//! Conversions between sea-orm models and domain types.

use crate::domain::{Card, CardType, Game, Phase, Player, Role, Room, Team};
use crate::entities::cards::DbCardType;
use crate::entities::games::DbPhase;
use crate::entities::players::{DbRole, DbTeam};
use crate::entities::{cards, games, players, rooms};

impl From<DbTeam> for Team {
    fn from(t: DbTeam) -> Self {
        match t {
            DbTeam::Red => Team::Red,
            DbTeam::Blue => Team::Blue,
        }
    }
}

impl From<Team> for DbTeam {
    fn from(t: Team) -> Self {
        match t {
            Team::Red => DbTeam::Red,
            Team::Blue => DbTeam::Blue,
        }
    }
}

impl From<DbRole> for Role {
    fn from(r: DbRole) -> Self {
        match r {
            DbRole::Spymaster => Role::Spymaster,
            DbRole::Operative => Role::Operative,
        }
    }
}

impl From<Role> for DbRole {
    fn from(r: Role) -> Self {
        match r {
            Role::Spymaster => DbRole::Spymaster,
            Role::Operative => DbRole::Operative,
        }
    }
}

impl From<DbPhase> for Phase {
    fn from(p: DbPhase) -> Self {
        match p {
            DbPhase::Lobby => Phase::Lobby,
            DbPhase::Playing => Phase::Playing,
            DbPhase::Finished => Phase::Finished,
        }
    }
}

impl From<Phase> for DbPhase {
    fn from(p: Phase) -> Self {
        match p {
            Phase::Lobby => DbPhase::Lobby,
            Phase::Playing => DbPhase::Playing,
            Phase::Finished => DbPhase::Finished,
        }
    }
}

impl From<DbCardType> for CardType {
    fn from(c: DbCardType) -> Self {
        match c {
            DbCardType::Red => CardType::Red,
            DbCardType::Blue => CardType::Blue,
            DbCardType::Neutral => CardType::Neutral,
            DbCardType::Assassin => CardType::Assassin,
        }
    }
}

impl From<CardType> for DbCardType {
    fn from(c: CardType) -> Self {
        match c {
            CardType::Red => DbCardType::Red,
            CardType::Blue => DbCardType::Blue,
            CardType::Neutral => DbCardType::Neutral,
            CardType::Assassin => DbCardType::Assassin,
        }
    }
}

impl From<rooms::Model> for Room {
    fn from(m: rooms::Model) -> Self {
        Room {
            id: m.id,
            created_at: m.created_at,
        }
    }
}

impl From<players::Model> for Player {
    fn from(m: players::Model) -> Self {
        Player {
            id: m.id,
            room_id: m.room_id,
            session_id: m.session_id,
            name: m.name,
            team: m.team.map(Team::from),
            role: m.role.map(Role::from),
            is_online: m.is_online,
        }
    }
}

impl From<games::Model> for Game {
    fn from(m: games::Model) -> Self {
        Game {
            id: m.id,
            room_id: m.room_id,
            phase: m.phase.into(),
            current_team: m.current_team.into(),
            current_clue: m.current_clue,
            current_number: m.current_number,
            guesses_left: m.guesses_left,
            winner: m.winner.map(Team::from),
            created_at: m.created_at,
        }
    }
}

impl From<cards::Model> for Card {
    fn from(m: cards::Model) -> Self {
        Card {
            id: m.id,
            game_id: m.game_id,
            word: m.word,
            card_type: m.card_type.into(),
            position: m.position,
            revealed: m.revealed,
            revealed_by: m.revealed_by.map(Team::from),
        }
    }
}
