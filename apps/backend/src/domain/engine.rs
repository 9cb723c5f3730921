//! Turn engine: pure state transitions for a game in progress.
//!
//! Every operation validates all of its preconditions before touching the
//! game or cards, so a returned error never leaves partial mutations behind.
//! Persistence is the caller's job (see `services::game_flow`).

use rand::Rng;

use super::board::BOARD_SIZE;
use super::model::{Card, Game, Player};
use super::types::{CardId, CardType, Phase, Role, Team};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// Guess allowance granted by a clue with number 0.
pub const UNLIMITED_GUESSES: i32 = BOARD_SIZE as i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Own card; the team may keep guessing.
    Correct,
    /// Turn passed to the other team (wrong card or guesses used up).
    TurnEnded,
    /// Game over.
    Won { winner: Team },
}

/// Roster check: exactly one spymaster and at least one operative per team.
pub fn can_start_game(players: &[Player]) -> Result<(), DomainError> {
    let count = |team: Team, role: Role| {
        players
            .iter()
            .filter(|p| p.team == Some(team) && p.role == Some(role))
            .count()
    };

    let composition = |msg: &str| DomainError::validation(ValidationKind::TeamComposition, msg);

    if count(Team::Red, Role::Spymaster) != 1 {
        return Err(composition("red team needs exactly 1 spymaster"));
    }
    if count(Team::Blue, Role::Spymaster) != 1 {
        return Err(composition("blue team needs exactly 1 spymaster"));
    }
    if count(Team::Red, Role::Operative) < 1 {
        return Err(composition("red team needs at least 1 operative"));
    }
    if count(Team::Blue, Role::Operative) < 1 {
        return Err(composition("blue team needs at least 1 operative"));
    }
    Ok(())
}

pub fn choose_first_team<R: Rng + ?Sized>(rng: &mut R) -> Team {
    if rng.random_bool(0.5) {
        Team::Red
    } else {
        Team::Blue
    }
}

fn ensure_playing(game: &Game) -> Result<(), DomainError> {
    if game.phase != Phase::Playing {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "game is not in playing phase",
        ));
    }
    Ok(())
}

fn ensure_clue(game: &Game) -> Result<(), DomainError> {
    if !game.has_clue() {
        return Err(DomainError::validation(
            ValidationKind::NoActiveClue,
            "no clue given yet",
        ));
    }
    Ok(())
}

pub fn give_clue(game: &mut Game, clue: &str, number: i32) -> Result<(), DomainError> {
    ensure_playing(game)?;
    if game.has_clue() {
        return Err(DomainError::validation(
            ValidationKind::ClueAlreadyGiven,
            "already gave a clue this turn",
        ));
    }
    let clue = clue.trim();
    if clue.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::EmptyClue,
            "clue cannot be empty",
        ));
    }
    if number < 0 {
        return Err(DomainError::validation(
            ValidationKind::NegativeNumber,
            "number must be >= 0",
        ));
    }

    game.current_clue = clue.to_string();
    game.current_number = number;
    // no clue allows more guesses than there are cards
    game.guesses_left = if number == 0 {
        UNLIMITED_GUESSES
    } else {
        number.saturating_add(1).min(UNLIMITED_GUESSES)
    };
    Ok(())
}

/// Reveal `card_id` for `team` and apply the win/turn cascade.
pub fn guess_card(
    game: &mut Game,
    cards: &mut [Card],
    card_id: CardId,
    team: Team,
) -> Result<GuessOutcome, DomainError> {
    ensure_playing(game)?;
    ensure_clue(game)?;
    if team != game.current_team {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "not your team's turn",
        ));
    }
    if game.guesses_left <= 0 {
        return Err(DomainError::validation(
            ValidationKind::NoGuessesLeft,
            "no guesses left",
        ));
    }
    let card = cards
        .iter_mut()
        .find(|c| c.id == card_id)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Card, "card not found"))?;
    if card.revealed {
        return Err(DomainError::validation(
            ValidationKind::CardRevealed,
            "card already revealed",
        ));
    }

    card.revealed = true;
    card.revealed_by = Some(team);
    let card_type = card.card_type;

    if card_type == CardType::Assassin {
        return Ok(finish(game, team.opposite()));
    }
    if let Some(winner) = fully_revealed_team(cards) {
        return Ok(finish(game, winner));
    }

    if card_type == CardType::from(team) {
        game.guesses_left -= 1;
        if game.guesses_left <= 0 {
            end_turn(game);
            return Ok(GuessOutcome::TurnEnded);
        }
        Ok(GuessOutcome::Correct)
    } else {
        end_turn(game);
        Ok(GuessOutcome::TurnEnded)
    }
}

pub fn end_guessing(game: &mut Game) -> Result<(), DomainError> {
    ensure_playing(game)?;
    ensure_clue(game)?;
    end_turn(game);
    Ok(())
}

/// Hand the turn to the other team and clear clue state.
pub fn end_turn(game: &mut Game) {
    game.current_team = game.current_team.opposite();
    game.current_clue.clear();
    game.current_number = 0;
    game.guesses_left = 0;
}

fn finish(game: &mut Game, winner: Team) -> GuessOutcome {
    game.phase = Phase::Finished;
    game.winner = Some(winner);
    GuessOutcome::Won { winner }
}

/// First team (red, then blue) whose cards are all revealed.
pub fn fully_revealed_team(cards: &[Card]) -> Option<Team> {
    [Team::Red, Team::Blue].into_iter().find(|&team| {
        let mut owned = cards
            .iter()
            .filter(|c| c.card_type == CardType::from(team))
            .peekable();
        owned.peek().is_some() && owned.all(|c| c.revealed)
    })
}
