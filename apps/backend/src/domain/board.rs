//! Board generation: 25 shuffled cells for a new game.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::model::BoardCell;
use super::types::{CardType, Team};
use super::words::WordSource;
use crate::errors::domain::DomainError;

pub const BOARD_SIZE: usize = 25;
pub const FIRST_TEAM_CARDS: usize = 9;
pub const SECOND_TEAM_CARDS: usize = FIRST_TEAM_CARDS - 1;
pub const ASSASSIN_CARDS: usize = 1;
pub const NEUTRAL_CARDS: usize =
    BOARD_SIZE - FIRST_TEAM_CARDS - SECOND_TEAM_CARDS - ASSASSIN_CARDS;

/// Unshuffled card types for a board where `first_team` moves first.
fn board_types(first_team: Team) -> Vec<CardType> {
    let mut types = Vec::with_capacity(BOARD_SIZE);
    types.extend(std::iter::repeat_n(CardType::from(first_team), FIRST_TEAM_CARDS));
    types.extend(std::iter::repeat_n(
        CardType::from(first_team.opposite()),
        SECOND_TEAM_CARDS,
    ));
    types.extend(std::iter::repeat_n(CardType::Neutral, NEUTRAL_CARDS));
    types.extend(std::iter::repeat_n(CardType::Assassin, ASSASSIN_CARDS));
    types
}

/// Draw 25 distinct words and pair them with uniformly shuffled card types.
///
/// Positions are `0..BOARD_SIZE` in order. Fails with `DomainError::Config`
/// when the source has fewer than `BOARD_SIZE` distinct non-blank words.
pub fn generate_board<R: Rng + ?Sized>(
    first_team: Team,
    source: &dyn WordSource,
    rng: &mut R,
) -> Result<Vec<BoardCell>, DomainError> {
    let mut seen = HashSet::new();
    let pool: Vec<&str> = source
        .words()
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty() && seen.insert(*w))
        .collect();

    if pool.len() < BOARD_SIZE {
        return Err(DomainError::config(format!(
            "word source has {} distinct words, need at least {BOARD_SIZE}",
            pool.len()
        )));
    }

    let picks = rand::seq::index::sample(rng, pool.len(), BOARD_SIZE);
    let mut types = board_types(first_team);
    types.shuffle(rng);

    Ok(picks
        .iter()
        .zip(types)
        .enumerate()
        .map(|(position, (idx, card_type))| BoardCell {
            word: pool[idx].to_string(),
            card_type,
            position: position as i16,
        })
        .collect())
}
