//! Domain layer: pure game logic types and helpers.

pub mod board;
pub mod engine;
pub mod model;
pub mod types;
pub mod view;
pub mod words;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
pub(crate) mod test_state_helpers;
#[cfg(test)]
mod tests_engine;
#[cfg(test)]
mod tests_props_board;
#[cfg(test)]
mod tests_props_roster;
#[cfg(test)]
mod tests_view;

// Re-exports for ergonomics
pub use board::{generate_board, BOARD_SIZE};
pub use engine::{can_start_game, GuessOutcome, UNLIMITED_GUESSES};
pub use model::{BoardCell, Card, Game, Player, Room, RoomSnapshot};
pub use types::{CardId, CardType, GameId, Phase, PlayerId, Role, RoomId, Team};
pub use view::{CardView, RoomState};
pub use words::{StaticWords, WordSource};
