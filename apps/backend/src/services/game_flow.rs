//! Game flow orchestration service - bridges the pure turn engine with persistence.
//!
//! Each method takes the acting player as re-resolved by the caller, enforces
//! the capability rules for that action, runs the engine on the current
//! persisted game, and writes the result back before returning.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::engine::{self, GuessOutcome};
use crate::domain::{generate_board, Card, CardId, Game, Player, Team, WordSource};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::Store;

#[derive(Clone)]
pub struct GameFlowService {
    store: Arc<dyn Store>,
    words: Arc<dyn WordSource>,
}

impl GameFlowService {
    pub fn new(store: Arc<dyn Store>, words: Arc<dyn WordSource>) -> Self {
        Self { store, words }
    }

    async fn require_active_game(&self, room_id: &str) -> Result<Game, DomainError> {
        self.store.active_game(room_id).await?.ok_or_else(|| {
            DomainError::validation(ValidationKind::PhaseMismatch, "no active game")
        })
    }

    fn require_turn(player: &Player, game: &Game) -> Result<Team, DomainError> {
        match player.team {
            Some(team) if team == game.current_team => Ok(team),
            _ => Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                "not your team's turn",
            )),
        }
    }

    /// Check the roster, pick the starting team, and persist a new game with its board.
    pub async fn start_game(&self, room_id: &str) -> Result<(Game, Vec<Card>), DomainError> {
        let players = self.store.players_in_room(room_id).await?;
        engine::can_start_game(&players)?;

        let (first_team, cells) = {
            let mut rng = rand::rng();
            let first_team = engine::choose_first_team(&mut rng);
            let cells = generate_board(first_team, self.words.as_ref(), &mut rng)?;
            (first_team, cells)
        };

        let (game, cards) = self
            .store
            .create_game_with_board(room_id, first_team, &cells)
            .await?;
        info!(room_id, game_id = game.id, first_team = %first_team, "Game started");
        Ok((game, cards))
    }

    pub async fn give_clue(
        &self,
        player: &Player,
        clue: &str,
        number: i32,
    ) -> Result<Game, DomainError> {
        if !player.is_spymaster() {
            return Err(DomainError::validation(
                ValidationKind::NotSpymaster,
                "only spymasters can give clues",
            ));
        }
        let mut game = self.require_active_game(&player.room_id).await?;
        Self::require_turn(player, &game)?;

        engine::give_clue(&mut game, clue, number)?;
        self.store.update_game(&game).await?;
        debug!(
            game_id = game.id,
            player_id = player.id,
            number,
            guesses_left = game.guesses_left,
            "Clue given"
        );
        Ok(game)
    }

    pub async fn guess_card(
        &self,
        player: &Player,
        card_id: CardId,
    ) -> Result<GuessOutcome, DomainError> {
        if !player.is_operative() {
            return Err(DomainError::validation(
                ValidationKind::NotOperative,
                "only operatives can guess",
            ));
        }
        let mut game = self.require_active_game(&player.room_id).await?;
        let mut cards = self.store.cards_for_game(game.id).await?;
        // the engine checks the turn itself once phase and clue are known good
        let team = player.team.ok_or_else(|| {
            DomainError::validation(ValidationKind::OutOfTurn, "not your team's turn")
        })?;

        let outcome = engine::guess_card(&mut game, &mut cards, card_id, team)?;
        self.store.record_guess(card_id, team, &game).await?;

        match outcome {
            GuessOutcome::Won { winner } => {
                info!(game_id = game.id, winner = %winner, "Game finished")
            }
            _ => debug!(game_id = game.id, card_id, ?outcome, "Card guessed"),
        }
        Ok(outcome)
    }

    pub async fn end_guessing(&self, player: &Player) -> Result<Game, DomainError> {
        let mut game = self.require_active_game(&player.room_id).await?;
        Self::require_turn(player, &game)?;

        engine::end_guessing(&mut game)?;
        self.store.update_game(&game).await?;
        debug!(game_id = game.id, next_team = %game.current_team, "Guessing ended");
        Ok(game)
    }
}
