//! Property tests for board generation (pure domain, no DB).
//!
//! Properties tested:
//! - 25 cells at unique positions 0..25
//! - 25 distinct words
//! - exactly one assassin and seven neutral cards
//! - the starting team owns nine cards, the other team eight

use std::collections::HashSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::board::{generate_board, BOARD_SIZE};
use crate::domain::types::CardType;
use crate::domain::words::StaticWords;
use crate::domain::{test_gens, test_prelude};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_board_layout_invariants(seed in any::<u64>(), first in test_gens::team()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let board = generate_board(first, &StaticWords, &mut rng).unwrap();

        prop_assert_eq!(board.len(), BOARD_SIZE);

        let positions: HashSet<i16> = board.iter().map(|c| c.position).collect();
        prop_assert_eq!(positions, (0..BOARD_SIZE as i16).collect::<HashSet<_>>());

        let words: HashSet<&str> = board.iter().map(|c| c.word.as_str()).collect();
        prop_assert_eq!(words.len(), BOARD_SIZE);

        let count = |t: CardType| board.iter().filter(|c| c.card_type == t).count();
        prop_assert_eq!(count(CardType::Assassin), 1);
        prop_assert_eq!(count(CardType::Neutral), 7);
        prop_assert_eq!(count(CardType::from(first)), 9);
        prop_assert_eq!(count(CardType::from(first.opposite())), 8);
    }
}
