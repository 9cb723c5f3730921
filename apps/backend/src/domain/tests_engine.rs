use crate::domain::engine::{
    can_start_game, end_guessing, fully_revealed_team, give_clue, guess_card, GuessOutcome,
    UNLIMITED_GUESSES,
};
use crate::domain::test_state_helpers::{
    card_id_at, make_cards, make_game, make_player, ordered_layout, ready_roster, MakeGameArgs,
};
use crate::domain::types::{CardType, Phase, Role, Team};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

fn validation_kind(err: DomainError) -> ValidationKind {
    match err {
        DomainError::Validation(kind, _) => kind,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn ready_roster_can_start() {
    assert!(can_start_game(&ready_roster()).is_ok());
}

#[test]
fn roster_errors_name_the_failing_team() {
    let mut roster = ready_roster();
    roster.push(make_player(5, "E", Some(Team::Red), Some(Role::Spymaster)));
    let err = can_start_game(&roster).unwrap_err();
    assert_eq!(err.detail(), "red team needs exactly 1 spymaster");

    let mut roster = ready_roster();
    roster.retain(|p| p.name != "C");
    assert_eq!(
        can_start_game(&roster).unwrap_err().detail(),
        "blue team needs exactly 1 spymaster"
    );

    let mut roster = ready_roster();
    roster.retain(|p| p.name != "B");
    assert_eq!(
        can_start_game(&roster).unwrap_err().detail(),
        "red team needs at least 1 operative"
    );

    let mut roster = ready_roster();
    roster[3].role = None;
    assert_eq!(
        can_start_game(&roster).unwrap_err().detail(),
        "blue team needs at least 1 operative"
    );
}

#[test]
fn clue_sets_guess_allowance() {
    let mut game = make_game(MakeGameArgs::default());
    give_clue(&mut game, "ocean", 2).unwrap();
    assert_eq!(game.current_clue, "ocean");
    assert_eq!(game.current_number, 2);
    assert_eq!(game.guesses_left, 3);

    let mut game = make_game(MakeGameArgs::default());
    give_clue(&mut game, "  tide ", 0).unwrap();
    assert_eq!(game.current_clue, "tide");
    assert_eq!(game.guesses_left, UNLIMITED_GUESSES);
    assert_eq!(UNLIMITED_GUESSES, 25);
}

#[test]
fn huge_clue_numbers_are_capped_at_the_board() {
    let mut game = make_game(MakeGameArgs::default());
    give_clue(&mut game, "ocean", i32::MAX).unwrap();
    assert_eq!(game.current_number, i32::MAX);
    assert_eq!(game.guesses_left, UNLIMITED_GUESSES);

    let mut game = make_game(MakeGameArgs::default());
    give_clue(&mut game, "ocean", 24).unwrap();
    assert_eq!(game.guesses_left, 25);

    let mut game = make_game(MakeGameArgs::default());
    give_clue(&mut game, "ocean", 30).unwrap();
    assert_eq!(game.guesses_left, UNLIMITED_GUESSES);
}

#[test]
fn clue_preconditions() {
    let mut lobby = make_game(MakeGameArgs {
        phase: Phase::Lobby,
        ..Default::default()
    });
    assert_eq!(
        validation_kind(give_clue(&mut lobby, "x", 1).unwrap_err()),
        ValidationKind::PhaseMismatch
    );

    let mut clued = make_game(MakeGameArgs {
        clue: "ocean",
        number: 2,
        guesses_left: 3,
        ..Default::default()
    });
    let before = clued.clone();
    let err = give_clue(&mut clued, "river", 1).unwrap_err();
    assert_eq!(err.detail(), "already gave a clue this turn");
    assert_eq!(clued, before);

    let mut game = make_game(MakeGameArgs::default());
    assert_eq!(
        validation_kind(give_clue(&mut game, "   ", 1).unwrap_err()),
        ValidationKind::EmptyClue
    );
    assert_eq!(
        validation_kind(give_clue(&mut game, "x", -1).unwrap_err()),
        ValidationKind::NegativeNumber
    );
    assert!(!game.has_clue());
}

#[test]
fn scenario_correct_correct_wrong_flips_turn() {
    let roster = ready_roster();
    can_start_game(&roster).unwrap();

    let mut game = make_game(MakeGameArgs::default());
    let mut cards = make_cards(&ordered_layout(Team::Red));

    give_clue(&mut game, "ocean", 2).unwrap();
    assert_eq!(game.guesses_left, 3);

    assert_eq!(
        guess_card(&mut game, &mut cards, card_id_at(0), Team::Red).unwrap(),
        GuessOutcome::Correct
    );
    assert_eq!(game.guesses_left, 2);

    assert_eq!(
        guess_card(&mut game, &mut cards, card_id_at(1), Team::Red).unwrap(),
        GuessOutcome::Correct
    );
    assert_eq!(game.guesses_left, 1);

    // position 17 is neutral
    assert_eq!(
        guess_card(&mut game, &mut cards, card_id_at(17), Team::Red).unwrap(),
        GuessOutcome::TurnEnded
    );
    assert_eq!(game.current_team, Team::Blue);
    assert_eq!(game.current_clue, "");
    assert_eq!(game.current_number, 0);
    assert_eq!(game.guesses_left, 0);
    assert_eq!(cards[17].revealed_by, Some(Team::Red));
}

#[test]
fn using_all_guesses_ends_the_turn() {
    let mut game = make_game(MakeGameArgs {
        clue: "ocean",
        number: 1,
        guesses_left: 1,
        ..Default::default()
    });
    let mut cards = make_cards(&ordered_layout(Team::Red));
    let outcome = guess_card(&mut game, &mut cards, card_id_at(0), Team::Red).unwrap();
    assert_eq!(outcome, GuessOutcome::TurnEnded);
    assert_eq!(game.current_team, Team::Blue);
}

#[test]
fn opponent_card_ends_the_turn() {
    let mut game = make_game(MakeGameArgs {
        clue: "ocean",
        number: 3,
        guesses_left: 4,
        ..Default::default()
    });
    let mut cards = make_cards(&ordered_layout(Team::Red));
    // position 9 belongs to blue
    let outcome = guess_card(&mut game, &mut cards, card_id_at(9), Team::Red).unwrap();
    assert_eq!(outcome, GuessOutcome::TurnEnded);
    assert_eq!(game.current_team, Team::Blue);
    assert_eq!(game.phase, Phase::Playing);
}

#[test]
fn assassin_hands_victory_to_the_opponent() {
    let mut game = make_game(MakeGameArgs {
        current_team: Team::Blue,
        clue: "night",
        number: 1,
        guesses_left: 2,
        ..Default::default()
    });
    let mut cards = make_cards(&ordered_layout(Team::Red));
    let outcome = guess_card(&mut game, &mut cards, card_id_at(24), Team::Blue).unwrap();
    assert_eq!(
        outcome,
        GuessOutcome::Won {
            winner: Team::Red
        }
    );
    assert_eq!(game.phase, Phase::Finished);
    assert_eq!(game.winner, Some(Team::Red));
}

#[test]
fn last_own_card_wins() {
    let mut game = make_game(MakeGameArgs {
        clue: "ocean",
        number: 0,
        guesses_left: UNLIMITED_GUESSES,
        ..Default::default()
    });
    let mut cards = make_cards(&ordered_layout(Team::Red));
    for card in cards.iter_mut().take(8) {
        card.revealed = true;
        card.revealed_by = Some(Team::Red);
    }
    let outcome = guess_card(&mut game, &mut cards, card_id_at(8), Team::Red).unwrap();
    assert_eq!(
        outcome,
        GuessOutcome::Won {
            winner: Team::Red
        }
    );
    assert_eq!(game.winner, Some(Team::Red));
}

#[test]
fn revealing_the_opponents_last_card_makes_them_win() {
    let mut game = make_game(MakeGameArgs {
        clue: "ocean",
        number: 2,
        guesses_left: 3,
        ..Default::default()
    });
    let mut cards = make_cards(&ordered_layout(Team::Red));
    // blue owns 9..17; reveal all but the last
    for card in cards.iter_mut().skip(9).take(7) {
        card.revealed = true;
        card.revealed_by = Some(Team::Blue);
    }
    let outcome = guess_card(&mut game, &mut cards, card_id_at(16), Team::Red).unwrap();
    assert_eq!(
        outcome,
        GuessOutcome::Won {
            winner: Team::Blue
        }
    );
}

#[test]
fn guessing_a_revealed_card_is_rejected_without_mutation() {
    let mut game = make_game(MakeGameArgs {
        clue: "ocean",
        number: 2,
        guesses_left: 3,
        ..Default::default()
    });
    let mut cards = make_cards(&ordered_layout(Team::Red));
    cards[3].revealed = true;
    cards[3].revealed_by = Some(Team::Blue);

    let game_before = game.clone();
    let cards_before = cards.clone();
    let err = guess_card(&mut game, &mut cards, card_id_at(3), Team::Red).unwrap_err();
    assert_eq!(validation_kind(err), ValidationKind::CardRevealed);
    assert_eq!(game, game_before);
    assert_eq!(cards, cards_before);
}

#[test]
fn guess_preconditions() {
    let mut cards = make_cards(&ordered_layout(Team::Red));

    let mut no_clue = make_game(MakeGameArgs::default());
    let err = guess_card(&mut no_clue, &mut cards, card_id_at(0), Team::Red).unwrap_err();
    assert_eq!(err.detail(), "no clue given yet");

    let mut game = make_game(MakeGameArgs {
        clue: "ocean",
        number: 2,
        guesses_left: 3,
        ..Default::default()
    });
    let err = guess_card(&mut game, &mut cards, card_id_at(0), Team::Blue).unwrap_err();
    assert_eq!(validation_kind(err), ValidationKind::OutOfTurn);

    let err = guess_card(&mut game, &mut cards, 9_999, Team::Red).unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Card, _)));

    let mut exhausted = make_game(MakeGameArgs {
        clue: "ocean",
        number: 2,
        guesses_left: 0,
        ..Default::default()
    });
    let err = guess_card(&mut exhausted, &mut cards, card_id_at(0), Team::Red).unwrap_err();
    assert_eq!(validation_kind(err), ValidationKind::NoGuessesLeft);

    let mut finished = make_game(MakeGameArgs {
        phase: Phase::Finished,
        clue: "ocean",
        guesses_left: 3,
        ..Default::default()
    });
    let err = guess_card(&mut finished, &mut cards, card_id_at(0), Team::Red).unwrap_err();
    assert_eq!(validation_kind(err), ValidationKind::PhaseMismatch);

    assert!(cards.iter().all(|c| !c.revealed));
}

#[test]
fn end_guessing_requires_a_clue() {
    let mut game = make_game(MakeGameArgs::default());
    assert_eq!(
        validation_kind(end_guessing(&mut game).unwrap_err()),
        ValidationKind::NoActiveClue
    );

    let mut game = make_game(MakeGameArgs {
        clue: "ocean",
        number: 2,
        guesses_left: 2,
        ..Default::default()
    });
    end_guessing(&mut game).unwrap();
    assert_eq!(game.current_team, Team::Blue);
    assert!(!game.has_clue());
    assert_eq!(game.guesses_left, 0);
}

#[test]
fn fully_revealed_ignores_boards_without_that_team() {
    let cards = make_cards(&[CardType::Neutral, CardType::Assassin]);
    assert_eq!(fully_revealed_team(&cards), None);
}
