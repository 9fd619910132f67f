//! GameController rounds against the in-memory catalog.

use std::collections::HashSet;
use std::sync::Arc;

use crate::config::GameConfig;
use crate::core::game::{GameController, GameEvent, GamePhase, OPTION_COUNT};
use crate::tests::common::fixtures::numbered_entries;
use crate::tests::mocks::FakeCatalog;

fn game() -> GameController {
    let api = Arc::new(FakeCatalog::new(numbered_entries(151)));
    GameController::new(api, GameConfig::default())
}

async fn ready(game: &mut GameController) {
    assert_eq!(game.settle().await, Some(GameEvent::RoundReady));
    assert_eq!(game.phase(), GamePhase::Playing);
}

fn wrong_option(game: &GameController) -> String {
    let round = game.round().unwrap();
    round
        .options
        .iter()
        .find(|o| **o != round.answer.name)
        .cloned()
        .unwrap()
}

#[tokio::test]
async fn test_round_offers_four_distinct_options_within_range() {
    let mut game = game();
    game.load_round();
    ready(&mut game).await;

    let round = game.round().unwrap();
    assert!((1..=151).contains(&round.answer.id));
    assert_eq!(round.options.len(), OPTION_COUNT);
    assert!(round.options.contains(&round.answer.name));
    let distinct: HashSet<&String> = round.options.iter().collect();
    assert_eq!(distinct.len(), OPTION_COUNT);
}

#[tokio::test]
async fn test_streak_then_miss() {
    let mut game = game();
    game.load_round();
    ready(&mut game).await;

    let answer = game.round().unwrap().answer.name.clone();
    assert_eq!(game.handle_guess(&answer), Some(true));
    assert_eq!(game.score(), 10);

    assert!(game.handle_next_round());
    ready(&mut game).await;
    let answer = game.round().unwrap().answer.name.clone();
    game.handle_guess(&answer);
    assert_eq!(game.score(), 20);
    assert_eq!(game.round_number(), 2);

    assert!(game.handle_next_round());
    ready(&mut game).await;
    let wrong = wrong_option(&game);
    assert_eq!(game.handle_guess(&wrong), Some(false));
    assert_eq!(game.score(), 0);
    assert_eq!(game.phase(), GamePhase::Revealed { correct: false });
    assert_eq!(game.round_number(), 3);
}

#[tokio::test]
async fn test_consecutive_misses_keep_score_at_zero() {
    let mut game = game();
    game.load_round();
    ready(&mut game).await;
    let answer = game.round().unwrap().answer.name.clone();
    game.handle_guess(&answer);
    assert_eq!(game.score(), 10);

    for round in 2..=4 {
        assert!(game.handle_next_round());
        ready(&mut game).await;
        let wrong = wrong_option(&game);
        assert_eq!(game.handle_guess(&wrong), Some(false));
        assert_eq!(game.score(), 0);
        assert_eq!(game.round_number(), round);
    }
}

#[tokio::test]
async fn test_entering_catalog_mid_load_ignores_round() {
    let mut game = game();
    game.load_round();
    game.enter_catalog();

    assert_eq!(game.settle().await, None);
    // Give the spawned load a chance to land; it must not revive the game.
    tokio::task::yield_now().await;
    assert_eq!(game.poll(), None);
    assert!(game.has_exited());
}

#[tokio::test]
async fn test_empty_catalog_skips_game() {
    let api = Arc::new(FakeCatalog::new(Vec::new()));
    let mut game = GameController::new(api, GameConfig::default());

    game.load_round();
    assert_eq!(game.settle().await, Some(GameEvent::Skipped));
    assert!(game.has_exited());
}
