//! Game phases and scoring for the intro screen.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;

use super::round::{fetch_round, Round, RoundError};
use crate::config::GameConfig;
use crate::core::catalog::CatalogApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Loading,
    Playing,
    Revealed { correct: bool },
    /// The player moved on to the catalog. Terminal.
    Exited,
}

/// Raised by `poll` when a round load finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    RoundReady,
    /// The round could not be loaded; the game was skipped.
    Skipped,
}

struct RoundMessage {
    token: u64,
    outcome: Result<Round, RoundError>,
}

pub struct GameController {
    api: Arc<dyn CatalogApi>,
    config: GameConfig,
    phase: GamePhase,
    round: Option<Round>,
    last_guess: Option<String>,
    score: u32,
    round_number: u32,
    token: u64,
    tx: mpsc::UnboundedSender<RoundMessage>,
    rx: mpsc::UnboundedReceiver<RoundMessage>,
}

impl GameController {
    pub fn new(api: Arc<dyn CatalogApi>, config: GameConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            config,
            phase: GamePhase::Loading,
            round: None,
            last_guess: None,
            score: 0,
            round_number: 1,
            token: 0,
            tx,
            rx,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// The option picked in the current round, once revealed.
    pub fn last_guess(&self) -> Option<&str> {
        self.last_guess.as_deref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn has_exited(&self) -> bool {
        self.phase == GamePhase::Exited
    }

    /// Start loading the current round in the background.
    pub fn load_round(&mut self) {
        self.token += 1;
        let token = self.token;
        self.phase = GamePhase::Loading;
        self.round = None;
        self.last_guess = None;

        let api = Arc::clone(&self.api);
        let config = self.config.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let mut rng = StdRng::from_entropy();
            let outcome = fetch_round(api.as_ref(), &mut rng, &config).await;
            let _ = tx.send(RoundMessage { token, outcome });
        });
    }

    /// Install a loaded round and start playing it.
    pub fn begin_round(&mut self, round: Round) {
        log::debug!(
            "Round {} ready: #{} with {} options",
            self.round_number,
            round.answer.id,
            round.options.len()
        );
        self.round = Some(round);
        self.last_guess = None;
        self.phase = GamePhase::Playing;
    }

    /// Judge a guess. Returns whether it was correct, or `None` when no
    /// round is being played.
    pub fn handle_guess(&mut self, guess: &str) -> Option<bool> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        let round = self.round.as_ref()?;
        let correct = round.is_correct(guess);
        if correct {
            self.score += self.config.reward;
        } else {
            self.score = 0;
        }
        log::info!(
            "Round {}: guessed {guess:?}, answer {:?}, score {}",
            self.round_number,
            round.answer.name,
            self.score
        );
        self.last_guess = Some(guess.to_string());
        self.phase = GamePhase::Revealed { correct };
        Some(correct)
    }

    /// Move on from a revealed round. Returns `false` outside the reveal.
    pub fn handle_next_round(&mut self) -> bool {
        if !matches!(self.phase, GamePhase::Revealed { .. }) {
            return false;
        }
        self.round_number += 1;
        self.load_round();
        true
    }

    /// Leave the game for the catalog. In-flight loads are ignored from here on.
    pub fn enter_catalog(&mut self) {
        self.token += 1;
        self.phase = GamePhase::Exited;
    }

    /// Apply a finished round load. Call from on_tick.
    pub fn poll(&mut self) -> Option<GameEvent> {
        let mut event = None;
        while let Ok(message) = self.rx.try_recv() {
            if let Some(e) = self.apply(message) {
                event = Some(e);
            }
        }
        event
    }

    /// Wait for the in-flight round load, if any, and apply it.
    pub async fn settle(&mut self) -> Option<GameEvent> {
        if self.phase != GamePhase::Loading {
            return None;
        }
        let message = self.rx.recv().await?;
        self.apply(message)
    }

    fn apply(&mut self, message: RoundMessage) -> Option<GameEvent> {
        if message.token != self.token || self.phase != GamePhase::Loading {
            return None;
        }
        match message.outcome {
            Ok(round) => {
                self.begin_round(round);
                Some(GameEvent::RoundReady)
            }
            Err(e) => {
                log::warn!("Skipping game, round failed to load: {e}");
                self.phase = GamePhase::Exited;
                Some(GameEvent::Skipped)
            }
        }
    }
}
