//! Assembling one "Who's That Pokémon?" round from the catalog service.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::config::GameConfig;
use crate::core::catalog::{CatalogApi, CatalogError, EntryDetail};

/// Options offered per round, the answer included.
pub const OPTION_COUNT: usize = 4;

#[derive(Error, Debug)]
pub enum RoundError {
    #[error("Failed to fetch the mystery entry: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Could not collect {needed} distractors in {attempts} attempts")]
    NotEnoughDistractors { needed: usize, attempts: u32 },
}

/// A mystery entry and the shuffled names offered for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub answer: EntryDetail,
    pub options: Vec<String>,
}

impl Round {
    pub fn is_correct(&self, guess: &str) -> bool {
        guess == self.answer.name
    }
}

/// Pick a random entry in `1..=max_id` plus three distinct distractor names
/// from other ids in the same range, shuffled.
///
/// A failing answer fetch fails the round. Failing distractor fetches are
/// skipped and another id is drawn, up to `distractor_attempts` draws.
pub async fn fetch_round<R>(
    api: &dyn CatalogApi,
    rng: &mut R,
    config: &GameConfig,
) -> Result<Round, RoundError>
where
    R: Rng + Send,
{
    let max_id = config.max_id.max(1);
    let answer_id = rng.gen_range(1..=max_id);
    let answer = api.entry_detail(&answer_id.to_string()).await?;

    let mut options = vec![answer.name.clone()];
    let mut seen: HashSet<String> = options.iter().cloned().collect();
    let mut attempts = 0;

    while options.len() < OPTION_COUNT {
        if attempts >= config.distractor_attempts {
            return Err(RoundError::NotEnoughDistractors {
                needed: OPTION_COUNT - 1,
                attempts,
            });
        }
        attempts += 1;

        let candidate = rng.gen_range(1..=max_id);
        if candidate == answer_id {
            continue;
        }
        match api.entry_detail(&candidate.to_string()).await {
            Ok(distractor) => {
                if seen.insert(distractor.name.clone()) {
                    options.push(distractor.name);
                }
            }
            Err(e) => log::debug!("Skipping distractor #{candidate}: {e}"),
        }
    }

    options.shuffle(rng);
    Ok(Round { answer, options })
}
