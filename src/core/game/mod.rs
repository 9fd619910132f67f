//! "Who's That Pokémon?" intro game.

pub mod controller;
pub mod round;

pub use controller::{GameController, GameEvent, GamePhase};
pub use round::{fetch_round, Round, RoundError, OPTION_COUNT};
