/// Pokédex TUI - catalog browser and "Who's That Pokémon?" game
///
/// Core library providing the PokeAPI client, the list browsing state
/// machine, the guessing game, and the ratatui front end.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
