pub mod browser;
pub mod catalog;
pub mod game;
pub mod logging;
