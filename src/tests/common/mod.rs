//! Common Test Utilities
//!
//! Shared builders for catalog records used across test modules.

pub mod fixtures;

pub use fixtures::*;
