//! Crate-internal test suites.
//!
//! Inline `#[cfg(test)]` modules cover single units; the suites here drive
//! several units together against fakes.

pub mod common;
pub mod mocks;

mod property;
mod unit;
