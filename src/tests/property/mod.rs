//! Property-based tests for the catalog browser
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `browser_state_props`: list state transitions and derivation
//!   - The displayed page is a window of the name-filtered membership
//!   - Type changes always restart from the first page with an empty cache
//!   - Paging forward through a filtered list visits every match once
//!   - Global search never lists anything
//!
//! - `catalog_model_props`: record helpers
//!   - Padded ids are at least three digits and parse back
//!   - Reference urls yield the id they were built from
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable.

mod browser_state_props;
mod catalog_model_props;
