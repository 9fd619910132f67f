//! Property-based tests for catalog record helpers
//!
//! Tests invariants:
//! - `padded_id` is `#` plus at least three digits and round-trips
//! - `id_from_reference` recovers the id from a built reference
//! - `humanize` only ever touches the first hyphen

use proptest::prelude::*;

use crate::core::catalog::models::{humanize, id_from_reference, padded_id};
use crate::tests::common::fixtures::entry;

proptest! {
    #[test]
    fn prop_padded_id_round_trips(id in 0u32..100_000) {
        let label = padded_id(id);
        prop_assert!(label.starts_with('#'));
        prop_assert!(label.len() >= 4);
        prop_assert_eq!(label[1..].parse::<u32>().unwrap(), id);
    }

    #[test]
    fn prop_reference_yields_id(id in 1u32..20_000, name in "[a-z]{1,10}") {
        let built = entry(id, &name);
        prop_assert_eq!(built.id(), Some(id));
        prop_assert_eq!(id_from_reference(built.url.trim_end_matches('/')), Some(id));
    }

    #[test]
    fn prop_humanize_replaces_first_hyphen_only(parts in prop::collection::vec("[a-z]{1,6}", 1..5)) {
        let name = parts.join("-");
        let human = humanize(&name);
        prop_assert_eq!(human.len(), name.len());
        prop_assert_eq!(human.matches('-').count(), parts.len().saturating_sub(2));
        prop_assert!(!human.starts_with(' '));
    }
}
