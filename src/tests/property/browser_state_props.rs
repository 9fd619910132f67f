//! Property-based tests for BrowserState
//!
//! Tests invariants:
//! - Filtered display is `page_window(filter_by_name(cache, term), offset, size)`
//! - Every displayed name contains the search term, case-insensitively
//! - `set_type` resets offset and drops the cache
//! - Walking pages forward covers the filtered list exactly once
//! - Global mode with a term derives an empty list and offers lookup

use proptest::prelude::*;

use crate::core::browser::{filter_by_name, page_window, BrowseMode, BrowserState, FetchPlan};
use crate::core::catalog::ListEntry;
use crate::tests::common::fixtures::entry;

// ============================================================================
// Strategies
// ============================================================================

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}(-[a-z]{1,5})?"
}

fn entries_strategy() -> impl Strategy<Value = Vec<ListEntry>> {
    prop::collection::vec(name_strategy(), 0..80).prop_map(|names| {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| entry(i as u32 + 1, name))
            .collect()
    })
}

fn term_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[a-zA-Z]{1,3}"]
}

#[derive(Debug, Clone)]
enum Op {
    Next,
    Prev,
    Search(String),
    ClearSearch,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Next),
        2 => Just(Op::Prev),
        1 => term_strategy().prop_map(Op::Search),
        1 => Just(Op::ClearSearch),
    ]
}

/// Filtered state with `members` already cached.
fn loaded(page_size: u32, members: Vec<ListEntry>) -> BrowserState {
    let mut state = BrowserState::new(page_size);
    state.set_type(Some("fire"));
    state.store_membership("fire", members);
    state
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Property: the filtered display list is the offset window of the
    /// name-filtered membership.
    #[test]
    fn prop_filtered_display_is_window_of_matches(
        members in entries_strategy(),
        term in term_strategy(),
        page_size in 1u32..30,
        ops in prop::collection::vec(op_strategy(), 0..20),
    ) {
        let mut state = loaded(page_size, members.clone());
        state.set_search_term(&term);
        for op in ops {
            match op {
                Op::Next => {
                    if state.has_next_page(None) {
                        state.next_page();
                    }
                }
                Op::Prev => state.prev_page(),
                Op::Search(t) => state.set_search_term(&t),
                Op::ClearSearch => state.clear_search(),
            }
            prop_assert!(state.recompute());
        }
        state.recompute();

        let matches = filter_by_name(&members, state.search_term());
        let expected: Vec<ListEntry> = page_window(&matches, state.offset(), page_size)
            .into_iter()
            .cloned()
            .collect();
        prop_assert_eq!(state.display_list(), expected.as_slice());
        prop_assert!(state.display_list().len() <= page_size as usize);

        let needle = state.search_term().to_lowercase();
        for shown in state.display_list() {
            prop_assert!(shown.name.to_lowercase().contains(&needle));
        }
    }

    /// Property: offsets stay on page boundaries and never go negative.
    #[test]
    fn prop_offset_stays_aligned(
        page_size in 1u32..50,
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut state = BrowserState::new(page_size);
        for op in ops {
            match op {
                Op::Next => state.next_page(),
                Op::Prev => state.prev_page(),
                Op::Search(t) => state.set_search_term(&t),
                Op::ClearSearch => state.clear_search(),
            }
            prop_assert_eq!(state.offset() % page_size, 0);
            prop_assert_eq!(state.has_prev_page(), state.offset() > 0);
        }
    }

    /// Property: selecting any type restarts at offset 0 with no cache, and
    /// the next compute step must fetch that type's membership.
    #[test]
    fn prop_set_type_resets(
        members in entries_strategy(),
        pages in 0u32..5,
        type_name in "[a-z]{3,8}",
    ) {
        let mut state = loaded(10, members);
        for _ in 0..pages {
            state.next_page();
        }
        state.set_type(Some(&type_name));

        prop_assert_eq!(state.offset(), 0);
        prop_assert!(!state.is_cache_loaded());
        prop_assert_eq!(state.plan(), FetchPlan::Membership(type_name.clone()));
    }

    /// Property: paging forward from the first page visits every match
    /// exactly once, in order.
    #[test]
    fn prop_paging_covers_matches_once(
        members in entries_strategy(),
        term in term_strategy(),
        page_size in 1u32..25,
    ) {
        let mut state = loaded(page_size, members.clone());
        state.set_search_term(&term);
        state.recompute();

        let mut seen: Vec<ListEntry> = state.display_list().to_vec();
        while state.has_next_page(None) {
            state.next_page();
            prop_assert!(state.recompute());
            prop_assert!(!state.display_list().is_empty());
            seen.extend_from_slice(state.display_list());
        }

        let expected: Vec<ListEntry> = filter_by_name(&members, &term)
            .into_iter()
            .cloned()
            .collect();
        prop_assert_eq!(seen, expected);
    }

    /// Property: global mode with a non-empty term never lists anything and
    /// always offers the direct lookup.
    #[test]
    fn prop_global_search_lists_nothing(
        term in "[a-z]{1,10}",
        page in prop::collection::vec(name_strategy(), 0..24),
    ) {
        let mut state = BrowserState::new(24);
        let results: Vec<ListEntry> = page
            .iter()
            .enumerate()
            .map(|(i, n)| entry(i as u32 + 1, n))
            .collect();
        state.store_page(results);
        state.set_search_term(&term);

        prop_assert_eq!(state.mode(), BrowseMode::Global);
        prop_assert_eq!(state.plan(), FetchPlan::Local);
        prop_assert!(state.recompute());
        prop_assert!(state.display_list().is_empty());
        prop_assert!(state.shows_global_prompt());
        prop_assert!(!state.shows_pagination());
    }

    /// Property: with a known server count, next page is offered exactly
    /// while the following page would start inside the list.
    #[test]
    fn prop_global_next_page_bounded_by_count(
        count in 0u64..2000,
        pages in 0u32..100,
    ) {
        let mut state = BrowserState::new(24);
        for _ in 0..pages {
            state.next_page();
        }
        let expected = u64::from(state.offset()) + 24 < count;
        prop_assert_eq!(state.has_next_page(Some(count)), expected);
        prop_assert!(state.has_next_page(None));
    }
}
