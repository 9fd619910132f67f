//! BrowserController scenarios against in-memory and mocked catalogs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::BrowserConfig;
use crate::core::browser::{
    BrowseMode, BrowserController, BrowserEvent, Dispatch, LoadStatus, LOAD_FAILED_MESSAGE,
};
use crate::core::catalog::{CatalogError, MockCatalogApi};
use crate::tests::common::fixtures::{entries, numbered_entries, page, type_entries};
use crate::tests::mocks::FakeCatalog;

fn controller(api: Arc<FakeCatalog>) -> BrowserController {
    BrowserController::new(api, &BrowserConfig::default())
}

/// Run pending work until nothing is in flight; returns every event seen.
async fn drain(ctl: &mut BrowserController) -> Vec<BrowserEvent> {
    let mut events = Vec::new();
    while let Some(event) = ctl.settle().await {
        events.push(event);
    }
    events
}

fn names(ctl: &BrowserController) -> Vec<String> {
    ctl.state()
        .display_list()
        .iter()
        .map(|e| e.name.clone())
        .collect()
}

fn fire() -> Vec<crate::core::catalog::ListEntry> {
    entries(&["charmander", "charmeleon", "charizard", "vulpix", "ninetales", "growlithe"])
}

fn water() -> Vec<crate::core::catalog::ListEntry> {
    entries(&["squirtle", "wartortle", "blastoise", "psyduck", "golduck", "lapras"])
}

// ============================================================================
// Global mode
// ============================================================================

#[tokio::test]
async fn test_initial_load_fetches_first_page() {
    let api = Arc::new(FakeCatalog::new(numbered_entries(60)).with_membership("fire", fire()));
    let mut ctl = controller(api.clone());

    ctl.start();
    let events = drain(&mut ctl).await;

    assert!(events.contains(&BrowserEvent::Refreshed));
    assert!(events.contains(&BrowserEvent::TypesLoaded));
    assert_eq!(api.page_requests(), vec![(24, 0)]);
    assert_eq!(ctl.state().display_list().len(), 24);
    assert_eq!(ctl.total_count(), Some(60));
    assert_eq!(ctl.status(), &LoadStatus::Idle);
    assert_eq!(ctl.types().len(), 1);
}

#[tokio::test]
async fn test_global_paging_stops_at_server_count() {
    let api = Arc::new(FakeCatalog::new(numbered_entries(60)));
    let mut ctl = controller(api.clone());
    ctl.start();
    drain(&mut ctl).await;

    assert!(!ctl.state().has_prev_page());
    assert!(ctl.has_next_page());
    ctl.next_page();
    drain(&mut ctl).await;
    ctl.next_page();
    drain(&mut ctl).await;

    assert_eq!(api.page_requests(), vec![(24, 0), (24, 24), (24, 48)]);
    assert_eq!(ctl.state().page_number(), 3);
    assert_eq!(ctl.state().display_list().len(), 12);
    assert!(!ctl.has_next_page());

    // Guarded: no request past the end.
    ctl.next_page();
    assert!(!ctl.is_pending());

    ctl.prev_page();
    drain(&mut ctl).await;
    assert_eq!(api.page_requests().last(), Some(&(24, 24)));
}

#[tokio::test]
async fn test_global_search_offers_lookup_instead_of_list() {
    let api = Arc::new(FakeCatalog::new(entries(&["bulbasaur", "pikachu", "raichu"])));
    let mut ctl = controller(api.clone());
    ctl.start();
    drain(&mut ctl).await;
    assert_eq!(ctl.state().display_list().len(), 3);

    ctl.set_search_term("pika");
    drain(&mut ctl).await;

    assert_eq!(ctl.state().mode(), BrowseMode::Global);
    assert!(ctl.state().display_list().is_empty());
    assert!(ctl.state().shows_global_prompt());
    // Searching does not touch the server list.
    assert_eq!(api.page_requests().len(), 1);
}

#[tokio::test]
async fn test_lookup_miss_then_hit() {
    let api = Arc::new(FakeCatalog::new(entries(&["bulbasaur", "pikachu"])));
    let mut ctl = controller(api);

    ctl.set_search_term("pika");
    assert!(ctl.submit_lookup());
    assert!(ctl.is_loading());
    let events = drain(&mut ctl).await;
    assert!(events.contains(&BrowserEvent::LookupFailed));
    assert_eq!(ctl.error(), Some("Pokémon \"pika\" not found."));

    ctl.set_search_term("  Pikachu ");
    assert!(ctl.submit_lookup());
    let events = drain(&mut ctl).await;
    assert!(events.contains(&BrowserEvent::OpenDetail("pikachu".to_string())));
    assert_eq!(ctl.error(), None);
}

#[tokio::test]
async fn test_failure_then_retry_recovers() {
    let mut mock = MockCatalogApi::new();
    mock.expect_types().returning(|| Ok(type_entries(&["fire"])));
    let mut calls = 0;
    mock.expect_list_page().returning(move |limit, offset| {
        calls += 1;
        if calls == 1 {
            Err(CatalogError::Status {
                status: 503,
                url: "/pokemon".to_string(),
            })
        } else {
            assert_eq!((limit, offset), (24, 0));
            Ok(page(3, entries(&["bulbasaur", "ivysaur", "venusaur"])))
        }
    });
    let mut ctl = BrowserController::new(Arc::new(mock), &BrowserConfig::default());

    ctl.start();
    let events = drain(&mut ctl).await;
    assert!(events.contains(&BrowserEvent::Failed));
    assert_eq!(ctl.error(), Some(LOAD_FAILED_MESSAGE));
    assert!(ctl.state().display_list().is_empty());

    ctl.set_search_term("zzz");
    drain(&mut ctl).await;
    ctl.retry();
    drain(&mut ctl).await;

    assert_eq!(ctl.error(), None);
    assert_eq!(ctl.state().search_term(), "");
    assert_eq!(names(&ctl), vec!["bulbasaur", "ivysaur", "venusaur"]);
}

#[tokio::test]
async fn test_types_failure_degrades_to_empty_catalog() {
    let mut mock = MockCatalogApi::new();
    mock.expect_types()
        .returning(|| Err(CatalogError::NotFound("type".to_string())));
    mock.expect_list_page()
        .returning(|_, _| Ok(page(1, entries(&["mew"]))));
    let mut ctl = BrowserController::new(Arc::new(mock), &BrowserConfig::default());

    ctl.start();
    let events = drain(&mut ctl).await;

    assert!(events.contains(&BrowserEvent::TypesUnavailable));
    assert!(ctl.types().is_empty());
    assert_eq!(ctl.error(), None);
    assert_eq!(names(&ctl), vec!["mew"]);
}

// ============================================================================
// Filtered mode
// ============================================================================

#[tokio::test]
async fn test_type_plus_partial_name() {
    let api = Arc::new(FakeCatalog::new(numbered_entries(60)).with_membership("fire", fire()));
    let mut ctl = controller(api.clone());
    ctl.start();
    drain(&mut ctl).await;

    ctl.set_search_term("char");
    ctl.set_type(Some("fire"));
    drain(&mut ctl).await;

    assert_eq!(ctl.state().mode(), BrowseMode::Filtered);
    assert_eq!(names(&ctl), vec!["charmander", "charmeleon", "charizard"]);
    assert!(!ctl.has_next_page());
    assert_eq!(api.membership_calls(), 1);

    // Narrowing the term is answered from the cache.
    ctl.set_search_term("chariz");
    drain(&mut ctl).await;
    assert_eq!(names(&ctl), vec!["charizard"]);
    assert_eq!(api.membership_calls(), 1);
}

#[tokio::test]
async fn test_filtered_paging_windows_cached_membership() {
    let api = Arc::new(FakeCatalog::new(Vec::new()).with_membership("normal", numbered_entries(30)));
    let mut ctl = controller(api.clone());

    ctl.set_type(Some("normal"));
    drain(&mut ctl).await;
    assert_eq!(ctl.state().display_list().len(), 24);
    assert!(ctl.has_next_page());

    ctl.next_page();
    drain(&mut ctl).await;
    assert_eq!(ctl.state().display_list().len(), 6);
    assert_eq!(ctl.state().display_list()[0].name, "mon-25");
    assert!(!ctl.has_next_page());
    assert_eq!(api.membership_calls(), 1);
    assert!(api.page_requests().is_empty());
}

#[tokio::test]
async fn test_empty_membership_shows_message_without_refetching() {
    let api = Arc::new(FakeCatalog::new(Vec::new()).with_membership("shadow", Vec::new()));
    let mut ctl = controller(api.clone());

    ctl.set_type(Some("shadow"));
    drain(&mut ctl).await;

    assert!(ctl.state().display_list().is_empty());
    assert_eq!(
        ctl.state().empty_state_message().as_deref(),
        Some("No shadow Pokémon found matching \"\".")
    );
    assert!(!ctl.state().shows_pagination());

    // Nothing left to do: no loop back into another fetch.
    assert!(!ctl.is_pending());
    assert_eq!(ctl.settle().await, None);
    assert_eq!(api.membership_calls(), 1);
}

#[tokio::test]
async fn test_no_match_in_type_reports_term() {
    let api = Arc::new(FakeCatalog::new(Vec::new()).with_membership("water", water()));
    let mut ctl = controller(api);

    ctl.set_type(Some("water"));
    ctl.set_search_term("lax");
    drain(&mut ctl).await;

    assert!(ctl.state().display_list().is_empty());
    assert_eq!(
        ctl.state().empty_state_message().as_deref(),
        Some("No water Pokémon found matching \"lax\".")
    );
}

#[tokio::test]
async fn test_clearing_type_returns_to_global_first_page() {
    let api = Arc::new(FakeCatalog::new(numbered_entries(50)).with_membership("fire", fire()));
    let mut ctl = controller(api.clone());

    ctl.set_type(Some("fire"));
    drain(&mut ctl).await;
    ctl.set_type(None);
    drain(&mut ctl).await;

    assert_eq!(ctl.state().mode(), BrowseMode::Global);
    assert!(!ctl.state().is_cache_loaded());
    assert_eq!(api.page_requests(), vec![(24, 0)]);
    assert_eq!(ctl.state().display_list().len(), 24);
}

// ============================================================================
// Ordering
// ============================================================================

#[tokio::test]
async fn test_slow_stale_membership_is_dropped() {
    let api = Arc::new(
        FakeCatalog::new(Vec::new())
            .with_membership("fire", fire())
            .with_membership("water", water())
            .with_membership_delay("fire", Duration::from_millis(150)),
    );
    let mut ctl = controller(api.clone());

    ctl.set_type(Some("fire"));
    ctl.dispatch();
    ctl.set_type(Some("water"));
    ctl.dispatch();

    let events = drain(&mut ctl).await;

    assert_eq!(events, vec![BrowserEvent::Refreshed, BrowserEvent::Stale]);
    assert_eq!(ctl.state().selected_type(), Some("water"));
    assert_eq!(names(&ctl), vec!["squirtle", "wartortle", "blastoise", "psyduck", "golduck", "lapras"]);
    assert_eq!(api.membership_calls(), 2);
}

#[tokio::test]
async fn test_rapid_changes_coalesce_into_one_fetch() {
    let api = Arc::new(
        FakeCatalog::new(Vec::new())
            .with_membership("fire", fire())
            .with_membership("water", water()),
    );
    let mut ctl = controller(api.clone());
    let start = Instant::now();

    ctl.set_type(Some("fire"));
    ctl.set_type(Some("water"));
    ctl.set_search_term("s");
    assert!(ctl.poll(start).is_empty());
    assert!(ctl.is_pending());

    // Nothing fires before the settle delay.
    assert!(!ctl.tick(start));
    drain(&mut ctl).await;

    assert_eq!(api.membership_calls(), 1);
    assert_eq!(names(&ctl), vec!["squirtle", "blastoise", "psyduck", "lapras"]);
}

#[tokio::test]
async fn test_typing_during_membership_fetch_joins_it() {
    let api = Arc::new(
        FakeCatalog::new(Vec::new())
            .with_membership("fire", fire())
            .with_membership_delay("fire", Duration::from_millis(100)),
    );
    let mut ctl = controller(api.clone());

    ctl.set_type(Some("fire"));
    assert_eq!(ctl.dispatch(), Dispatch::Spawned);
    tokio::time::sleep(Duration::from_millis(20)).await;
    ctl.set_search_term("char");
    assert_eq!(ctl.dispatch(), Dispatch::Joined);
    assert!(ctl.is_loading());

    let events = drain(&mut ctl).await;

    assert_eq!(events, vec![BrowserEvent::Refreshed]);
    assert_eq!(names(&ctl), vec!["charmander", "charmeleon", "charizard"]);
    assert_eq!(ctl.status(), &LoadStatus::Idle);
    assert_eq!(api.membership_calls(), 1);
}

#[tokio::test]
async fn test_lookup_right_after_typing_keeps_not_found() {
    let api = Arc::new(FakeCatalog::new(entries(&["bulbasaur"])));
    let mut ctl = controller(api);

    // Enter pressed before the settle delay elapsed.
    ctl.set_search_term("pika");
    assert!(ctl.is_pending());
    assert!(ctl.submit_lookup());
    assert!(!ctl.is_pending());
    assert!(ctl.is_loading());

    assert_eq!(ctl.next_event().await, Some(BrowserEvent::LookupFailed));
    assert!(!ctl.tick(Instant::now() + Duration::from_millis(400)));
    assert_eq!(ctl.error(), Some("Pokémon \"pika\" not found."));
    assert!(ctl.state().display_list().is_empty());
}
