//! Drives [`BrowserState`] against the catalog service.
//!
//! Every dependency change re-arms a settle deadline; when it elapses the
//! compute step runs on whatever state is current at that moment. Fetches
//! run in spawned tasks and report back over a channel that the owner
//! drains from its event loop (`poll`) or awaits directly (`settle`).
//!
//! Each change or dispatch bumps `generation`; a page result carrying any
//! other generation is dropped, so a slow response can never overwrite state
//! that moved on while it was in flight. Membership results are keyed by type
//! instead: a search edit while the selected type's membership is in flight
//! joins that fetch rather than starting another one.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use super::state::{BrowserState, FetchPlan};
use crate::config::BrowserConfig;
use crate::core::catalog::{CatalogApi, CatalogError, EntryDetail, ListEntry, ListPage, TypeEntry};

/// Shown when the compute step fails.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load Pokémon. Please check your connection.";

/// Shown when a direct lookup does not resolve.
pub fn not_found_message(term: &str) -> String {
    format!("Pokémon \"{term}\" not found.")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Failed(String),
}

/// What the owner needs to react to after a result was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    /// `display_list` was re-derived.
    Refreshed,
    /// A result arrived for superseded state and was dropped.
    Stale,
    /// The compute step failed; `status` carries the message.
    Failed,
    /// The type catalog arrived.
    TypesLoaded,
    /// The type catalog failed; the picker only offers "All Types".
    TypesUnavailable,
    /// Direct lookup resolved; navigate to this entry.
    OpenDetail(String),
    /// Direct lookup did not resolve; `status` carries the message.
    LookupFailed,
}

/// Whether a dispatched compute step went to the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Local,
    Spawned,
    /// The selected type's membership was already in flight.
    Joined,
}

#[derive(Debug)]
enum BrowserMessage {
    Page {
        generation: u64,
        outcome: Result<ListPage, CatalogError>,
    },
    Membership {
        type_name: String,
        outcome: Result<Vec<ListEntry>, CatalogError>,
    },
    Lookup {
        token: u64,
        term: String,
        outcome: Result<EntryDetail, CatalogError>,
    },
    Types(Result<Vec<TypeEntry>, CatalogError>),
}

pub struct BrowserController {
    state: BrowserState,
    api: Arc<dyn CatalogApi>,
    status: LoadStatus,
    types: Vec<TypeEntry>,
    /// Server-reported size of the global list, once a page has been seen.
    total_count: Option<u64>,
    generation: u64,
    lookup_token: u64,
    /// Type whose membership fetch has not reported back yet.
    membership_in_flight: Option<String>,
    in_flight: usize,
    debounce: Duration,
    /// Set while a compute step is waiting for its settle deadline.
    pending_since: Option<Instant>,
    tx: mpsc::UnboundedSender<BrowserMessage>,
    rx: mpsc::UnboundedReceiver<BrowserMessage>,
}

impl BrowserController {
    pub fn new(api: Arc<dyn CatalogApi>, config: &BrowserConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: BrowserState::new(config.page_size),
            api,
            status: LoadStatus::Loading,
            types: Vec::new(),
            total_count: None,
            generation: 0,
            lookup_token: 0,
            membership_in_flight: None,
            in_flight: 0,
            debounce: config.debounce(),
            pending_since: None,
            tx,
            rx,
        }
    }

    /// Fetch the type catalog and arm the first compute step.
    pub fn start(&mut self) {
        self.load_types();
        self.schedule();
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn types(&self) -> &[TypeEntry] {
        &self.types
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn has_next_page(&self) -> bool {
        self.state.has_next_page(self.total_count)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    // ── Handlers ────────────────────────────────────────────────────────

    /// Select a type (or `None` for all types).
    pub fn set_type(&mut self, type_name: Option<&str>) {
        self.state.set_type(type_name);
        log::debug!("Type filter set to {:?}", self.state.selected_type());
        self.schedule();
    }

    pub fn set_search_term(&mut self, term: &str) {
        if term == self.state.search_term() {
            return;
        }
        self.state.set_search_term(term);
        self.schedule();
    }

    /// The search field's clear action: empty term, first page, recompute now.
    pub fn clear_search(&mut self) {
        self.state.clear_search();
        self.dispatch();
    }

    pub fn next_page(&mut self) {
        if self.has_next_page() {
            self.state.next_page();
            self.schedule();
        }
    }

    pub fn prev_page(&mut self) {
        if self.state.has_prev_page() {
            self.state.prev_page();
            self.schedule();
        }
    }

    /// Reset the search, drop the error, and run the compute step again.
    pub fn retry(&mut self) {
        self.state.clear_search_term();
        self.status = LoadStatus::Idle;
        self.dispatch();
    }

    /// Fetch the exact-match record for the search term.
    ///
    /// A compute step still waiting for its settle deadline runs first, so it
    /// cannot fire later and wipe the lookup's status. Returns `false` without
    /// doing anything when the trimmed term is empty.
    pub fn submit_lookup(&mut self) -> bool {
        let term = self.state.search_term().trim().to_string();
        if term.is_empty() {
            return false;
        }
        if self.pending_since.is_some() {
            self.dispatch();
        }

        self.lookup_token += 1;
        let token = self.lookup_token;
        self.status = LoadStatus::Loading;
        log::info!("Direct lookup for {term:?}");

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let outcome = api.entry_detail(&term.to_lowercase()).await;
            let _ = tx.send(BrowserMessage::Lookup {
                token,
                term,
                outcome,
            });
        });
        true
    }

    // ── Compute step ────────────────────────────────────────────────────

    /// Invalidate in-flight results and re-arm the settle deadline.
    fn schedule(&mut self) {
        self.generation += 1;
        self.pending_since = Some(Instant::now());
    }

    /// Run the compute step for the current state.
    pub fn dispatch(&mut self) -> Dispatch {
        self.pending_since = None;
        self.generation += 1;
        let generation = self.generation;

        let plan = self.state.plan();
        log::debug!("Compute step {generation}: {plan:?}");

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        match plan {
            FetchPlan::Local => {
                self.state.recompute();
                self.status = LoadStatus::Idle;
                return Dispatch::Local;
            }
            FetchPlan::Membership(type_name) => {
                if self.membership_in_flight.as_deref() == Some(type_name.as_str()) {
                    log::debug!("Membership of {type_name} already in flight");
                    self.status = LoadStatus::Loading;
                    return Dispatch::Joined;
                }
                self.membership_in_flight = Some(type_name.clone());
                tokio::spawn(async move {
                    let outcome = api.type_members(&type_name).await;
                    let _ = tx.send(BrowserMessage::Membership { type_name, outcome });
                });
            }
            FetchPlan::Page { limit, offset } => {
                tokio::spawn(async move {
                    let outcome = api.list_page(limit, offset).await;
                    let _ = tx.send(BrowserMessage::Page { generation, outcome });
                });
            }
        }

        self.in_flight += 1;
        self.status = LoadStatus::Loading;
        Dispatch::Spawned
    }

    /// Fire the compute step if its settle deadline has elapsed at `now`.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending_since {
            Some(since) if now.saturating_duration_since(since) >= self.debounce => {
                self.dispatch();
                true
            }
            _ => false,
        }
    }

    /// Drain finished fetches and fire a due compute step. Call from on_tick.
    pub fn poll(&mut self, now: Instant) -> Vec<BrowserEvent> {
        let mut events = Vec::new();
        while let Ok(message) = self.rx.try_recv() {
            events.push(self.apply(message));
        }
        self.tick(now);
        events
    }

    /// Fire any pending compute step immediately and wait for the next
    /// result. Returns `None` when nothing is in flight.
    pub async fn settle(&mut self) -> Option<BrowserEvent> {
        if self.pending_since.is_some() && self.dispatch() == Dispatch::Local {
            return Some(BrowserEvent::Refreshed);
        }
        self.next_event().await
    }

    /// Wait for one in-flight result and apply it.
    pub async fn next_event(&mut self) -> Option<BrowserEvent> {
        if self.in_flight == 0 {
            return None;
        }
        let message = self.rx.recv().await?;
        Some(self.apply(message))
    }

    fn load_types(&mut self) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let outcome = api.types().await;
            let _ = tx.send(BrowserMessage::Types(outcome));
        });
    }

    fn compute_failed(&mut self, e: CatalogError) -> BrowserEvent {
        log::warn!("Compute step failed: {e}");
        self.status = LoadStatus::Failed(LOAD_FAILED_MESSAGE.to_string());
        BrowserEvent::Failed
    }

    fn apply(&mut self, message: BrowserMessage) -> BrowserEvent {
        self.in_flight = self.in_flight.saturating_sub(1);
        match message {
            BrowserMessage::Page { generation, .. } if generation != self.generation => {
                log::debug!(
                    "Dropping stale page result {generation} (current {})",
                    self.generation
                );
                BrowserEvent::Stale
            }
            BrowserMessage::Page { outcome, .. } => match outcome {
                Ok(page) => {
                    self.total_count = Some(page.count);
                    self.state.store_page(page.results);
                    self.status = LoadStatus::Idle;
                    BrowserEvent::Refreshed
                }
                Err(e) => self.compute_failed(e),
            },
            BrowserMessage::Membership { type_name, outcome } => {
                if self.membership_in_flight.as_deref() == Some(type_name.as_str()) {
                    self.membership_in_flight = None;
                }
                if self.state.selected_type() != Some(type_name.as_str())
                    || self.state.is_cache_loaded()
                {
                    log::debug!("Dropping membership of {type_name}: selection moved on");
                    return BrowserEvent::Stale;
                }
                match outcome {
                    Ok(members) => {
                        log::info!("Loaded {} members of type {type_name}", members.len());
                        // Re-derives with whatever term and offset are current.
                        self.state.store_membership(&type_name, members);
                        self.status = LoadStatus::Idle;
                        BrowserEvent::Refreshed
                    }
                    Err(e) => self.compute_failed(e),
                }
            }
            BrowserMessage::Lookup { token, .. } if token != self.lookup_token => {
                BrowserEvent::Stale
            }
            BrowserMessage::Lookup { term, outcome, .. } => match outcome {
                Ok(detail) => {
                    log::info!("Direct lookup resolved {term:?} to #{}", detail.id);
                    self.status = LoadStatus::Idle;
                    BrowserEvent::OpenDetail(term.to_lowercase())
                }
                Err(e) => {
                    log::info!("Direct lookup for {term:?} failed: {e}");
                    self.status = LoadStatus::Failed(not_found_message(&term));
                    BrowserEvent::LookupFailed
                }
            },
            BrowserMessage::Types(Ok(types)) => {
                log::debug!("Loaded {} types", types.len());
                self.types = types;
                BrowserEvent::TypesLoaded
            }
            BrowserMessage::Types(Err(e)) => {
                // Filter picker degrades to "All Types" only.
                log::warn!("Failed to load type catalog: {e}");
                self.types.clear();
                BrowserEvent::TypesUnavailable
            }
        }
    }
}
