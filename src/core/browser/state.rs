//! List/filter/search/pagination state of the catalog list view.
//!
//! `BrowserState` is a plain owned record mutated only through the
//! transition methods below. Nothing here performs I/O: [`BrowserState::plan`]
//! says what, if anything, must be fetched, and the `store_*` methods fold a
//! fetched result back in. `display_list` is always recomputed from
//! `(selected_type, type_list_cache, search_term, offset)`.

use crate::core::catalog::ListEntry;

/// Network work needed before `display_list` can be derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPlan {
    /// Filtered mode without a cached membership list.
    Membership(String),
    /// Global mode without a search term: one server page.
    Page { limit: u32, offset: u32 },
    /// Everything needed is already in memory.
    Local,
}

/// Which of the two mutually exclusive modes the browser is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseMode {
    /// No type selected: paging delegated to the server.
    Global,
    /// A type selected: paging and search over the cached membership.
    Filtered,
}

#[derive(Debug, Clone)]
pub struct BrowserState {
    page_size: u32,
    offset: u32,
    search_term: String,
    selected_type: Option<String>,
    /// `None` until the membership of `selected_type` has been fetched.
    type_list_cache: Option<Vec<ListEntry>>,
    display_list: Vec<ListEntry>,
}

impl BrowserState {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            offset: 0,
            search_term: String::new(),
            selected_type: None,
            type_list_cache: None,
            display_list: Vec::new(),
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn selected_type(&self) -> Option<&str> {
        self.selected_type.as_deref()
    }

    /// Cached membership of the selected type (empty when not fetched).
    pub fn type_list_cache(&self) -> &[ListEntry] {
        self.type_list_cache.as_deref().unwrap_or(&[])
    }

    pub fn is_cache_loaded(&self) -> bool {
        self.type_list_cache.is_some()
    }

    pub fn display_list(&self) -> &[ListEntry] {
        &self.display_list
    }

    pub fn mode(&self) -> BrowseMode {
        if self.selected_type.is_some() {
            BrowseMode::Filtered
        } else {
            BrowseMode::Global
        }
    }

    /// 1-based page label.
    pub fn page_number(&self) -> u32 {
        self.offset / self.page_size + 1
    }

    // ── Transitions ─────────────────────────────────────────────────────

    /// Replace the selected type, reset the offset and drop the cached
    /// membership in one step. An empty name selects global mode.
    /// The search term is kept so "type + partial name" queries compose.
    pub fn set_type(&mut self, type_name: Option<&str>) {
        self.selected_type = type_name
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        self.offset = 0;
        self.type_list_cache = None;
    }

    /// Replace the search term. Filtered mode restarts from the first page.
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
        if self.mode() == BrowseMode::Filtered {
            self.offset = 0;
        }
    }

    /// Empty the search term, keeping the current page.
    pub fn clear_search_term(&mut self) {
        self.search_term.clear();
    }

    /// Empty the search term and go back to the first page.
    pub fn clear_search(&mut self) {
        self.search_term.clear();
        self.offset = 0;
    }

    pub fn next_page(&mut self) {
        self.offset = self.offset.saturating_add(self.page_size);
    }

    pub fn prev_page(&mut self) {
        self.offset = self.offset.saturating_sub(self.page_size);
    }

    // ── Derivation ──────────────────────────────────────────────────────

    /// What the compute step has to fetch for the current inputs.
    pub fn plan(&self) -> FetchPlan {
        match &self.selected_type {
            Some(type_name) if self.type_list_cache.is_none() => {
                FetchPlan::Membership(type_name.clone())
            }
            Some(_) => FetchPlan::Local,
            None if self.search_term.is_empty() => FetchPlan::Page {
                limit: self.page_size,
                offset: self.offset,
            },
            None => FetchPlan::Local,
        }
    }

    /// Cache entries matching the search term.
    pub fn filtered(&self) -> Vec<&ListEntry> {
        filter_by_name(self.type_list_cache(), &self.search_term)
    }

    /// Re-derive `display_list` from in-memory inputs.
    ///
    /// Returns `false` (leaving the list untouched) when the inputs need a
    /// fetch first, i.e. when [`plan`](Self::plan) is not `Local`.
    pub fn recompute(&mut self) -> bool {
        if self.plan() != FetchPlan::Local {
            return false;
        }
        let display: Vec<ListEntry> = match self.mode() {
            BrowseMode::Filtered => {
                let filtered = self.filtered();
                page_window(&filtered, self.offset, self.page_size)
                    .into_iter()
                    .cloned()
                    .collect()
            }
            // Global mode with a search term: the server cannot search.
            BrowseMode::Global => Vec::new(),
        };
        self.display_list = display;
        true
    }

    /// Store a fetched membership list for `type_name` and re-derive.
    /// Ignored if the selection changed since the fetch was planned.
    pub fn store_membership(&mut self, type_name: &str, members: Vec<ListEntry>) -> bool {
        if self.selected_type.as_deref() != Some(type_name) {
            return false;
        }
        self.type_list_cache = Some(members);
        self.recompute()
    }

    /// Store a fetched server page as the display list.
    pub fn store_page(&mut self, results: Vec<ListEntry>) {
        self.display_list = results;
    }

    // ── Controls ────────────────────────────────────────────────────────

    pub fn has_prev_page(&self) -> bool {
        self.offset > 0
    }

    /// Next-page availability.
    ///
    /// Filtered mode: `offset + page_size < filtered.len()`. Global mode is
    /// bounded by the server's total `count` once one is known and assumed
    /// available before that.
    pub fn has_next_page(&self, total_count: Option<u64>) -> bool {
        let end = u64::from(self.offset) + u64::from(self.page_size);
        match self.mode() {
            BrowseMode::Filtered => end < self.filtered().len() as u64,
            BrowseMode::Global => total_count.map_or(true, |count| end < count),
        }
    }

    /// Global mode with a search term and nothing listed: offer a direct
    /// lookup instead of a list.
    pub fn shows_global_prompt(&self) -> bool {
        self.mode() == BrowseMode::Global
            && !self.search_term.is_empty()
            && self.display_list.is_empty()
    }

    /// Filtered mode with nothing to show.
    pub fn empty_state_message(&self) -> Option<String> {
        match &self.selected_type {
            Some(type_name) if self.display_list.is_empty() => Some(format!(
                "No {type_name} Pokémon found matching \"{}\".",
                self.search_term
            )),
            _ => None,
        }
    }

    /// Pagination controls are only shown over a non-empty page.
    pub fn shows_pagination(&self) -> bool {
        !self.display_list.is_empty()
    }
}

/// Entries whose name contains `term`, case-insensitively. An empty term
/// keeps everything.
pub fn filter_by_name<'a>(entries: &'a [ListEntry], term: &str) -> Vec<&'a ListEntry> {
    if term.is_empty() {
        return entries.iter().collect();
    }
    let needle = term.to_lowercase();
    entries
        .iter()
        .filter(|e| e.name.to_lowercase().contains(&needle))
        .collect()
}

/// `items[offset .. offset + size]`, clamped to the slice.
pub fn page_window<T: Clone>(items: &[T], offset: u32, size: u32) -> Vec<T> {
    let start = (offset as usize).min(items.len());
    let end = start.saturating_add(size as usize).min(items.len());
    items[start..end].to_vec()
}
