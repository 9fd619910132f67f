//! In-memory catalog service for driving controllers end to end.
//!
//! `MockCatalogApi` (mockall) covers call-level expectations; `FakeCatalog`
//! serves a small fixed dataset with per-call latency so tests can order
//! responses and provoke races.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::core::catalog::{
    CatalogApi, CatalogError, EntryDetail, ListEntry, ListPage, Result, TypeEntry,
};
use crate::tests::common::fixtures;

#[derive(Default)]
pub struct FakeCatalog {
    entries: Vec<ListEntry>,
    memberships: HashMap<String, Vec<ListEntry>>,
    types: Vec<TypeEntry>,
    /// Extra latency per membership fetch, keyed by type name.
    membership_delays: HashMap<String, Duration>,
    fail_pages: bool,
    /// Every `(limit, offset)` pair requested.
    page_requests: Mutex<Vec<(u32, u32)>>,
    membership_calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn new(entries: Vec<ListEntry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    pub fn with_membership(mut self, type_name: &str, members: Vec<ListEntry>) -> Self {
        self.types.extend(fixtures::type_entries(&[type_name]));
        self.memberships.insert(type_name.to_string(), members);
        self
    }

    pub fn with_membership_delay(mut self, type_name: &str, delay: Duration) -> Self {
        self.membership_delays.insert(type_name.to_string(), delay);
        self
    }

    pub fn failing_pages(mut self) -> Self {
        self.fail_pages = true;
        self
    }

    pub fn page_requests(&self) -> Vec<(u32, u32)> {
        self.page_requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn membership_calls(&self) -> usize {
        self.membership_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn list_page(&self, limit: u32, offset: u32) -> Result<ListPage> {
        if let Ok(mut requests) = self.page_requests.lock() {
            requests.push((limit, offset));
        }
        if self.fail_pages {
            return Err(CatalogError::Status {
                status: 500,
                url: "/pokemon".to_string(),
            });
        }
        Ok(fixtures::page(
            self.entries.len() as u64,
            crate::core::browser::page_window(&self.entries, offset, limit),
        ))
    }

    async fn entry_detail(&self, name_or_id: &str) -> Result<EntryDetail> {
        let key = name_or_id.trim().to_lowercase();
        self.entries
            .iter()
            .find(|e| e.name == key || e.id().map(|id| id.to_string()) == Some(key.clone()))
            .map(|e| fixtures::detail(e.id().unwrap_or(0), &e.name))
            .ok_or(CatalogError::NotFound(key))
    }

    async fn types(&self) -> Result<Vec<TypeEntry>> {
        Ok(self.types.clone())
    }

    async fn type_members(&self, type_name: &str) -> Result<Vec<ListEntry>> {
        self.membership_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.membership_delays.get(type_name) {
            tokio::time::sleep(*delay).await;
        }
        self.memberships
            .get(type_name)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(type_name.to_string()))
    }
}
