//! Catalog service access: wire models, errors, and the HTTP client.

pub mod client;
pub mod error;
pub mod models;

pub use client::{CatalogApi, CatalogClient};
pub use error::{CatalogError, Result};
pub use models::{EntryDetail, ListEntry, ListPage, TypeEntry};

#[cfg(test)]
pub use client::MockCatalogApi;
