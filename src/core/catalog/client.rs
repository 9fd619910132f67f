//! HTTP client for the read-only catalog service.
//!
//! Four GET operations, each translated to a typed result or a
//! [`CatalogError`]. The client holds no state beyond its connection pool
//! and never retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use super::error::{CatalogError, Result};
use super::models::{EntryDetail, ListEntry, ListPage, TypeDetailResponse, TypeEntry, TypesResponse};
use crate::config::ApiConfig;

/// Read operations the controllers need from the catalog service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// One server-side page of the global entry list.
    async fn list_page(&self, limit: u32, offset: u32) -> Result<ListPage>;

    /// Detail record by name or numeric id (case-insensitive).
    async fn entry_detail(&self, name_or_id: &str) -> Result<EntryDetail>;

    /// Every filter category.
    async fn types(&self) -> Result<Vec<TypeEntry>>;

    /// Complete, unpaginated membership of one category.
    async fn type_members(&self, type_name: &str) -> Result<Vec<ListEntry>>;
}

/// [`CatalogApi`] over HTTP with `reqwest`.
#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    /// Client with default timeout and user agent.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::from_config(&ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let parsed = Url::parse(&config.base_url)
            .map_err(|e| CatalogError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidBaseUrl(config.base_url.clone()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// GET `url`, require a 2xx status, decode the body as JSON.
    ///
    /// `not_found` names the identifier reported when the service answers 404.
    #[tracing::instrument(level = "debug", skip(self, query, not_found))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        not_found: Option<&str>,
    ) -> Result<T> {
        log::debug!("GET {url} {query:?}");

        let response = self.http.get(url).query(query).send().await.map_err(|e| {
            log::warn!("Catalog request to {url} failed: {e}");
            CatalogError::Request(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Catalog request to {url} returned {status}");
            return Err(match (status, not_found) {
                (StatusCode::NOT_FOUND, Some(id)) => CatalogError::NotFound(id.to_string()),
                _ => CatalogError::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                },
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            log::warn!("Failed to decode response from {url}: {e}");
            CatalogError::Decode(e)
        })
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn list_page(&self, limit: u32, offset: u32) -> Result<ListPage> {
        let url = self.endpoint("pokemon");
        self.get_json(
            &url,
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
            None,
        )
        .await
    }

    async fn entry_detail(&self, name_or_id: &str) -> Result<EntryDetail> {
        let query = name_or_id.trim().to_lowercase();
        if query.is_empty() {
            return Err(CatalogError::NotFound(name_or_id.to_string()));
        }
        let url = self.endpoint(&format!("pokemon/{}", urlencoding::encode(&query)));
        self.get_json(&url, &[], Some(&query)).await
    }

    async fn types(&self) -> Result<Vec<TypeEntry>> {
        let url = self.endpoint("type");
        let response: TypesResponse = self.get_json(&url, &[], None).await?;
        Ok(response.results)
    }

    async fn type_members(&self, type_name: &str) -> Result<Vec<ListEntry>> {
        let url = self.endpoint(&format!("type/{}", urlencoding::encode(type_name)));
        let response: TypeDetailResponse = self.get_json(&url, &[], Some(type_name)).await?;
        Ok(response.into_members())
    }
}
