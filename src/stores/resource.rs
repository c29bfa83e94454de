//! Resource Store
//!
//! Typed CRUD over one REST collection. Reads go through the request cache
//! under `<collection>:` keys; successful writes drop those keys so the next
//! read is fresh.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ApiError, Result};
use crate::http::{ApiClient, CacheOptions, RequestConfig};
use crate::models::{Page, Resource};

// == List Query ==
/// Paging and search parameters for collection reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    fn params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        if let Some(page) = self.page {
            params.insert("page".to_string(), page.to_string());
        }
        if let Some(per_page) = self.per_page {
            params.insert("per_page".to_string(), per_page.to_string());
        }
        if let Some(search) = self.search.as_ref().filter(|s| !s.is_empty()) {
            params.insert("search".to_string(), search.clone());
        }
        params
    }
}

// == Resource Store ==
pub struct ResourceStore<T> {
    client: ApiClient,
    ttl: Duration,
    _resource: PhantomData<fn() -> T>,
}

impl<T> Clone for ResourceStore<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            ttl: self.ttl,
            _resource: PhantomData,
        }
    }
}

impl<T: Resource> ResourceStore<T> {
    pub fn new(client: ApiClient, ttl: Duration) -> Self {
        Self {
            client,
            ttl,
            _resource: PhantomData,
        }
    }

    /// Overrides the read TTL for this store.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Keys and Paths ==
    /// Prefix shared by every cache key this store writes.
    pub fn key_prefix() -> String {
        format!("{}:", T::COLLECTION)
    }

    pub fn list_key(query: &ListQuery) -> String {
        let params = query.params();
        if params.is_empty() {
            return format!("{}:list", T::COLLECTION);
        }
        let suffix = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}:list?{}", T::COLLECTION, suffix)
    }

    pub fn item_key(id: u64) -> String {
        format!("{}:{}", T::COLLECTION, id)
    }

    fn collection_path() -> String {
        format!("/{}", T::COLLECTION)
    }

    fn item_path(id: u64) -> String {
        format!("/{}/{}", T::COLLECTION, id)
    }

    fn cached(&self, key: String) -> RequestConfig {
        RequestConfig::new().cache(CacheOptions::new(self.ttl).with_key(key))
    }

    // == Reads ==
    pub async fn list(&self, query: &ListQuery) -> Result<Page<T>> {
        let mut config = self.cached(Self::list_key(query));
        config.query = query.params();

        self.client
            .get_json(&Self::collection_path(), config)
            .await
    }

    pub async fn fetch(&self, id: u64) -> Result<T> {
        self.client
            .get_json(&Self::item_path(id), self.cached(Self::item_key(id)))
            .await
    }

    // == Writes ==
    // The server has applied the write once a 2xx arrives, so the cache is
    // dropped before the body is decoded.

    /// Validates and creates `record`, returning the stored version.
    pub async fn create(&self, record: &T) -> Result<T> {
        validate(record)?;
        let body = serde_json::to_value(record)?;

        let response = self
            .client
            .post(&Self::collection_path(), body, RequestConfig::new())
            .await?;
        self.refresh().await;
        info!(collection = T::COLLECTION, "record created");
        response.into_json()
    }

    pub async fn update(&self, id: u64, record: &T) -> Result<T> {
        validate(record)?;
        let body = serde_json::to_value(record)?;

        let response = self
            .client
            .put(&Self::item_path(id), body, RequestConfig::new())
            .await?;
        self.refresh().await;
        info!(collection = T::COLLECTION, id, "record updated");
        response.into_json()
    }

    /// Partial update with an arbitrary JSON patch; no client-side validation.
    pub async fn patch(&self, id: u64, changes: Value) -> Result<T> {
        let response = self
            .client
            .patch(&Self::item_path(id), changes, RequestConfig::new())
            .await?;
        self.refresh().await;
        response.into_json()
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        self.client
            .delete(&Self::item_path(id), RequestConfig::new())
            .await?;
        self.refresh().await;
        info!(collection = T::COLLECTION, id, "record deleted");
        Ok(())
    }

    // == Refresh ==
    /// Drops every cached read of this collection. Returns the entry count.
    pub async fn refresh(&self) -> usize {
        let removed = self.client.invalidate_prefix(&Self::key_prefix()).await;
        debug!(collection = T::COLLECTION, removed, "cache invalidated");
        removed
    }
}

fn validate<T: Resource>(record: &T) -> Result<()> {
    match record.validate() {
        Some(msg) => Err(ApiError::InvalidRequest(msg)),
        None => Ok(()),
    }
}
