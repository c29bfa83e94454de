//! Cached API client
//!
//! Wraps a `Transport` and applies the request cache to opted-in GET calls.
//! Mutations always reach the transport and never touch the cache; callers
//! that need coherency after a write invalidate explicitly.

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::cache::{self, CacheStats, RequestCache, SharedCache};
use crate::config::Config;
use crate::error::Result;
use crate::http::{ApiRequest, ApiResponse, RequestConfig, ReqwestTransport, Transport};

// == Api Client ==
/// Per-verb REST client with an opt-in TTL cache on reads.
///
/// Cloning is cheap; clones share the transport and the cache.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    cache: SharedCache,
}

impl ApiClient {
    // == Constructors ==
    pub fn new(transport: Arc<dyn Transport>, cache: SharedCache) -> Self {
        Self { transport, cache }
    }

    /// Client with its own system-clock cache.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self::new(
            Arc::new(transport),
            cache::shared(RequestCache::with_system_clock()),
        )
    }

    /// Builds a `reqwest`-backed client from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = ReqwestTransport::new(&config.api_base_url, config.request_timeout())?;
        Ok(Self::with_transport(transport))
    }

    /// Handle to the underlying cache, e.g. for the cleanup task.
    pub fn cache(&self) -> SharedCache {
        self.cache.clone()
    }

    // == Get ==
    /// Sends a GET, serving it from the cache when `config.cache` is set and a
    /// fresh entry exists.
    ///
    /// Only successful responses are stored. Transport errors are returned as
    /// is and leave the cache untouched.
    pub async fn get(&self, path: &str, config: RequestConfig) -> Result<ApiResponse> {
        let request = ApiRequest::from_config(Method::GET, path, &config);

        let Some(options) = config.cache else {
            return self.transport.send(request).await;
        };

        let key = options
            .cache_key
            .clone()
            .unwrap_or_else(|| request.cache_key());

        let cached = self.cache.write().await.get(&key);
        if let Some(data) = cached {
            debug!(%key, "served from cache");
            return Ok(ApiResponse::from_cache(data));
        }

        debug!(%key, "cache miss");
        let response = self.transport.send(request).await?;
        if response.status.is_success() {
            self.cache
                .write()
                .await
                .set(key, response.data.clone(), options.ttl);
        }
        Ok(response)
    }

    /// GET and decode the body into `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        config: RequestConfig,
    ) -> Result<T> {
        self.get(path, config).await?.into_json()
    }

    // == Mutations ==
    pub async fn post(&self, path: &str, body: Value, config: RequestConfig) -> Result<ApiResponse> {
        self.send_uncached(Method::POST, path, Some(body), config).await
    }

    pub async fn put(&self, path: &str, body: Value, config: RequestConfig) -> Result<ApiResponse> {
        self.send_uncached(Method::PUT, path, Some(body), config).await
    }

    pub async fn patch(&self, path: &str, body: Value, config: RequestConfig) -> Result<ApiResponse> {
        self.send_uncached(Method::PATCH, path, Some(body), config).await
    }

    pub async fn delete(&self, path: &str, config: RequestConfig) -> Result<ApiResponse> {
        self.send_uncached(Method::DELETE, path, None, config).await
    }

    async fn send_uncached(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        config: RequestConfig,
    ) -> Result<ApiResponse> {
        if config.cache.is_some() {
            debug!(%method, path, "cache options ignored for non-GET request");
        }

        let mut request = ApiRequest::from_config(method, path, &config);
        request.body = body;
        self.transport.send(request).await
    }

    // == Cache Control ==
    /// Drops one cached response. Returns whether it was present.
    pub async fn invalidate(&self, key: &str) -> bool {
        self.cache.write().await.invalidate(key)
    }

    pub async fn invalidate_prefix(&self, prefix: &str) -> usize {
        self.cache.write().await.invalidate_prefix(prefix)
    }

    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }
}
