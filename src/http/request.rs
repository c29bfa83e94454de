//! Request types
//!
//! Outbound request description and the per-call configuration, including the
//! opt-in cache settings honored by `ApiClient::get`.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;

// == Cache Options ==
/// Opt-in caching for a single GET call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheOptions {
    /// Freshness window, in milliseconds when deserialized
    #[serde(with = "ttl_millis")]
    pub ttl: Duration,
    /// Overrides the default request-derived key
    #[serde(default, rename = "cacheKey", alias = "cache_key")]
    pub cache_key: Option<String>,
}

impl CacheOptions {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            cache_key: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = Some(key.into());
        self
    }
}

mod ttl_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

// == Request Config ==
/// Per-call configuration accepted by every verb on `ApiClient`.
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    pub headers: BTreeMap<String, String>,
    /// Query parameters, kept sorted so cache keys are stable
    pub query: BTreeMap<String, String>,
    /// Only read by `get`; mutations ignore it
    pub cache: Option<CacheOptions>,
}

impl RequestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.insert(name.into(), value.to_string());
        self
    }

    pub fn cache(mut self, options: CacheOptions) -> Self {
        self.cache = Some(options);
        self
    }

    /// Shorthand for caching under the default key.
    pub fn cached(self, ttl: Duration) -> Self {
        self.cache(CacheOptions::new(ttl))
    }
}

// == Api Request ==
/// A fully resolved request handed to a `Transport`.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the transport's base URL, e.g. `/campaigns/7`
    pub path: String,
    pub query: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: BTreeMap::new(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub(crate) fn from_config(method: Method, path: &str, config: &RequestConfig) -> Self {
        Self {
            method,
            path: path.to_string(),
            query: config.query.clone(),
            headers: config.headers.clone(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    // == Resolved URL ==
    /// Path plus encoded query, e.g. `/campaigns?page=2&size=20`.
    pub fn resolved_path(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }

        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }

    /// Default cache identity: method and resolved path.
    pub fn cache_key(&self) -> String {
        format!("{} {}", self.method, self.resolved_path())
    }
}

fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
