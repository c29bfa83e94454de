//! Response types

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

// == Response Source ==
/// Where a response body came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Network,
    Cache,
}

// == Api Response ==
/// Response with a decoded JSON body.
///
/// Cached responses carry the same `data` as the live response they were taken
/// from, but report `304 Not Modified` and `ResponseSource::Cache`.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub data: Value,
    pub source: ResponseSource,
}

impl ApiResponse {
    pub fn new(status: StatusCode, data: Value) -> Self {
        Self {
            status,
            data,
            source: ResponseSource::Network,
        }
    }

    pub(crate) fn from_cache(data: Value) -> Self {
        Self {
            status: StatusCode::NOT_MODIFIED,
            data,
            source: ResponseSource::Cache,
        }
    }

    pub fn is_cached(&self) -> bool {
        self.source == ResponseSource::Cache
    }

    /// Decodes `data` into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.data.clone())?)
    }

    /// Consumes the response and decodes `data` into `T`.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(self.data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_network_and_cache_responses() {
        let fresh = ApiResponse::new(StatusCode::OK, json!({"id": 1}));
        assert!(!fresh.is_cached());
        assert_eq!(fresh.status, StatusCode::OK);

        let cached = ApiResponse::from_cache(fresh.data.clone());
        assert!(cached.is_cached());
        assert_eq!(cached.status, StatusCode::NOT_MODIFIED);
        assert_eq!(cached.data, fresh.data);
    }

    #[test]
    fn test_json_decode_error() {
        let resp = ApiResponse::new(StatusCode::OK, json!("text"));
        assert!(resp.json::<Vec<u32>>().is_err());
        assert_eq!(resp.json::<String>().unwrap(), "text");
    }
}
