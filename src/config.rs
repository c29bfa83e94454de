//! Configuration Module
//!
//! Loads client configuration from environment variables.

use std::env;
use std::time::Duration;

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the console's REST backend
    pub api_base_url: String,
    /// Default cache TTL in milliseconds for resource store reads
    pub default_ttl_ms: u64,
    /// Transport timeout in seconds
    pub request_timeout: u64,
    /// Background cache cleanup interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `API_BASE_URL` - Backend base URL (default: http://localhost:8080/api)
    /// - `CACHE_DEFAULT_TTL_MS` - Default cache TTL in ms (default: 60000)
    /// - `REQUEST_TIMEOUT_SECS` - Transport timeout in seconds (default: 30)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: env::var("API_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.api_base_url),
            default_ttl_ms: parse_var("CACHE_DEFAULT_TTL_MS").unwrap_or(defaults.default_ttl_ms),
            request_timeout: parse_var("REQUEST_TIMEOUT_SECS").unwrap_or(defaults.request_timeout),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }

    /// Default TTL as a Duration.
    pub fn default_ttl(&self) -> Duration {
        Duration::from_millis(self.default_ttl_ms)
    }

    /// Transport timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Cleanup interval as a Duration, never shorter than one second.
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval.max(1))
    }
}

fn parse_var(name: &str) -> Option<u64> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            default_ttl_ms: 60_000,
            request_timeout: 30,
            cleanup_interval: 30,
        }
    }
}
