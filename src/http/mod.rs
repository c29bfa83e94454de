//! HTTP Module
//!
//! REST access for the console: request/response types, the transport seam
//! and the cache-aware `ApiClient`.

mod client;
mod request;
mod response;
mod transport;

pub use client::ApiClient;
pub use request::{ApiRequest, CacheOptions, RequestConfig};
pub use response::{ApiResponse, ResponseSource};
pub use transport::{ReqwestTransport, Transport};

// The method and status types used on the transport boundary.
pub use reqwest::{Method, StatusCode};
