//! adbook - client data layer for the ad-booking console
//!
//! Cached REST access to campaigns, properties, categories, FAQs, users and
//! roles, plus preloadable loaders for warming views before navigation.

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod loader;
pub mod models;
pub mod stores;
pub mod tasks;

pub use cache::{RequestCache, SharedCache};
pub use config::Config;
pub use error::{ApiError, LoadError, Result};
pub use http::{ApiClient, CacheOptions, RequestConfig};
pub use loader::{LoaderRegistry, PreloadableLoader};
pub use stores::ConsoleStores;
pub use tasks::spawn_cleanup_task;
