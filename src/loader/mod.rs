//! Loader Module
//!
//! Memoized async loading with preload support, plus a registry of named
//! loaders for route-level warming.

mod preload;
mod registry;

pub use preload::{LoadFuture, LoadResult, LoadState, PreloadableLoader};
pub use registry::LoaderRegistry;
