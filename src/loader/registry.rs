//! Loader Registry
//!
//! Named preloadable loaders, one per route or view, so navigation code can
//! warm a destination before switching to it.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;

use futures::future::{join_all, JoinAll};

use crate::error::LoadError;
use crate::loader::{LoadFuture, LoadResult, LoadState, PreloadableLoader};

// == Loader Registry ==
pub struct LoaderRegistry<T> {
    loaders: BTreeMap<String, PreloadableLoader<T>>,
}

impl<T: Send + Sync + 'static> LoaderRegistry<T> {
    pub fn new() -> Self {
        Self {
            loaders: BTreeMap::new(),
        }
    }

    // == Register ==
    /// Adds a loader under `name`, replacing any loader already registered
    /// there.
    pub fn register<F, Fut, E>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: fmt::Display,
    {
        let name = name.into();
        self.loaders
            .insert(name.clone(), PreloadableLoader::new(name, factory));
        self
    }

    pub fn get(&self, name: &str) -> Option<&PreloadableLoader<T>> {
        self.loaders.get(name)
    }

    fn require(&self, name: &str) -> Result<&PreloadableLoader<T>, LoadError> {
        self.get(name)
            .ok_or_else(|| LoadError::UnknownRoute(name.to_string()))
    }

    // == Preload ==
    /// Warms one route.
    pub fn preload(&self, name: &str) -> Result<LoadFuture<T>, LoadError> {
        Ok(self.require(name)?.preload())
    }

    /// Warms every registered route; the returned future resolves once all
    /// of them have settled, in name order.
    pub fn preload_all(&self) -> JoinAll<LoadFuture<T>> {
        join_all(self.loaders.values().map(PreloadableLoader::preload))
    }

    // == Load ==
    pub async fn load(&self, name: &str) -> LoadResult<T> {
        self.require(name)?.load().await
    }

    pub fn state(&self, name: &str) -> Option<LoadState> {
        self.get(name).map(PreloadableLoader::state)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.loaders.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl<T: Send + Sync + 'static> Default for LoaderRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync + 'static> fmt::Debug for LoaderRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.loaders.iter().map(|(name, loader)| (name, loader.state())))
            .finish()
    }
}
