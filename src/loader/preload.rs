//! Preloadable Loader
//!
//! Memoizes an async factory so the load runs at most once, whether it is
//! triggered by first use or warmed ahead of time with `preload`.

use std::fmt;
use std::future::{Future, IntoFuture};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, warn};

use crate::error::LoadError;

/// Outcome every caller of a loader observes.
pub type LoadResult<T> = Result<Arc<T>, LoadError>;

/// Cloneable handle to the single in-flight (or settled) load.
pub type LoadFuture<T> = Shared<BoxFuture<'static, LoadResult<T>>>;

type Factory<T> = Box<dyn Fn() -> BoxFuture<'static, LoadResult<T>> + Send + Sync>;

// == Load State ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unstarted,
    Loading,
    Loaded,
    Failed,
}

impl LoadState {
    pub fn is_settled(self) -> bool {
        matches!(self, LoadState::Loaded | LoadState::Failed)
    }
}

// == Preloadable Loader ==
/// Lazily loaded unit with optional eager warming.
///
/// The factory is invoked at most once per loader. A failed load is final:
/// later calls observe the same `LoadError` and the factory is not retried.
pub struct PreloadableLoader<T> {
    name: String,
    factory: Factory<T>,
    pending: OnceLock<LoadFuture<T>>,
    warming: AtomicBool,
}

impl<T: Send + Sync + 'static> PreloadableLoader<T> {
    // == Constructor ==
    /// Wraps `factory`. Nothing runs until the loader is first triggered.
    pub fn new<F, Fut, E>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: fmt::Display,
    {
        let name = name.into();
        let loader_name = name.clone();

        let factory: Factory<T> = Box::new(move || {
            let name = loader_name.clone();
            factory()
                .map(move |result| {
                    result.map(Arc::new).map_err(|err| {
                        let err = LoadError::Failed {
                            name,
                            message: err.to_string(),
                        };
                        warn!(error = %err, "load failed");
                        err
                    })
                })
                .boxed()
        });

        Self {
            name,
            factory,
            pending: OnceLock::new(),
            warming: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // == Load ==
    /// Returns the shared load, invoking the factory on the first call only.
    ///
    /// The returned future drives the load when awaited.
    pub fn load(&self) -> LoadFuture<T> {
        self.pending
            .get_or_init(|| {
                debug!(loader = %self.name, "starting load");
                (self.factory)().shared()
            })
            .clone()
    }

    // == Preload ==
    /// Starts the load in the background and returns the same shared future
    /// `load` hands out.
    ///
    /// Outside a tokio runtime nothing is spawned and the load begins when the
    /// returned future is first awaited.
    pub fn preload(&self) -> LoadFuture<T> {
        let load = self.load();

        if load.peek().is_none() && !self.warming.swap(true, Ordering::AcqRel) {
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    debug!(loader = %self.name, "preloading");
                    handle.spawn(load.clone());
                }
                Err(_) => {
                    self.warming.store(false, Ordering::Release);
                    debug!(loader = %self.name, "no runtime, preload deferred to first use");
                }
            }
        }

        load
    }

    // == State ==
    pub fn state(&self) -> LoadState {
        match self.pending.get() {
            None => LoadState::Unstarted,
            Some(load) => match load.peek() {
                None => LoadState::Loading,
                Some(Ok(_)) => LoadState::Loaded,
                Some(Err(_)) => LoadState::Failed,
            },
        }
    }

    /// The loaded value, if the load has already succeeded.
    pub fn loaded(&self) -> Option<Arc<T>> {
        self.pending
            .get()
            .and_then(|load| load.peek())
            .and_then(|result| result.as_ref().ok())
            .cloned()
    }
}

impl<'a, T: Send + Sync + 'static> IntoFuture for &'a PreloadableLoader<T> {
    type Output = LoadResult<T>;
    type IntoFuture = LoadFuture<T>;

    fn into_future(self) -> Self::IntoFuture {
        self.load()
    }
}

impl<T: Send + Sync + 'static> fmt::Debug for PreloadableLoader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreloadableLoader")
            .field("name", &self.name)
            .field("state", &self.state())
            .finish()
    }
}
