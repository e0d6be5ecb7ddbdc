//! Lazily materialized route components.
//!
//! # Responsibilities
//! - Wrap a component loader so it runs no later than the first read
//! - Memoize the single invocation's outcome (pending, ready or failed)
//! - Replay a failure on every read instead of retrying
//!
//! # Design Decisions
//! - `OnceLock` guards the first invocation, so concurrent first readers
//!   still run the loader once
//! - The in-flight load is a `Shared` future: any number of awaiters see
//!   the same outcome
//! - Inside a Tokio runtime the first materialize spawns a task that drives
//!   the load to completion, and reads poll it once without blocking
//! - Outside a runtime nothing is polled inline (loaders may need a reactor);
//!   reads report `Pending` with a handle the caller can await on any executor

use std::fmt;
use std::future::Future;
use std::sync::{Arc, OnceLock};

use futures_util::future::{BoxFuture, FutureExt, Shared};
use thiserror::Error;
use tokio::runtime::Handle;

/// Errors produced by component loaders.
///
/// Cloneable so a single failure can be handed to every reader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Reading the component's backing file failed.
    #[error("I/O error loading {target}: {reason}")]
    Io { target: String, reason: String },

    /// The loader reported a failure of its own.
    #[error("Component loader failed: {0}")]
    Failed(String),
}

/// A zero-argument async factory producing a renderable unit.
pub type Loader<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, LoadError>> + Send + Sync>;

/// Handle to the single in-flight (or finished) load of a resource.
pub type LoadFuture<T> = Shared<BoxFuture<'static, Result<T, LoadError>>>;

/// Build a [`Loader`] from an async closure.
pub fn loader<T, F, Fut>(f: F) -> Loader<T>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, LoadError>> + Send + 'static,
{
    Arc::new(move || f().boxed())
}

/// Result of reading a resource.
pub enum ResourceState<'a, T: Clone> {
    /// The load is still running. Await the handle to wait for it.
    Pending(LoadFuture<T>),
    /// The load finished successfully.
    Ready(&'a T),
    /// The load failed. The same error is returned on every read.
    Failed(&'a LoadError),
}

impl<T: Clone> ResourceState<'_, T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, ResourceState::Pending(_))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ResourceState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ResourceState::Failed(_))
    }
}

/// A memoized, lazily started component load.
pub struct Resource<T> {
    loader: Loader<T>,
    outcome: OnceLock<LoadFuture<T>>,
}

impl<T> Resource<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Wrap a loader. The loader is not invoked yet.
    pub fn new(loader: Loader<T>) -> Self {
        Self {
            loader,
            outcome: OnceLock::new(),
        }
    }

    /// Whether the loader has been invoked.
    pub fn is_started(&self) -> bool {
        self.outcome.get().is_some()
    }

    /// Start the load on first call and return the same handle on every call.
    pub fn materialize(&self) -> &LoadFuture<T> {
        self.outcome.get_or_init(|| {
            tracing::debug!("Invoking component loader");
            let future = (self.loader)()
                .inspect(|result| {
                    if let Err(e) = result {
                        tracing::warn!(error = %e, "Component load failed");
                    }
                })
                .boxed()
                .shared();

            match Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(future.clone().map(|_| ()));
                }
                Err(_) => {
                    tracing::debug!("No runtime; component load waits for its first awaiter");
                }
            }
            future
        })
    }

    /// Read the current state without blocking.
    ///
    /// Outside a Tokio runtime an unfinished load stays `Pending` until the
    /// returned handle is awaited.
    pub fn read(&self) -> ResourceState<'_, T> {
        let future = self.materialize();
        if future.peek().is_none() && Handle::try_current().is_ok() {
            // Loaders that are already done resolve on this poll.
            let _ = future.clone().now_or_never();
        }

        match future.peek() {
            Some(Ok(value)) => ResourceState::Ready(value),
            Some(Err(e)) => ResourceState::Failed(e),
            None => ResourceState::Pending(future.clone()),
        }
    }

    /// Wait for the load to finish and return its outcome.
    pub async fn load(&self) -> Result<T, LoadError> {
        self.materialize().clone().await
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for ResourceState<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceState::Pending(_) => f.write_str("Pending"),
            ResourceState::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            ResourceState::Failed(e) => f.debug_tuple("Failed").field(e).finish(),
        }
    }
}

impl<T> fmt::Debug for Resource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("started", &self.outcome.get().is_some())
            .finish_non_exhaustive()
    }
}
