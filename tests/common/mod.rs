//! Shared utilities for integration testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use route_map::routing::{loader, BuildOptions, Loader, RouteNode};

/// Loader returning `value` that counts its invocations.
pub fn counting_loader(value: &'static str) -> (Loader<&'static str>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let loader = loader(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        async move { Ok(value) }
    });
    (loader, calls)
}

/// Route node with a path segment.
#[allow(dead_code)]
pub fn route(path: &str) -> RouteNode<&'static str> {
    RouteNode::new().path(path)
}

/// Build options with the wildcard diagnostic switched off.
#[allow(dead_code)]
pub fn quiet() -> BuildOptions {
    BuildOptions {
        warn_on_missing_wildcard: false,
    }
}

/// Layer counting `WARN` events.
#[derive(Clone, Default)]
pub struct WarnCounter {
    count: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl WarnCounter {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}
