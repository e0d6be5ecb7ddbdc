//! Published route table for hot reload.
//!
//! Readers take a snapshot with [`RouteTable::current`] and keep using it for
//! the whole request, even if a reload publishes a newer map meanwhile.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::routing::map::RoutesEntryMap;

/// Atomically replaceable [`RoutesEntryMap`].
#[derive(Debug)]
pub struct RouteTable<T> {
    current: ArcSwap<RoutesEntryMap<T>>,
}

impl<T> RouteTable<T> {
    pub fn new(map: RoutesEntryMap<T>) -> Self {
        Self {
            current: ArcSwap::from_pointee(map),
        }
    }

    /// Snapshot of the map currently in use.
    pub fn current(&self) -> Arc<RoutesEntryMap<T>> {
        self.current.load_full()
    }

    /// Publish a new map. Returns the map it replaced.
    pub fn publish(&self, map: RoutesEntryMap<T>) -> Arc<RoutesEntryMap<T>> {
        let entries = map.len();
        let previous = self.current.swap(Arc::new(map));
        tracing::info!(
            previous_entries = previous.len(),
            entries,
            "Route table published"
        );
        previous
    }
}
