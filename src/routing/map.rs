//! Flattened route table.
//!
//! # Design Decisions
//! - O(1) lookup by canonical path via HashMap
//! - Iteration follows first insertion order (traversal order of the build)
//! - Re-inserting a path replaces its entry but keeps its position
//! - No removal: a built map is never mutated by its consumers

use std::collections::HashMap;

use serde::Serialize;

use crate::routing::canonical::canonicalize;
use crate::routing::node::RouteProps;
use crate::routing::resource::Resource;

/// Reserved catch-all key.
pub const WILDCARD_PATH: &str = "/*";

/// A flattened route.
#[derive(Debug)]
pub struct RouteEntry<T> {
    /// Canonical absolute path. Same as the entry's key.
    pub path: String,
    /// Properties merged from every ancestor, own values last.
    pub props: RouteProps,
    /// Lazily loaded renderable unit, if the route declared one.
    pub component: Option<Resource<T>>,
}

impl<T> RouteEntry<T> {
    /// Serializable view of the entry, without the component state.
    pub fn summary(&self) -> EntrySummary<'_> {
        EntrySummary {
            path: &self.path,
            props: &self.props,
            component: self.component.is_some(),
        }
    }
}

/// Serializable description of a [`RouteEntry`].
#[derive(Debug, Serialize)]
pub struct EntrySummary<'a> {
    pub path: &'a str,
    pub props: &'a RouteProps,
    pub component: bool,
}

/// Canonical path → route entry.
#[derive(Debug)]
pub struct RoutesEntryMap<T> {
    entries: HashMap<String, RouteEntry<T>>,
    order: Vec<String>,
}

impl<T> RoutesEntryMap<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Insert an entry under its canonical path, replacing any previous one.
    pub(crate) fn insert(&mut self, entry: RouteEntry<T>) {
        let key = entry.path.clone();
        if self.entries.insert(key.clone(), entry).is_some() {
            tracing::debug!(path = %key, "Route path declared twice, keeping the later route");
        } else {
            self.order.push(key);
        }
    }

    /// Exact lookup by canonical path.
    pub fn get(&self, path: &str) -> Option<&RouteEntry<T>> {
        self.entries.get(path)
    }

    /// Canonicalize `raw` and look it up. Patterns are not expanded.
    pub fn lookup(&self, raw: &str) -> Option<&RouteEntry<T>> {
        self.entries.get(&canonicalize(raw))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a catch-all route exists.
    pub fn has_wildcard(&self) -> bool {
        self.contains(WILDCARD_PATH)
    }

    /// Canonical paths in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry<T>> {
        self.order.iter().filter_map(|path| self.entries.get(path))
    }
}
