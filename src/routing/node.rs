//! Declared route tree.

use std::fmt;

use serde_json::{Map, Value};

use crate::routing::resource::Loader;

/// Open set of route properties (access flags, layout metadata, ...).
///
/// Opaque to the router; merged from ancestors and copied into entries.
pub type RouteProps = Map<String, Value>;

/// Property key that is consumed into path computation and never inherited.
pub const PATH_KEY: &str = "path";

/// A declared route, possibly with nested children.
///
/// A node without a path segment is a group: it shares its properties with
/// its children and sits on its parent's path.
pub struct RouteNode<T> {
    /// Path segment relative to the parent. `None` inherits the parent path.
    pub path: Option<String>,
    /// Loader for the renderable unit.
    pub component: Option<Loader<T>>,
    /// Nested routes. `None` and an empty list behave the same.
    pub children: Option<Vec<RouteNode<T>>>,
    /// Additional properties, propagated verbatim.
    pub props: RouteProps,
}

impl<T> RouteNode<T> {
    /// Create an empty node.
    pub fn new() -> Self {
        Self {
            path: None,
            component: None,
            children: None,
            props: RouteProps::new(),
        }
    }

    /// Set the path segment.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the component loader.
    pub fn component(mut self, loader: Loader<T>) -> Self {
        self.component = Some(loader);
        self
    }

    /// Set a route property.
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Set the child routes.
    pub fn children(mut self, children: Vec<RouteNode<T>>) -> Self {
        self.children = Some(children);
        self
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(RouteNode::subtree_len)
            .sum::<usize>()
    }
}

impl<T> Default for RouteNode<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Loader is a trait object, so Clone and Debug are written by hand.
impl<T> Clone for RouteNode<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            component: self.component.clone(),
            children: self.children.clone(),
            props: self.props.clone(),
        }
    }
}

impl<T> fmt::Debug for RouteNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteNode")
            .field("path", &self.path)
            .field("component", &self.component.is_some())
            .field("children", &self.children)
            .field("props", &self.props)
            .finish()
    }
}
