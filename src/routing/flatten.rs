//! Route tree flattening.
//!
//! # Responsibilities
//! - Walk the declared tree depth-first, parents before children
//! - Compute each node's canonical absolute path
//! - Merge group properties down to descendants
//! - Wrap every node's loader in a fresh [`Resource`]
//!
//! # Design Decisions
//! - Each recursion step receives its own immutable [`GroupContext`]
//! - Later routes with the same canonical path replace earlier ones
//! - The build never fails; a missing catch-all route is only reported

use serde::{Deserialize, Serialize};

use crate::routing::canonical;
use crate::routing::map::{RouteEntry, RoutesEntryMap, WILDCARD_PATH};
use crate::routing::node::{RouteNode, RouteProps, PATH_KEY};
use crate::routing::resource::Resource;

/// Options for a map build.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Emit a warning when no `/*` route is declared.
    pub warn_on_missing_wildcard: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            warn_on_missing_wildcard: cfg!(debug_assertions),
        }
    }
}

/// What a node hands down to its children.
#[derive(Debug, Clone, Default)]
struct GroupContext {
    /// Canonical absolute path of the ancestor.
    path: String,
    /// Merged properties of the ancestor chain.
    props: RouteProps,
}

/// Flatten a route tree into a map keyed by canonical path.
///
/// Every node yields one insertion. Children see their parent's merged
/// properties and resolve their path against the parent's absolute path.
pub fn routes_to_entry_map<T>(routes: &[RouteNode<T>], options: &BuildOptions) -> RoutesEntryMap<T>
where
    T: Clone + Send + Sync + 'static,
{
    let mut map = RoutesEntryMap::new();
    flatten_into(routes, &GroupContext::default(), &mut map);

    tracing::debug!(entries = map.len(), "Route entry map built");

    if options.warn_on_missing_wildcard {
        warn_missing_wildcard(&map);
    }
    map
}

fn flatten_into<T>(routes: &[RouteNode<T>], parent: &GroupContext, map: &mut RoutesEntryMap<T>)
where
    T: Clone + Send + Sync + 'static,
{
    for route in routes {
        let path = canonical::join(&parent.path, route.path.as_deref());
        let props = merge_props(&parent.props, &route.props);
        let children = route.children.as_deref().filter(|c| !c.is_empty());

        // Children resolve against this node's absolute path, not its segment.
        let context = children.map(|_| GroupContext {
            path: path.clone(),
            props: props.clone(),
        });

        map.insert(RouteEntry {
            path,
            props,
            component: route.component.clone().map(Resource::new),
        });

        if let (Some(children), Some(context)) = (children, context) {
            flatten_into(children, &context, map);
        }
    }
}

/// Ancestor properties first, own properties on top.
fn merge_props(inherited: &RouteProps, own: &RouteProps) -> RouteProps {
    let mut merged = inherited.clone();
    for (key, value) in own {
        if key == PATH_KEY {
            continue;
        }
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Returns true when the warning was emitted.
fn warn_missing_wildcard<T>(map: &RoutesEntryMap<T>) -> bool {
    if map.has_wildcard() {
        return false;
    }
    tracing::warn!(
        wildcard = WILDCARD_PATH,
        "No wildcard route declared; unmatched paths will not reach a Not Found page"
    );
    true
}
