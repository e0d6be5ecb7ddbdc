//! Route entry map library.
//!
//! Flattens a nested route declaration tree into a map keyed by canonical
//! path, with a lazily loaded component attached to every entry.

pub mod config;
pub mod observability;
pub mod page;
pub mod routing;

pub use config::schema::RoutesConfig;
pub use routing::{routes_to_entry_map, BuildOptions, RouteEntry, RouteNode, RoutesEntryMap};
