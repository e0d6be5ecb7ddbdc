//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     RouteNode[] (nested, with group properties)
//!     → flatten.rs (depth-first walk, property inheritance)
//!     → canonical.rs (normalize and join path segments)
//!     → resource.rs (wrap each component loader, not yet invoked)
//!     → RoutesEntryMap (immutable, keyed by canonical path)
//!
//! Lookup (per request):
//!     canonical path → map.rs (O(1) exact lookup)
//!     → RouteEntry.component.read() (first read starts the load)
//!
//! Reload:
//!     new RouteNode[] → new RoutesEntryMap → table.rs (atomic swap)
//! ```
//!
//! # Design Decisions
//! - Maps are built once and never mutated; reload publishes a new map
//! - Deterministic: same input always yields the same map and order
//! - No pattern matching; `/*` is only a conventional key

pub mod canonical;
pub mod flatten;
pub mod map;
pub mod node;
pub mod resource;
pub mod table;

pub use canonical::canonicalize;
pub use flatten::{routes_to_entry_map, BuildOptions};
pub use map::{RouteEntry, RoutesEntryMap, WILDCARD_PATH};
pub use node::{RouteNode, RouteProps};
pub use resource::{loader, LoadError, Loader, Resource, ResourceState};
pub use table::RouteTable;
