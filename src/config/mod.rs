//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! routes file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RoutesConfig (validated, immutable)
//!     → page::routes_from_config → RouteNode tree
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → receiver rebuilds the map and publishes it
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Unknown route keys are route properties, not errors

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{ObservabilityConfig, RouteConfig, RoutesConfig};
pub use validation::ValidationError;
