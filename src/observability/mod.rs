//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!
//! Consumers:
//!     → logging.rs (fmt layer on stderr, EnvFilter)
//! ```
//!
//! # Design Decisions
//! - Diagnostics never change what a build returns
//! - The missing wildcard report is a `warn` event, gated by BuildOptions

pub mod logging;
