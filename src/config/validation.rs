//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject path segments that can never match a request path
//! - Reject empty component references and reserved property keys
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RoutesConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is turned into route nodes; the flattener itself
//!   never validates

use thiserror::Error;

use crate::config::schema::{RouteConfig, RoutesConfig};
use crate::routing::canonical;

/// Property keys with a meaning of their own.
const RESERVED_KEYS: &[&str] = &["path", "component", "children"];

/// A single semantic problem in a routes file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `component = ""`.
    #[error("route {route}: component reference is empty")]
    EmptyComponent { route: String },

    /// Query, fragment or whitespace inside a path segment.
    #[error("route {route}: path segment {segment:?} contains {found:?}")]
    InvalidPathCharacter {
        route: String,
        segment: String,
        found: char,
    },

    /// A property named like one of the route's own fields.
    #[error("route {route}: property {key:?} is reserved")]
    ReservedProperty { route: String, key: String },

    /// Unknown log level.
    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Validate a whole routes file.
pub fn validate_config(config: &RoutesConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let level = config.observability.log_level.to_ascii_lowercase();
    if !["trace", "debug", "info", "warn", "error"].contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    validate_routes(&config.routes, "", &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_routes(routes: &[RouteConfig], parent: &str, errors: &mut Vec<ValidationError>) {
    for route in routes {
        let path = canonical::join(parent, route.path.as_deref());
        let label = if path.is_empty() { "<root group>".to_string() } else { path.clone() };

        if let Some(segment) = &route.path {
            if let Some(found) = segment
                .trim()
                .chars()
                .find(|c| *c == '?' || *c == '#' || c.is_whitespace())
            {
                errors.push(ValidationError::InvalidPathCharacter {
                    route: label.clone(),
                    segment: segment.clone(),
                    found,
                });
            }
        }

        if matches!(&route.component, Some(c) if c.trim().is_empty()) {
            errors.push(ValidationError::EmptyComponent { route: label.clone() });
        }

        // Only reachable for configs built in code; serde claims these keys.
        for key in RESERVED_KEYS {
            if route.props.contains_key(*key) {
                errors.push(ValidationError::ReservedProperty {
                    route: label.clone(),
                    key: (*key).to_string(),
                });
            }
        }

        if let Some(children) = &route.children {
            validate_routes(children, &path, errors);
        }
    }
}
