//! Configuration schema definitions.
//!
//! This module defines the routes file structure.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::flatten::BuildOptions;
use crate::routing::node::RouteProps;

/// Root configuration of a routes file.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RoutesConfig {
    /// Map build settings.
    pub build: BuildOptions,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route declarations, in priority order.
    pub routes: Vec<RouteConfig>,
}

impl RoutesConfig {
    /// Total number of declared routes, nested ones included.
    pub fn route_count(&self) -> usize {
        self.routes.iter().map(RouteConfig::subtree_len).sum()
    }
}

/// A declared route.
///
/// Every key other than `path`, `component` and `children` is an opaque
/// route property and is inherited by nested routes.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RouteConfig {
    /// Path segment relative to the parent route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Page file rendered for this route, relative to the routes file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,

    /// Nested routes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RouteConfig>>,

    /// Remaining keys (access flags, layout, titles, ...).
    #[serde(flatten)]
    pub props: RouteProps,
}

impl RouteConfig {
    fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(RouteConfig::subtree_len)
            .sum::<usize>()
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE: &str = r#"
[build]
warn_on_missing_wildcard = false

[[routes]]
path = "/"
component = "pages/home.html"

[[routes]]
path = "account"
auth = true
layout = "dashboard"

  [[routes.children]]
  path = "settings"
  component = "pages/settings.html"
  title = "Settings"

[[routes]]
path = "*"
component = "pages/404.html"
"#;

    #[test]
    fn test_parse_nested_routes() {
        let config: RoutesConfig = toml::from_str(SAMPLE).unwrap();

        assert!(!config.build.warn_on_missing_wildcard);
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.routes.len(), 3);
        assert_eq!(config.route_count(), 4);

        let account = &config.routes[1];
        assert_eq!(account.path.as_deref(), Some("account"));
        assert!(account.component.is_none());
        assert_eq!(account.props.get("auth"), Some(&json!(true)));
        assert_eq!(account.props.get("layout"), Some(&json!("dashboard")));

        let settings = &account.children.as_ref().unwrap()[0];
        assert_eq!(settings.component.as_deref(), Some("pages/settings.html"));
        assert_eq!(settings.props.get("title"), Some(&json!("Settings")));
        assert!(settings.props.get("path").is_none());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: RoutesConfig = toml::from_str("").unwrap();
        assert!(config.routes.is_empty());
        assert_eq!(
            config.build.warn_on_missing_wildcard,
            BuildOptions::default().warn_on_missing_wildcard
        );
    }
}
