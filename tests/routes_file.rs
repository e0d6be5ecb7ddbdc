//! Routes file to loaded page, end to end.

use std::fs;

use serde_json::json;

use route_map::config::{load_config, ConfigError};
use route_map::page::routes_from_config;
use route_map::routing::{routes_to_entry_map, LoadError, ResourceState, WILDCARD_PATH};

const ROUTES: &str = r#"
[build]
warn_on_missing_wildcard = true

[observability]
log_level = "debug"

[[routes]]
path = "/"
component = "pages/home.html"

  [[routes.children]]
  path = "about"
  component = "pages/about.html"

[[routes]]
path = "account"
auth = true

  [[routes.children]]
  layout = "dashboard"

    [[routes.children.children]]
    path = "settings"
    component = "pages/settings.html"

    [[routes.children.children]]
    path = "broken"
    component = "pages/missing.html"

[[routes]]
path = "*"
component = "pages/404.html"
"#;

fn write_site() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("pages")).unwrap();
    fs::write(dir.path().join("routes.toml"), ROUTES).unwrap();
    fs::write(dir.path().join("pages/home.html"), "home").unwrap();
    fs::write(dir.path().join("pages/about.html"), "about").unwrap();
    fs::write(dir.path().join("pages/settings.html"), "settings").unwrap();
    fs::write(dir.path().join("pages/404.html"), "not found").unwrap();
    dir
}

#[tokio::test]
async fn test_routes_file_builds_map_and_loads_pages() {
    let site = write_site();
    let config = load_config(&site.path().join("routes.toml")).unwrap();
    assert_eq!(config.observability.log_level, "debug");

    let nodes = routes_from_config(&config.routes, site.path());
    let map = routes_to_entry_map(&nodes, &config.build);

    assert_eq!(
        map.paths().collect::<Vec<_>>(),
        vec!["/", "/about", "/account", "/account/settings", "/account/broken", "/*"]
    );

    let settings = map.get("/account/settings").unwrap();
    assert_eq!(settings.props.get("auth"), Some(&json!(true)));
    assert_eq!(settings.props.get("layout"), Some(&json!("dashboard")));

    let page = settings.component.as_ref().unwrap().load().await.unwrap();
    assert_eq!(&*page.body, "settings");

    let about = map.lookup("about/").unwrap();
    assert_eq!(&*about.component.as_ref().unwrap().load().await.unwrap().body, "about");

    let fallback = map.lookup("/nowhere").or_else(|| map.get(WILDCARD_PATH)).unwrap();
    assert_eq!(&*fallback.component.as_ref().unwrap().load().await.unwrap().body, "not found");
}

#[tokio::test]
async fn test_missing_page_fails_and_stays_failed() {
    let site = write_site();
    let config = load_config(&site.path().join("routes.toml")).unwrap();
    let map = routes_to_entry_map(&routes_from_config(&config.routes, site.path()), &config.build);

    let broken = map.get("/account/broken").unwrap().component.as_ref().unwrap();
    let first = broken.load().await.unwrap_err();
    assert!(matches!(first, LoadError::Io { .. }));

    // Creating the file afterwards does not trigger a retry.
    fs::write(site.path().join("pages/missing.html"), "late").unwrap();
    match broken.read() {
        ResourceState::Failed(e) => assert_eq!(*e, first),
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(broken.load().await.unwrap_err(), first);
}

#[test]
fn test_invalid_routes_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("routes.toml");
    fs::write(&path, "[[routes]]\npath = \"docs?x\"\ncomponent = \"\"\n").unwrap();

    match load_config(&path) {
        Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 2),
        other => panic!("expected validation error, got {:?}", other),
    }
}
