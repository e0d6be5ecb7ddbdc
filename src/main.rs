//! route-map
//!
//! Builds the flat route table for a routes file and serves lookups against it.
//!
//! # Architecture Overview
//!
//! ```text
//!   routes.toml ──▶ config ──▶ page::routes_from_config ──▶ RouteNode tree
//!                                                                │
//!                                                                ▼
//!                                                  routing::routes_to_entry_map
//!                                                                │
//!                       ┌────────────────────────────────────────┤
//!                       ▼                                        ▼
//!                  inspect / lookup                      watch (RouteTable,
//!                  (one build)                           rebuilt on change)
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use url::Url;

use route_map::config::watcher::ConfigWatcher;
use route_map::config::{load_config, RoutesConfig};
use route_map::observability::logging::init_logging;
use route_map::page::{routes_from_config, Page};
use route_map::routing::{routes_to_entry_map, RouteTable, RoutesEntryMap, WILDCARD_PATH};

#[derive(Parser)]
#[command(name = "route-map")]
#[command(about = "Flatten nested route declarations into a canonical path table", long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is unset. Defaults to the routes file setting.
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the flattened route table
    Inspect {
        /// Routes file
        routes: PathBuf,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Resolve a path or URL and print the page it renders
    Lookup {
        /// Routes file
        routes: PathBuf,
        /// Request path or full URL
        target: String,
    },
    /// Rebuild the route table whenever the routes file changes
    Watch {
        /// Routes file
        routes: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let routes_path = match &cli.command {
        Commands::Inspect { routes, .. }
        | Commands::Lookup { routes, .. }
        | Commands::Watch { routes } => routes.clone(),
    };

    let config = load_config(&routes_path)?;
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.observability.log_level.clone());
    init_logging(&level);

    tracing::info!(
        routes_file = %routes_path.display(),
        declared_routes = config.route_count(),
        "Configuration loaded"
    );

    let base_dir = base_dir(&routes_path);

    match cli.command {
        Commands::Inspect { json, .. } => {
            let map = build_map(&config, &base_dir);
            if json {
                let entries: Vec<_> = map.iter().map(|e| e.summary()).collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in map.iter() {
                    println!(
                        "{:<32} {:<9} {}",
                        entry.path,
                        if entry.component.is_some() { "component" } else { "-" },
                        serde_json::to_string(&entry.props)?
                    );
                }
            }
        }
        Commands::Lookup { target, .. } => {
            let map = build_map(&config, &base_dir);
            let path = request_path(&target);

            let entry = map
                .lookup(&path)
                .or_else(|| map.get(WILDCARD_PATH))
                .ok_or_else(|| format!("no route for {} and no {} route", path, WILDCARD_PATH))?;

            tracing::info!(request = %path, route = %entry.path, "Route resolved");

            match &entry.component {
                Some(resource) => {
                    let page = resource.load().await?;
                    print!("{}", page.body);
                }
                None => {
                    println!("{}", serde_json::to_string_pretty(&entry.summary())?);
                }
            }
        }
        Commands::Watch { .. } => {
            let table = RouteTable::new(build_map(&config, &base_dir));

            let (watcher, mut updates) = ConfigWatcher::new(&routes_path);
            let _watcher = watcher.run()?;

            loop {
                tokio::select! {
                    Some(config) = updates.recv() => {
                        table.publish(build_map(&config, &base_dir));
                    }
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Shutdown signal received");
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}

fn build_map(config: &RoutesConfig, base_dir: &Path) -> RoutesEntryMap<Page> {
    let nodes = routes_from_config(&config.routes, base_dir);
    routes_to_entry_map(&nodes, &config.build)
}

/// Directory page files are resolved against.
fn base_dir(routes_path: &Path) -> PathBuf {
    routes_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Path part of a request target, without query or fragment.
fn request_path(target: &str) -> String {
    match Url::parse(target) {
        Ok(url) if url.has_host() => url.path().to_string(),
        _ => target
            .split(['?', '#'])
            .next()
            .unwrap_or(target)
            .to_string(),
    }
}
