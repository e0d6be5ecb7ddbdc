//! File-backed pages, the renderable units of a routes file.
//!
//! A route's `component` names a page file relative to the routes file. The
//! file is read the first time the route's resource is read.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::schema::RouteConfig;
use crate::routing::node::RouteNode;
use crate::routing::resource::{loader, LoadError, Loader};

/// A loaded page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// File the page was read from.
    pub source: PathBuf,
    /// Page contents.
    pub body: Arc<str>,
}

/// Loader that reads `source` asynchronously.
pub fn page_loader(source: PathBuf) -> Loader<Page> {
    let source = Arc::new(source);
    loader(move || {
        let source = source.clone();
        async move {
            tracing::debug!(source = %source.display(), "Reading page");
            let body = tokio::fs::read_to_string(source.as_path())
                .await
                .map_err(|e| LoadError::Io {
                    target: source.display().to_string(),
                    reason: e.to_string(),
                })?;
            Ok::<_, LoadError>(Page {
                source: (*source).clone(),
                body: Arc::from(body),
            })
        }
    })
}

/// Turn configured routes into route nodes backed by page files.
///
/// Component paths are resolved against `base_dir`.
pub fn routes_from_config(routes: &[RouteConfig], base_dir: &Path) -> Vec<RouteNode<Page>> {
    routes
        .iter()
        .map(|route| RouteNode {
            path: route.path.clone(),
            component: route
                .component
                .as_ref()
                .map(|c| page_loader(base_dir.join(c))),
            children: route
                .children
                .as_ref()
                .map(|children| routes_from_config(children, base_dir)),
            props: route.props.clone(),
        })
        .collect()
}
