//! Routes file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::RoutesConfig;

/// A watcher that monitors the routes file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<RoutesConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for reloaded configurations.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<RoutesConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file. Dropping the returned watcher stops it.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                reload_on_change(&path, res, &tx);
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Routes watcher started");
        Ok(watcher)
    }
}

/// Reload `path` after a write or create event and forward the new config.
///
/// Returns true when a config was sent. A file that fails to load is logged
/// and skipped, so the current route table stays in place.
fn reload_on_change(
    path: &Path,
    res: notify::Result<Event>,
    tx: &mpsc::UnboundedSender<RoutesConfig>,
) -> bool {
    let event = match res {
        Ok(event) => event,
        Err(e) => {
            tracing::error!(error = ?e, "Watch error");
            return false;
        }
    };
    if !(event.kind.is_modify() || event.kind.is_create()) {
        return false;
    }

    tracing::info!(path = %path.display(), "Routes file changed, reloading");
    match load_config(path) {
        Ok(config) => tx.send(config).is_ok(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to reload routes. Keeping current route table.");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind};
    use notify::EventKind;

    fn routes_file(content: &str) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), content).unwrap();
        file
    }

    #[test]
    fn test_modify_sends_reloaded_config() {
        let file = routes_file("[[routes]]\npath = \"a\"\n[[routes]]\npath = \"b\"\n");
        let (watcher, mut rx) = ConfigWatcher::new(file.path());

        let event = Event::new(EventKind::Modify(ModifyKind::Any));
        assert!(reload_on_change(file.path(), Ok(event), &watcher.update_tx));

        let config = rx.try_recv().unwrap();
        assert_eq!(config.routes.len(), 2);
    }

    #[test]
    fn test_create_sends_reloaded_config() {
        let file = routes_file("[[routes]]\npath = \"/\"\n");
        let (watcher, mut rx) = ConfigWatcher::new(file.path());

        let event = Event::new(EventKind::Create(CreateKind::File));
        assert!(reload_on_change(file.path(), Ok(event), &watcher.update_tx));
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn test_access_events_are_ignored() {
        let file = routes_file("[[routes]]\npath = \"a\"\n");
        let (watcher, mut rx) = ConfigWatcher::new(file.path());

        let event = Event::new(EventKind::Access(AccessKind::Any));
        assert!(!reload_on_change(file.path(), Ok(event), &watcher.update_tx));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_invalid_file_keeps_current_table() {
        let file = routes_file("[[routes]]\npath = \"bad path\"\n");
        let (watcher, mut rx) = ConfigWatcher::new(file.path());

        let event = Event::new(EventKind::Modify(ModifyKind::Any));
        assert!(!reload_on_change(file.path(), Ok(event), &watcher.update_tx));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_watch_error_is_skipped() {
        let file = routes_file("");
        let (watcher, mut rx) = ConfigWatcher::new(file.path());

        let err = notify::Error::generic("inotify limit reached");
        assert!(!reload_on_change(file.path(), Err(err), &watcher.update_tx));
        assert!(rx.try_recv().is_err());
    }
}
