//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::{load_config, ConfigManager};

/// A watcher that monitors the configuration document for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<ConfigManager>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<ConfigManager>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Reload the document once and publish it if it loads and validates.
    ///
    /// Returns whether an update was sent.
    pub fn reload(&self) -> bool {
        reload_into(&self.path, &self.update_tx)
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for events to be delivered.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if touches_config(&event, &path) {
                        tracing::info!("Config file change detected, reloading...");
                        reload_into(&path, &tx);
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        // A rename-and-replace save drops a watch held on the file itself.
        watcher.watch(&watch_dir(&self.path), RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Whether a directory event creates or modifies the config file.
fn touches_config(event: &Event, path: &Path) -> bool {
    if !(event.kind.is_modify() || event.kind.is_create()) {
        return false;
    }
    let Some(name) = path.file_name() else {
        return false;
    };
    event.paths.iter().any(|p| p.file_name() == Some(name))
}

fn reload_into(path: &Path, tx: &mpsc::UnboundedSender<ConfigManager>) -> bool {
    match load_config(path) {
        Ok(new_config) => tx.send(new_config).is_ok(),
        Err(e) => {
            tracing::error!("Failed to reload config: {}. Keeping current configuration.", e);
            false
        }
    }
}

/// The live configuration, readable from any thread while reloads swap it.
pub struct SharedConfig {
    current: ArcSwap<ConfigManager>,
}

impl SharedConfig {
    pub fn new(config: ConfigManager) -> Self {
        Self {
            current: ArcSwap::from_pointee(config),
        }
    }

    /// Snapshot of the current configuration.
    pub fn load(&self) -> Arc<ConfigManager> {
        self.current.load_full()
    }

    pub fn store(&self, config: ConfigManager) {
        self.current.store(Arc::new(config));
    }

    /// Apply updates from a [`ConfigWatcher`] until its sender is dropped.
    pub async fn apply_updates(&self, mut updates: mpsc::UnboundedReceiver<ConfigManager>) {
        while let Some(config) = updates.recv().await {
            self.store(config);
            tracing::info!("Configuration reloaded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::default_config;
    use crate::config::{InformerConfig, SignedDuration};
    use notify::event::{CreateKind, EventKind, ModifyKind, RemoveKind, RenameMode};

    #[tokio::test]
    async fn test_apply_updates_swaps_config() {
        let shared = SharedConfig::new(default_config().unwrap());
        let before = shared.load();

        let mut next = default_config().unwrap();
        next.register(InformerConfig {
            metric_ttl: SignedDuration::from_secs(42),
        });

        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(next.clone()).unwrap();
        drop(tx);
        shared.apply_updates(rx).await;

        assert_eq!(*shared.load(), next);
        // readers holding the old snapshot are unaffected
        assert_eq!(before.informer(), Some(&InformerConfig::with_defaults()));
    }

    #[test]
    fn test_watch_dir_is_parent() {
        assert_eq!(watch_dir(Path::new("/etc/cluster/service.json")), PathBuf::from("/etc/cluster"));
        assert_eq!(watch_dir(Path::new("service.json")), PathBuf::from("."));
    }

    #[test]
    fn test_touches_config_filters_by_name() {
        let path = Path::new("/etc/cluster/service.json");

        let replaced = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::To)))
            .add_path(PathBuf::from("/etc/cluster/service.json"));
        assert!(touches_config(&replaced, path));

        let created = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/etc/cluster/service.json"));
        assert!(touches_config(&created, path));

        let other = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/etc/cluster/identity.json"));
        assert!(!touches_config(&other, path));

        let removed = Event::new(EventKind::Remove(RemoveKind::File))
            .add_path(PathBuf::from("/etc/cluster/service.json"));
        assert!(!touches_config(&removed, path));
    }

    #[test]
    fn test_reload_sends_valid_config_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.json");
        default_config().unwrap().save_to_file(&path).unwrap();

        let (watcher, mut rx) = ConfigWatcher::new(&path);
        assert!(watcher.reload());
        assert_eq!(rx.try_recv().unwrap(), default_config().unwrap());

        std::fs::write(&path, r#"{"informer": {"numpin": {"metric_ttl": "0s"}}}"#).unwrap();
        assert!(!watcher.reload());
        assert!(rx.try_recv().is_err());
    }
}
