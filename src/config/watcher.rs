//! Hot reload of the log configuration file.
//!
//! # Responsibilities
//! - Notice edits to the config file, including saves that replace it
//! - Reload and validate, forwarding only configs that actually changed
//!
//! # Design Decisions
//! - Watches the parent directory and filters on the file name; a watch on
//!   the file itself is lost when an editor renames a new file over it
//! - A file that fails to load or validate is reported and skipped, the
//!   running configuration stays in place

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::LogConfig;

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<LogConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<LogConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            update_tx,
        };
        (watcher, update_rx)
    }

    /// Start watching in a background thread. The returned handle stops the
    /// watch when dropped.
    ///
    /// Whatever the file holds at this point counts as already delivered.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let dir = watch_dir(&self.path);
        let mut reloader = Reloader::new(self.path.clone(), self.update_tx);

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => reloader.handle(&event),
                Err(e) => tracing::error!(error = %e, "Log config watch error"),
            },
            Config::default(),
        )?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(
            path = %self.path.display(),
            dir = %dir.display(),
            "Log config watcher started"
        );
        Ok(watcher)
    }
}

fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Turns file events into config updates.
struct Reloader {
    path: PathBuf,
    file_name: Option<OsString>,
    last: Option<LogConfig>,
    tx: mpsc::UnboundedSender<LogConfig>,
}

impl Reloader {
    fn new(path: PathBuf, tx: mpsc::UnboundedSender<LogConfig>) -> Self {
        let file_name = path.file_name().map(|name| name.to_os_string());
        let last = load_config(&path).ok();
        Self {
            path,
            file_name,
            last,
            tx,
        }
    }

    fn concerns(&self, event: &Event) -> bool {
        (event.kind.is_modify() || event.kind.is_create())
            && event
                .paths
                .iter()
                .any(|p| p.file_name() == self.file_name.as_deref())
    }

    fn handle(&mut self, event: &Event) {
        if !self.concerns(event) {
            return;
        }

        let config = match load_config(&self.path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "Failed to reload log config, keeping current configuration"
                );
                return;
            }
        };
        if self.last.as_ref() == Some(&config) {
            tracing::debug!("Log config unchanged, skipping");
            return;
        }

        match self.tx.send(config.clone()) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "Log config reloaded");
                self.last = Some(config);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Log config reload dropped, nobody is listening")
            }
        }
    }
}
