//! Applying a configuration to a live hierarchy.
//!
//! # Responsibilities
//! - Open the configured output and bind it at the root
//! - Install per-logger overrides, clearing ones the config no longer names
//! - Report configured paths that match no existing logger
//!
//! Each node swaps atomically, but the pass as a whole is not one atomic
//! step: a concurrent reader may see the root's new level before a
//! descendant's override lands.

use std::sync::Arc;

use crate::config::loader::ConfigError;
use crate::config::schema::{LogConfig, Output};
use crate::hierarchy::configurer::{self, Configurer};
use crate::hierarchy::{Logger, RootLogger};
use crate::record::Sink;

/// Outcome of [`LogConfig::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Applied {
    /// Configured logger paths that were found in the tree.
    pub matched: Vec<String>,
    /// Configured logger paths with no logger yet; they take effect on the
    /// next apply after the logger is created.
    pub unmatched: Vec<String>,
}

impl Output {
    /// Open the destination; `None` means discard.
    pub fn open(&self) -> Result<Option<Sink>, ConfigError> {
        match self {
            Output::Discard => Ok(None),
            Output::Stdout => Ok(Some(Sink::stdout())),
            Output::Stderr => Ok(Some(Sink::stderr())),
            Output::File(path) => Sink::file(path)
                .map(Some)
                .map_err(|source| ConfigError::Output {
                    path: path.clone(),
                    source,
                }),
        }
    }
}

impl LogConfig {
    /// Bind this configuration to `root` and every logger under it.
    ///
    /// The output is opened first; if that fails the hierarchy is left
    /// untouched.
    pub fn apply(&self, root: &RootLogger) -> Result<Applied, ConfigError> {
        let sink = self.output.open()?;
        root.bind(sink, self.root_configurers());

        let mut matched = Vec::new();
        let mut pending: Vec<(Arc<Logger>, String)> = root
            .children()
            .into_iter()
            .map(|child| {
                let path = child.name().to_string();
                (child, path)
            })
            .collect();
        while let Some((node, path)) = pending.pop() {
            if self.apply_override(&node, &path) {
                matched.push(path.clone());
            }
            pending.extend(node.children().into_iter().map(|child| {
                let child_path = format!("{}.{}", path, child.name());
                (child, child_path)
            }));
        }
        matched.sort();

        let unmatched: Vec<String> = self
            .loggers
            .keys()
            .filter(|path| matched.binary_search(path).is_err())
            .cloned()
            .collect();
        for path in &unmatched {
            tracing::warn!(logger = %path, "Configured logger does not exist yet");
        }

        tracing::info!(
            level = %self.level,
            output = ?self.output,
            matched = matched.len(),
            unmatched = unmatched.len(),
            "Log configuration applied"
        );
        Ok(Applied { matched, unmatched })
    }

    /// Install the overlay for the logger at `path`. Returns true if the
    /// config has an entry for it.
    ///
    /// The name overlay replaces, so a logger that already attaches its own
    /// name under `name_key` still writes the key once.
    fn apply_override(&self, node: &Logger, path: &str) -> bool {
        let mut parts: Vec<Configurer> = Vec::new();
        if let Some(key) = &self.name_key {
            parts.push(configurer::name_field(key.clone()));
        }
        let entry = self.loggers.get(path);
        if let Some(entry) = entry {
            parts.extend(entry.configurers());
        }
        node.set_override((!parts.is_empty()).then(|| Configurer::compose(parts)));
        entry.is_some()
    }
}
