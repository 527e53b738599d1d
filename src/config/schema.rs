//! Configuration schema definitions.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::hierarchy::configurer::{self, Configurer};
use crate::record::Level;

/// Root configuration for a logger hierarchy.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// Minimum level at the root.
    pub level: Level,

    /// Where records go.
    pub output: Output,

    /// If set, every non-root logger attaches its name under this key.
    pub name_key: Option<String>,

    /// Static context fields attached at the root.
    pub fields: BTreeMap<String, Value>,

    /// Per-logger settings keyed by dot-separated path (e.g. "http.client").
    pub loggers: BTreeMap<String, LoggerConfig>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::Trace,
            output: Output::Discard,
            name_key: None,
            fields: BTreeMap::new(),
            loggers: BTreeMap::new(),
        }
    }
}

impl LogConfig {
    /// Configurers bound at the root: level, then fields.
    pub fn root_configurers(&self) -> Vec<Configurer> {
        let mut configurers = vec![configurer::level(self.level)];
        configurers.extend(
            self.fields
                .iter()
                .map(|(k, v)| configurer::field(k.clone(), v.clone())),
        );
        configurers
    }
}

/// Output destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Output {
    #[default]
    Discard,
    Stdout,
    Stderr,
    /// Append to a file, creating it if needed.
    File(PathBuf),
}

/// Settings for one logger.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: Option<Level>,
    pub fields: BTreeMap<String, Value>,
}

impl LoggerConfig {
    pub fn configurers(&self) -> Vec<Configurer> {
        let mut configurers: Vec<Configurer> =
            self.level.map(configurer::level).into_iter().collect();
        configurers.extend(
            self.fields
                .iter()
                .map(|(k, v)| configurer::field(k.clone(), v.clone())),
        );
        configurers
    }
}
