//! Configuration functions.
//!
//! A configurer derives a node's state from its parent's state. Nodes store
//! one and replay it whenever a new parent state is pushed down.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::record::{Level, LogState};

type ConfigureFn = dyn Fn(&str, &LogState) -> LogState + Send + Sync;

/// A pure `(name, parent state) -> state` derivation.
#[derive(Clone)]
pub struct Configurer {
    f: Arc<ConfigureFn>,
}

impl Configurer {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str, &LogState) -> LogState + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    /// Pass the parent state through unchanged.
    pub fn identity() -> Self {
        Self::new(|_, state| state.clone())
    }

    /// Fold `configurers` left to right into one configurer.
    ///
    /// An empty sequence yields [`Configurer::identity`]; a single one is
    /// returned as is.
    pub fn compose<I>(configurers: I) -> Self
    where
        I: IntoIterator<Item = Configurer>,
    {
        let mut parts: Vec<Configurer> = configurers.into_iter().collect();
        match parts.len() {
            0 => Self::identity(),
            1 => parts.remove(0),
            _ => Self::new(move |name, state| {
                parts
                    .iter()
                    .fold(state.clone(), |acc, part| part.apply(name, &acc))
            }),
        }
    }

    /// Run the derivation for the node called `name`.
    pub fn apply(&self, name: &str, state: &LogState) -> LogState {
        (self.f)(name, state)
    }
}

impl fmt::Debug for Configurer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Configurer(..)")
    }
}

/// Set the minimum level.
pub fn level(level: Level) -> Configurer {
    Configurer::new(move |_, state| state.with_level(level))
}

/// Attach a static context field.
pub fn field(key: impl Into<String>, value: impl Into<Value>) -> Configurer {
    let key = key.into();
    let value = value.into();
    Configurer::new(move |_, state| state.with_field(key.clone(), value.clone()))
}

/// Attach the node's own name under `key`, replacing any name inherited or
/// attached earlier under the same key.
pub fn name_field(key: impl Into<String>) -> Configurer {
    let key = key.into();
    Configurer::new(move |name, state| state.with_field_replaced(key.clone(), name))
}
