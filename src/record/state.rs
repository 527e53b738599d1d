//! Immutable logging state snapshots.

use std::sync::Arc;

use serde_json::Value;

use crate::record::event::Event;
use crate::record::level::Level;
use crate::record::sink::Sink;

/// A structured key/value pair attached to records.
pub type Field = (String, Value);

/// Everything needed to emit a record: minimum level, context fields and
/// destination.
///
/// Cloning is cheap. Derivations never modify `self`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogState {
    level: Level,
    context: Arc<[Field]>,
    sink: Sink,
}

impl LogState {
    /// A state writing to `sink` at the most verbose level.
    pub fn new(sink: Sink) -> Self {
        Self {
            level: Level::Trace,
            context: Arc::from(Vec::new()),
            sink,
        }
    }

    /// The no-op state: discards everything until a real sink is bound.
    pub fn nop() -> Self {
        Self {
            level: Level::Disabled,
            ..Self::new(Sink::discard())
        }
    }

    /// Derive a state with a different minimum level.
    pub fn with_level(&self, level: Level) -> Self {
        Self {
            level,
            ..self.clone()
        }
    }

    /// Derive a state with one more context field.
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_fields([(key, value)])
    }

    /// Derive a state where `key` holds only `value`: earlier entries under
    /// `key` are removed and the new one is appended.
    pub fn with_field_replaced(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let mut context: Vec<Field> = self
            .context
            .iter()
            .filter(|(k, _)| *k != key)
            .cloned()
            .collect();
        context.push((key, value.into()));
        Self {
            context: Arc::from(context),
            ..self.clone()
        }
    }

    /// Derive a state with `fields` appended to the context, in order.
    pub fn with_fields<I, K, V>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut context = self.context.to_vec();
        context.extend(fields.into_iter().map(|(k, v)| (k.into(), v.into())));
        Self {
            context: Arc::from(context),
            ..self.clone()
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Context fields in attachment order.
    pub fn fields(&self) -> &[Field] {
        &self.context
    }

    /// Last value attached under `key`, if any.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.context
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn is_discard(&self) -> bool {
        self.sink.is_discard()
    }

    /// Return true if a record at `level` would be written.
    ///
    /// `Disabled` is a threshold, never a record level.
    pub fn enabled(&self, level: Level) -> bool {
        !self.sink.is_discard()
            && self.level != Level::Disabled
            && level != Level::Disabled
            && level >= self.level
    }

    /// Start a record at `level`.
    pub fn event(&self, level: Level) -> Event {
        Event::new(self, level)
    }

    pub(crate) fn sink(&self) -> &Sink {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SharedBuffer;

    #[test]
    fn test_nop_state() {
        let state = LogState::nop();
        assert_eq!(state.level(), Level::Disabled);
        assert!(state.is_discard());
        assert!(!state.enabled(Level::Panic));
    }

    #[test]
    fn test_new_state_is_permissive() {
        let state = LogState::new(Sink::new(SharedBuffer::new()));
        assert_eq!(state.level(), Level::Trace);
        assert!(state.enabled(Level::Trace));
        assert!(state.fields().is_empty());
    }

    #[test]
    fn test_derivation_leaves_original_untouched() {
        let base = LogState::new(Sink::new(SharedBuffer::new()));
        let derived = base.with_level(Level::Warn).with_field("service", "api");

        assert_eq!(base.level(), Level::Trace);
        assert!(base.fields().is_empty());
        assert_eq!(derived.level(), Level::Warn);
        assert_eq!(derived.field("service"), Some(&Value::from("api")));
        assert!(!derived.enabled(Level::Info));
        assert!(derived.enabled(Level::Error));
    }

    #[test]
    fn test_later_field_shadows_earlier() {
        let state = LogState::nop()
            .with_field("component", "a")
            .with_field("component", "b");
        assert_eq!(state.fields().len(), 2);
        assert_eq!(state.field("component"), Some(&Value::from("b")));
    }

    #[test]
    fn test_disabled_is_never_a_record_level() {
        let state = LogState::new(Sink::new(SharedBuffer::new()));
        assert!(state.enabled(Level::Panic));
        assert!(!state.enabled(Level::Disabled));
        assert!(!state.event(Level::Disabled).enabled());
    }

    #[test]
    fn test_replaced_field_keeps_single_entry() {
        let state = LogState::nop()
            .with_field("logger", "http")
            .with_field("service", "api")
            .with_field_replaced("logger", "client");
        let keys: Vec<&str> = state.fields().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["service", "logger"]);
        assert_eq!(state.field("logger"), Some(&Value::from("client")));
    }

    #[test]
    fn test_equality_tracks_sink_identity() {
        let a = LogState::new(Sink::new(SharedBuffer::new()));
        let b = LogState::new(Sink::new(SharedBuffer::new()));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(LogState::nop(), LogState::nop());
    }
}
