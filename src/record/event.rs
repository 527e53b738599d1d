//! Pending records and their JSON encoding.

use std::error::Error as StdError;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::record::level::Level;
use crate::record::state::{Field, LogState};

/// A record being built. Nothing is written until [`Event::msg`] or
/// [`Event::send`] is called.
///
/// An event created below the state's threshold is inert: field calls are
/// no-ops and finishing it writes nothing.
#[must_use = "an event is only written by `msg` or `send`"]
#[derive(Debug)]
pub struct Event {
    inner: Option<Pending>,
}

#[derive(Debug)]
struct Pending {
    state: LogState,
    level: Level,
    fields: Vec<Field>,
}

impl Event {
    pub(crate) fn new(state: &LogState, level: Level) -> Self {
        let inner = state.enabled(level).then(|| Pending {
            state: state.clone(),
            level,
            fields: Vec::new(),
        });
        Self { inner }
    }

    /// Return true if finishing this event will write a record.
    pub fn enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Attach a field to this record only.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if let Some(pending) = &mut self.inner {
            pending.fields.push((key.into(), value.into()));
        }
        self
    }

    pub fn str(self, key: impl Into<String>, value: &str) -> Self {
        self.field(key, value)
    }

    /// Attach `err` under the `error` key.
    pub fn err(self, err: &dyn StdError) -> Self {
        if !self.enabled() {
            return self;
        }
        let rendered = err.to_string();
        self.field("error", rendered)
    }

    /// Write the record with a message.
    pub fn msg(self, message: &str) {
        self.finish(Some(message));
    }

    /// Write the record without a message.
    pub fn send(self) {
        self.finish(None);
    }

    fn finish(self, message: Option<&str>) {
        let Some(pending) = self.inner else {
            return;
        };

        let record = Record {
            level: pending.level,
            context: pending.state.fields(),
            fields: &pending.fields,
            message,
        };
        let mut line = Vec::with_capacity(128);
        if let Err(e) = serde_json::to_writer(&mut line, &record) {
            tracing::warn!(error = %e, "Failed to encode log record");
            return;
        }
        line.push(b'\n');
        pending.state.sink().write_record(&line);

        match pending.level {
            Level::Fatal => std::process::exit(1),
            Level::Panic => panic!("{}", message.unwrap_or_default()),
            _ => {}
        }
    }
}

/// Wire form of one record: level, context, event fields, message.
struct Record<'a> {
    level: Level,
    context: &'a [Field],
    fields: &'a [Field],
    message: Option<&'a str>,
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("level", self.level.as_str())?;
        for (key, value) in self.context.iter().chain(self.fields) {
            map.serialize_entry(key, value)?;
        }
        if let Some(message) = self.message {
            map.serialize_entry("message", message)?;
        }
        map.end()
    }
}
