//! Shared helpers for integration tests.

use logtree::{RootLogger, SharedBuffer, Sink};
use serde_json::Value;

/// A private root bound to a fresh in-memory buffer.
#[allow(dead_code)]
pub fn buffered_root() -> (RootLogger, SharedBuffer) {
    let root = RootLogger::new();
    let buffer = SharedBuffer::new();
    root.bind(Some(Sink::new(buffer.clone())), []);
    (root, buffer)
}

/// Written records decoded as JSON objects.
#[allow(dead_code)]
pub fn records(buffer: &SharedBuffer) -> Vec<Value> {
    buffer
        .lines()
        .iter()
        .map(|line| serde_json::from_str(line).expect("record is valid JSON"))
        .collect()
}
