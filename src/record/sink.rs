//! Output destinations.
//!
//! # Responsibilities
//! - Wrap any `Write + Send` value as a shareable destination
//! - Serialize whole-record writes so lines never interleave
//! - Provide the discard destination used by the no-op state

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// A destination records are written to.
///
/// Cloning a sink shares the underlying writer.
#[derive(Clone, Default)]
pub struct Sink {
    writer: Option<SharedWriter>,
}

impl Sink {
    /// Wrap a writer.
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Some(Arc::new(Mutex::new(Box::new(writer)))),
        }
    }

    /// The destination that drops every record.
    pub fn discard() -> Self {
        Self { writer: None }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Open `path` for appending, creating it if needed.
    pub fn file(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }

    /// Return true if this sink drops everything.
    pub fn is_discard(&self) -> bool {
        self.writer.is_none()
    }

    /// Write one encoded record.
    ///
    /// Failures are reported as diagnostics and otherwise dropped; a logging
    /// call never fails its caller.
    pub(crate) fn write_record(&self, line: &[u8]) {
        let Some(writer) = &self.writer else {
            return;
        };
        let mut writer = writer.lock();
        if let Err(e) = writer.write_all(line).and_then(|_| writer.flush()) {
            tracing::warn!(error = %e, "Failed to write log record");
        }
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_discard() {
            f.write_str("Sink::Discard")
        } else {
            f.write_str("Sink::Writer")
        }
    }
}

/// Two sinks are equal when they share the same writer.
impl PartialEq for Sink {
    fn eq(&self, other: &Self) -> bool {
        match (&self.writer, &other.writer) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// In-memory writer whose clones share one buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }

    /// Written records, one per line.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discard_drops_records() {
        let sink = Sink::discard();
        assert!(sink.is_discard());
        sink.write_record(b"{}\n");
    }

    #[test]
    fn test_shared_buffer_clones_share_contents() {
        let buffer = SharedBuffer::new();
        let sink = Sink::new(buffer.clone());
        assert!(!sink.is_discard());

        sink.write_record(b"one\n");
        sink.clone().write_record(b"two\n");
        assert_eq!(buffer.lines(), vec!["one", "two"]);

        buffer.clear();
        assert_eq!(buffer.contents(), "");
    }

    #[test]
    fn test_file_sink_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");

        Sink::file(&path).unwrap().write_record(b"first\n");
        Sink::file(&path).unwrap().write_record(b"second\n");

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "first\nsecond\n");
    }
}
