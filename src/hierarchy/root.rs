//! The root of a logger hierarchy.

use std::ops::Deref;
use std::sync::Arc;

use crate::hierarchy::configurer::Configurer;
use crate::hierarchy::node::Logger;
use crate::record::{LogState, Sink};

/// Name of every root node.
pub const ROOT_NAME: &str = "root";

/// A logger node that also owns the output destination.
///
/// Everything a [`Logger`] can do is available through `Deref`.
#[derive(Debug)]
pub struct RootLogger {
    logger: Logger,
}

impl RootLogger {
    /// A fresh root in the discard state.
    pub fn new() -> Self {
        Self {
            logger: Logger::new(ROOT_NAME, Arc::new(LogState::nop()), Configurer::identity()),
        }
    }

    /// Bind the destination and the root's configurers, then rebuild every
    /// descendant.
    ///
    /// `None` restores the discard state. This is the only operation that
    /// changes where records go.
    pub fn bind<I>(&self, sink: Option<Sink>, configurers: I)
    where
        I: IntoIterator<Item = Configurer>,
    {
        let base = match sink {
            Some(sink) => LogState::new(sink),
            None => LogState::nop(),
        };
        tracing::debug!(discard = base.is_discard(), "Binding root logger destination");
        self.logger.rebind(base, Configurer::compose(configurers));
    }
}

impl Default for RootLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for RootLogger {
    type Target = Logger;

    fn deref(&self) -> &Logger {
        &self.logger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::configurer::level;
    use crate::record::{Level, SharedBuffer};

    #[test]
    fn test_new_root_discards() {
        let root = RootLogger::new();
        assert_eq!(root.name(), ROOT_NAME);
        assert_eq!(root.level(), Level::Disabled);
        assert!(root.state().is_discard());
    }

    #[test]
    fn test_bind_then_unbind() {
        let root = RootLogger::new();
        let buffer = SharedBuffer::new();
        let child = root.create_child("child", []);

        root.bind(Some(Sink::new(buffer.clone())), [level(Level::Info)]);
        child.info().msg("on");
        assert_eq!(child.level(), Level::Info);

        root.bind(None, []);
        child.error().msg("off");
        assert!(child.state().is_discard());
        assert_eq!(buffer.lines(), vec!["{\"level\":\"info\",\"message\":\"on\"}"]);
    }

    #[test]
    fn test_reconfigure_keeps_destination() {
        let root = RootLogger::new();
        let buffer = SharedBuffer::new();
        root.bind(Some(Sink::new(buffer.clone())), []);

        root.reconfigure(level(Level::Warn));
        root.warn().msg("still here");
        assert_eq!(buffer.lines().len(), 1);
    }
}
