//! The process-wide default root.

use std::sync::LazyLock;

use crate::hierarchy::root::RootLogger;

static ROOT: LazyLock<RootLogger> = LazyLock::new(RootLogger::new);

/// The process-wide root logger.
///
/// Starts in the discard state so any code can create children and log
/// before the application binds a destination.
pub fn root() -> &'static RootLogger {
    &ROOT
}
