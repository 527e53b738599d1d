//! Hierarchical logger configuration.
//!
//! A tree of named loggers. Each node derives its state from its parent's
//! through a stored [`Configurer`]; reconfiguring any node re-derives it and
//! every descendant before returning, while emission on any node is a single
//! lock-free load of the node's current snapshot.
//!
//! ```
//! use logtree::configurer::{level, name_field};
//! use logtree::{Level, RootLogger, SharedBuffer, Sink};
//!
//! let root = RootLogger::new();
//! let db = root.create_child("db", [name_field("logger")]);
//!
//! let buffer = SharedBuffer::new();
//! root.bind(Some(Sink::new(buffer.clone())), [level(Level::Info)]);
//!
//! db.debug().msg("suppressed");
//! db.info().field("rows", 3).msg("query done");
//! assert_eq!(
//!     buffer.contents(),
//!     "{\"level\":\"info\",\"logger\":\"db\",\"rows\":3,\"message\":\"query done\"}\n"
//! );
//! ```

pub mod config;
pub mod hierarchy;
pub mod record;

pub use hierarchy::configurer;
pub use hierarchy::{root, Configurer, Logger, RootLogger};
pub use record::{Event, Level, LogState, SharedBuffer, Sink};
