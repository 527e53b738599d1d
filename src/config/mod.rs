//! Configuration file layer.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LogConfig (validated, immutable)
//!     → apply.rs: bind root destination, install per-logger overrides
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → LogConfig sent over channel
//!     → caller applies it to the root
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so an empty file is a valid (discarding) config
//! - Per-logger entries become overrides layered after the code's own
//!   configurers, so reloads never erase what the code attached
//! - Validation separates syntactic (serde) from semantic checks

pub mod apply;
pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use apply::Applied;
pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{LogConfig, LoggerConfig, Output};
pub use validation::{validate_config, ValidationError};
pub use watcher::ConfigWatcher;
