//! Log-record engine.
//!
//! # Data Flow
//! ```text
//! Logger node
//!     → LogState (immutable snapshot: level, context fields, sink)
//!     → Event (pending record, extra fields)
//!     → JSON line
//!     → Sink (locked writer or discard)
//! ```
//!
//! # Design Decisions
//! - `LogState` is never mutated; every derivation returns a new snapshot
//! - Only `LogState::new` decides the sink, derivations keep it
//! - Disabled events are inert and cost one branch per field call

pub mod event;
pub mod level;
pub mod sink;
pub mod state;

pub use event::Event;
pub use level::{Level, ParseLevelError};
pub use sink::{SharedBuffer, Sink};
pub use state::{Field, LogState};
