//! Logger hierarchy.
//!
//! # Data Flow
//! ```text
//! RootLogger::bind / Logger::reconfigure
//!     → configurer(name, parent state) → new snapshot
//!     → ArcSwap store on the node
//!     → push snapshot to each child, replay child's configurer
//!     → ... depth-first until the subtree is rebuilt
//!
//! Logger::info() etc.
//!     → one ArcSwap load → Event → Sink
//! ```
//!
//! # Design Decisions
//! - Emission never walks the tree and never takes a lock
//! - Propagation is synchronous; it returns only after every descendant
//!   has swapped in its new state
//! - Nodes live as long as their parent or any handle holds them

pub mod configurer;
pub mod global;
pub mod node;
pub mod root;

pub use configurer::Configurer;
pub use global::root;
pub use node::Logger;
pub use root::{RootLogger, ROOT_NAME};
