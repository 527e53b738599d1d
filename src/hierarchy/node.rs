//! Logger nodes.
//!
//! # Responsibilities
//! - Hold the live state behind an atomic pointer for lock-free emission
//! - Cache the parent's last pushed state and replay the stored configurer
//! - Own direct children and push fresh state down on every rebuild
//!
//! # Design Decisions
//! - Readers do one `ArcSwap` load; writers build a full snapshot and store it
//! - Children never point back at their parent, they get a value copy
//! - One mutex per node guards everything except the live state; locks are
//!   always taken ancestor before descendant, so passes cannot deadlock and
//!   a newer pass on a subtree cannot be overtaken by an older one
//! - Rebuild and drop walk the tree with an explicit stack, so depth is
//!   bounded by memory, not by the thread's stack

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::{ArcMutexGuard, Mutex, RawMutex};

use crate::hierarchy::configurer::Configurer;
use crate::record::{Event, Level, LogState};

/// A named entry in the logger hierarchy.
pub struct Logger {
    name: String,
    state: ArcSwap<LogState>,
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    parent: Arc<LogState>,
    configurer: Configurer,
    /// Layered after `configurer`; owned by the config file layer.
    overlay: Option<Configurer>,
    children: HashMap<String, Arc<Logger>>,
}

impl Inner {
    fn derive(&self, name: &str) -> LogState {
        let state = self.configurer.apply(name, &self.parent);
        match &self.overlay {
            Some(overlay) => overlay.apply(name, &state),
            None => state,
        }
    }
}

impl Logger {
    pub(crate) fn new(
        name: impl Into<String>,
        parent: Arc<LogState>,
        configurer: Configurer,
    ) -> Self {
        let name = name.into();
        let inner = Inner {
            parent,
            configurer,
            overlay: None,
            children: HashMap::new(),
        };
        let state = ArcSwap::from_pointee(inner.derive(&name));
        Self {
            name,
            state,
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create a child whose state is derived from this node's current state
    /// by `configurers`, applied in order.
    ///
    /// A child registered earlier under the same name is replaced. The
    /// replaced subtree stops receiving propagation but stays usable through
    /// any handle still held to it.
    pub fn create_child<I>(&self, name: impl Into<String>, configurers: I) -> Arc<Logger>
    where
        I: IntoIterator<Item = Configurer>,
    {
        let name = name.into();
        let configurer = Configurer::compose(configurers);

        let mut inner = self.inner.lock();
        // Read under the lock so a concurrent rebuild either lands first or
        // reaches the new child.
        let parent = self.state.load_full();
        let child = Arc::new(Logger::new(name.clone(), parent, configurer));

        if inner.children.insert(name.clone(), Arc::clone(&child)).is_some() {
            tracing::warn!(parent = %self.name, logger = %name, "Replaced existing child logger");
        } else {
            tracing::trace!(parent = %self.name, logger = %name, "Created child logger");
        }
        child
    }

    /// Replace this node's configurer and re-derive this node and every
    /// descendant before returning.
    ///
    /// Descendants replay their own stored configurers on top of the new
    /// state.
    pub fn reconfigure(&self, configurer: Configurer) {
        let mut inner = self.inner.lock();
        inner.configurer = configurer;
        self.rebuild(&inner);
    }

    /// Install or clear the overlay applied after this node's configurer.
    pub fn set_override(&self, overlay: Option<Configurer>) {
        let mut inner = self.inner.lock();
        inner.overlay = overlay;
        self.rebuild(&inner);
    }

    /// Replace both the cached parent state and the configurer.
    pub(crate) fn rebind(&self, parent: LogState, configurer: Configurer) {
        let mut inner = self.inner.lock();
        inner.parent = Arc::new(parent);
        inner.configurer = configurer;
        self.rebuild(&inner);
    }

    /// Re-derive this node, then every descendant in pre-order.
    ///
    /// The caller holds this node's lock. Each frame keeps its node's lock
    /// until the node's whole subtree is done, the same locks a recursive
    /// walk would hold.
    fn rebuild(&self, inner: &Inner) {
        let state = Arc::new(inner.derive(&self.name));
        self.state.store(Arc::clone(&state));
        let level = state.level();

        let mut frames = vec![Frame {
            _guard: None,
            pending: inner.children.values().cloned().collect(),
            state,
        }];
        let mut rebuilt = 1usize;

        while let Some(frame) = frames.last_mut() {
            let Some(child) = frame.pending.pop() else {
                frames.pop();
                continue;
            };
            let parent = Arc::clone(&frame.state);

            let mut guard = child.inner.lock_arc();
            guard.parent = parent;
            let state = Arc::new(guard.derive(&child.name));
            child.state.store(Arc::clone(&state));
            let pending = guard.children.values().cloned().collect();

            frames.push(Frame {
                _guard: Some(guard),
                pending,
                state,
            });
            rebuilt += 1;
        }

        tracing::debug!(logger = %self.name, level = %level, rebuilt, "Rebuilt logger subtree");
    }

    /// A detached copy of this node at `level`.
    ///
    /// The copy is not registered anywhere and never receives propagation.
    pub fn with_level(&self, level: Level) -> Logger {
        let state = self.state.load().with_level(level);
        Logger::new(self.name.clone(), Arc::new(state), Configurer::identity())
    }

    /// Current effective level.
    pub fn level(&self) -> Level {
        self.state.load().level()
    }

    /// Currently installed snapshot.
    pub fn state(&self) -> Arc<LogState> {
        self.state.load_full()
    }

    pub fn event(&self, level: Level) -> Event {
        self.state.load().event(level)
    }

    /// Shorthand for `self.event(level).msg(message)`.
    pub fn log(&self, level: Level, message: &str) {
        self.event(level).msg(message);
    }

    pub fn trace(&self) -> Event {
        self.event(Level::Trace)
    }

    pub fn debug(&self) -> Event {
        self.event(Level::Debug)
    }

    pub fn info(&self) -> Event {
        self.event(Level::Info)
    }

    pub fn warn(&self) -> Event {
        self.event(Level::Warn)
    }

    pub fn error(&self) -> Event {
        self.event(Level::Error)
    }

    /// Finishing a written fatal event exits the process with status 1.
    pub fn fatal(&self) -> Event {
        self.event(Level::Fatal)
    }

    /// Finishing a written panic event panics with its message.
    pub fn panic(&self) -> Event {
        self.event(Level::Panic)
    }

    pub fn child(&self, name: &str) -> Option<Arc<Logger>> {
        self.inner.lock().children.get(name).cloned()
    }

    /// Names of direct children, sorted.
    pub fn child_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.lock().children.keys().cloned().collect();
        names.sort();
        names
    }

    pub(crate) fn children(&self) -> Vec<Arc<Logger>> {
        self.inner.lock().children.values().cloned().collect()
    }

    /// Resolve a dot-separated path of child names, e.g. `"http.client"`.
    pub fn find(&self, path: &str) -> Option<Arc<Logger>> {
        let mut segments = path.split('.');
        let mut node = self.child(segments.next()?)?;
        for segment in segments {
            node = node.child(segment)?;
        }
        Some(node)
    }
}

/// One level of an in-progress rebuild.
struct Frame {
    _guard: Option<ArcMutexGuard<RawMutex, Inner>>,
    pending: Vec<Arc<Logger>>,
    state: Arc<LogState>,
}

impl Drop for Logger {
    fn drop(&mut self) {
        // Unhook descendants one at a time; dropping a deep chain in place
        // would recurse once per level.
        let mut orphans: Vec<Arc<Logger>> =
            self.inner.lock().children.drain().map(|(_, c)| c).collect();
        while let Some(child) = orphans.pop() {
            if let Some(child) = Arc::into_inner(child) {
                orphans.extend(child.inner.lock().children.drain().map(|(_, c)| c));
            }
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .finish_non_exhaustive()
    }
}
