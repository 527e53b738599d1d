//! The process-wide root. Kept to a single test so nothing else in this
//! binary touches the global before the default-state checks run.

use logtree::configurer::{level, name_field};
use logtree::{Level, SharedBuffer, Sink};
use serde_json::json;

mod common;

#[test]
fn test_global_root_lifecycle() {
    let root = logtree::root();

    // Usable before any configuration, and silent.
    let child = root.create_child("early", [name_field("logger")]);
    assert_eq!(root.level(), Level::Disabled);
    assert!(root.state().is_discard());
    assert!(child.state().is_discard());
    assert!(!child.error().enabled());
    child.error().msg("nobody hears this");

    // Same instance every time.
    assert!(std::ptr::eq(root, logtree::root()));
    assert!(root.child("early").is_some());

    // Binding later reaches children created earlier.
    let buffer = SharedBuffer::new();
    root.bind(Some(Sink::new(buffer.clone())), [level(Level::Info)]);
    child.debug().msg("suppressed");
    child.info().msg("now visible");

    assert_eq!(
        common::records(&buffer),
        vec![json!({"level": "info", "logger": "early", "message": "now visible"})]
    );

    root.bind(None, []);
    assert!(child.state().is_discard());
}
