//! Applying and reapplying configuration files to a live tree.

use std::io::Write;

use logtree::config::{load_config, parse_config};
use logtree::configurer::field;
use logtree::{Level, RootLogger};
use serde_json::{json, Value};

mod common;

#[test]
fn test_file_output_and_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("app.log");
    let config_path = dir.path().join("log.toml");

    let mut file = std::fs::File::create(&config_path).unwrap();
    write!(
        file,
        r#"
        level = "info"
        name_key = "logger"
        output = {{ file = "{}" }}

        [fields]
        service = "api"

        [loggers.http]
        level = "warn"
        "#,
        out.display()
    )
    .unwrap();
    drop(file);

    let root = RootLogger::new();
    let http = root.create_child("http", []);
    let db = root.create_child("db", []);

    let config = load_config(&config_path).unwrap();
    config.apply(&root).unwrap();

    http.info().msg("dropped");
    http.warn().msg("slow request");
    db.info().msg("connected");

    let written = std::fs::read_to_string(&out).unwrap();
    let records: Vec<Value> = written
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(
        records,
        vec![
            json!({"level": "warn", "service": "api", "logger": "http", "message": "slow request"}),
            json!({"level": "info", "service": "api", "logger": "db", "message": "connected"}),
        ]
    );
}

#[test]
fn test_reapply_clears_stale_overrides() {
    let (root, _) = common::buffered_root();
    let worker = root.create_child("worker", [field("pool", "io")]);

    let first = parse_config(
        r#"
        [loggers.worker]
        level = "error"
        "#,
    )
    .unwrap();
    first.apply(&root).unwrap();
    assert_eq!(worker.level(), Level::Error);

    let second = parse_config(r#"level = "debug""#).unwrap();
    second.apply(&root).unwrap();
    assert_eq!(worker.level(), Level::Debug);
    // The code's own configurer is untouched by either apply.
    assert_eq!(worker.state().field("pool"), Some(&Value::from("io")));
}

#[test]
fn test_override_survives_code_reconfigure() {
    let (root, _) = common::buffered_root();
    let cache = root.create_child("cache", []);

    parse_config(
        r#"
        [loggers.cache]
        fields = { tier = "hot" }
        "#,
    )
    .unwrap()
    .apply(&root)
    .unwrap();

    cache.reconfigure(field("region", "eu"));
    let state = cache.state();
    assert_eq!(state.field("region"), Some(&Value::from("eu")));
    assert_eq!(state.field("tier"), Some(&Value::from("hot")));
}

#[test]
fn test_logger_created_after_apply_picks_up_on_next_apply() {
    let (root, _) = common::buffered_root();
    let config = parse_config(
        r#"
        level = "info"
        [loggers."jobs.cron"]
        level = "trace"
        "#,
    )
    .unwrap();

    let applied = config.apply(&root).unwrap();
    assert_eq!(applied.unmatched, vec!["jobs.cron"]);

    let cron = root.create_child("jobs", []).create_child("cron", []);
    assert_eq!(cron.level(), Level::Info);

    let applied = config.apply(&root).unwrap();
    assert_eq!(applied.matched, vec!["jobs.cron"]);
    assert_eq!(cron.level(), Level::Trace);
}
