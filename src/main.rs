//! logtree demo runner.
//!
//! Loads a log configuration, binds it to the process-wide root, and emits
//! a heartbeat from a small logger tree until interrupted. With `--watch`
//! the configuration file is reloaded on change and reapplied live.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use logtree::config::{load_config, ConfigWatcher, LogConfig};
use logtree::configurer::name_field;

#[derive(Parser)]
#[command(name = "logtree")]
#[command(about = "Run a logger hierarchy against a configuration file", long_about = None)]
struct Cli {
    /// TOML log configuration. Without it everything is discarded.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reload the configuration when the file changes.
    #[arg(short, long, requires = "config")]
    watch: bool,

    /// Heartbeat interval in milliseconds.
    #[arg(short, long, default_value_t = 1000)]
    interval_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Diagnostics about the hierarchy itself
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "logtree=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let root = logtree::root();

    let http = root.create_child("http", [name_field("logger")]);
    let client = http.create_child("client", [name_field("logger")]);
    let db = root.create_child("db", [name_field("logger")]);

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LogConfig::default(),
    };
    config.apply(root)?;

    let (_watcher, mut updates) = match (&cli.config, cli.watch) {
        (Some(path), true) => {
            let (watcher, rx) = ConfigWatcher::new(path);
            (Some(watcher.run()?), Some(rx))
        }
        _ => (None, None),
    };

    let mut ticker = tokio::time::interval(Duration::from_millis(cli.interval_ms));
    let mut beat: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                beat += 1;
                root.info().field("beat", beat).msg("heartbeat");
                http.debug().field("beat", beat).msg("heartbeat");
                client.trace().field("beat", beat).msg("heartbeat");
                db.warn().field("beat", beat).msg("heartbeat");
            }
            Some(new_config) = recv(&mut updates) => {
                if let Err(e) = new_config.apply(root) {
                    tracing::error!(error = %e, "Failed to apply reloaded log config");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, shutting down");
                break;
            }
        }
    }

    Ok(())
}

/// Wait on the update channel, or forever when not watching.
async fn recv(
    updates: &mut Option<tokio::sync::mpsc::UnboundedReceiver<LogConfig>>,
) -> Option<LogConfig> {
    match updates {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
