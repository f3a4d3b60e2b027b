//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber: an environment filter for
//! the level and a compact formatting layer writing to a size-rotated log
//! file under the plugin data directory.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::file_writer::FileWriter;
use crate::Config;

/// Initializes the tracing subscriber with rotating file output.
///
/// # Level Resolution
///
/// 1. `RUST_LOG` environment variable, when set
/// 2. `config.trace_level`, when set
/// 3. Default: `"info"`
///
/// # File Location
///
/// Logs are written to `lexikey.log` inside the plugin data directory
/// (`~/.local/share/zellij/lexikey` on a typical setup), rotated at 10 MB
/// with 3 backups retained.
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently returns if directory creation fails (observability is
///   optional, the plugin keeps working without logs)
/// - Idempotent: safe to call multiple times, only the first call takes
///   effect
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let writer = FileWriter::new(data_dir.join("lexikey.log"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer);

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);

    let _ = subscriber.try_init();
}
