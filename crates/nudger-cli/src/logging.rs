//! Log sink for the reminder loop.
//!
//! Builds a `tracing` subscriber that appends timestamped, leveled lines to
//! a log file, plus an optional compact stderr layer. The subscriber is
//! handed back to the caller instead of being installed globally.
//! `RUST_LOG` overrides the default `info` filter.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::fmt::{self, time::ChronoLocal};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILE: &str = "reminder_log.txt";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Build the subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened for appending.
pub fn subscriber(
    log_file: &Path,
    console: bool,
) -> std::io::Result<impl tracing::Subscriber + Send + Sync + 'static> {
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()));

    let console_layer = console.then(|| {
        fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    Ok(tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer))
}
