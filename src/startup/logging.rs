//! Tracing subscriber setup.
//!
//! The TUI owns stdout, so log lines go to `tuiman.log` in the state
//! directory. Logging is best-effort: when the file cannot be opened the
//! subscriber writes to a sink.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Returns false when the log file could not
/// be opened (events are discarded) or a subscriber was already installed.
pub fn init_logging(log_file: &Path, filter: &str) -> bool {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    match OpenOptions::new().create(true).append(true).open(log_file) {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .with_writer(Mutex::new(file))
            .try_init()
            .is_ok(),
        Err(_) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init();
            false
        }
    }
}
