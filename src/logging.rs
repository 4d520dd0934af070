//! Tracing setup.
//!
//! The terminal is the game surface, so logs never go to stdout/stderr while
//! playing. Logging is off unless a log file is configured (`--log` or
//! `MEMORY_LOG`); the filter comes from `RUST_LOG` and defaults to `info`.

use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a file-backed subscriber. Returns false if logging stays off.
pub fn init_tracing(log_file: Option<&Path>) -> bool {
    let Some(path) = log_file else {
        return false;
    };

    let file = match std::fs::File::create(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: failed to create log file {}: {}", path.display(), e);
            return false;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .is_ok()
}
