//! Logging initialization for the binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary so embedding callers keep control of their own output.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use version_bridge::config::LOG_ENV;

/// Initialize the tracing subscriber, writing to stderr.
///
/// # Arguments
/// * `verbosity` - 0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE
/// * `json` - If true, output JSON lines
pub fn init(verbosity: u8, json: bool) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("version_bridge={level}")));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
