//! Logging setup for embedding shells.
//!
//! The library itself only emits `log` records; an application that wants
//! them rendered calls [`init_logging`] once at startup. Records are bridged
//! into `tracing` and formatted by a `tracing-subscriber` layer honoring
//! `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber with an `info` default level.
pub fn init_logging() {
    init_logging_with("info");
}

/// Installs the global subscriber. `default_filter` applies when `RUST_LOG`
/// is unset. Calling this more than once is harmless.
pub fn init_logging_with(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if tracing_log::LogTracer::init().is_err() {
        log::debug!("log bridge already installed");
    }

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        log::debug!("logging already initialized");
    }
}
