//! Diagnostic logging for the playbook CLI.
//!
//! Logs go to stderr through a tracing subscriber so stdout carries only
//! command output. The filter comes from `--log-level` and defaults to
//! `warn`, which keeps normal runs quiet.

use crate::error::{PlaybookError, Result};
use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the filter for `level` (any `EnvFilter` directive, e.g. `debug`).
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| PlaybookError::Config(format!("invalid log level '{}': {}", level, e)))
}

/// Install the global stderr subscriber.
pub fn init_logging(level: &str) -> Result<()> {
    let filter = build_filter(level)?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_ansi(std::io::stderr().is_terminal());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| PlaybookError::Config(format!("failed to initialize logging: {}", e)))
}
