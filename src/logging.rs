//! Logging setup.
//!
//! Logs go to stderr: stdout carries converted JSON in CLI mode and the
//! JSON-RPC stream in tool-server mode.

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::DEFAULT_LOG_FILTER;

/// Install the global subscriber. `RUST_LOG` overrides `default_filter`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init();
}

/// [`init_logging`] with [`DEFAULT_LOG_FILTER`].
pub fn init_default_logging() {
    init_logging(DEFAULT_LOG_FILTER);
}
