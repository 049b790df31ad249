#![forbid(unsafe_code)]

//! Logging setup for the demo binary.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{DemoError, Result};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "QSHEET_LOG";

const DEFAULT_FILTER: &str = "qsheet_demo=info,qsheet_widgets=debug,warn";

/// Install a stderr subscriber filtered by [`LOG_ENV`].
///
/// ```bash
/// QSHEET_LOG=trace qsheet-demo
/// ```
pub fn init() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init()
        .map_err(|_| DemoError::Logging)
}
