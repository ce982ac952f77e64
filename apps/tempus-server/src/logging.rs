//! Logging initialization.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Initializes the global tracing subscriber.
///
/// Filter precedence: `RUST_LOG`, then the CLI verbosity flags, then the
/// configured level. Safe to call more than once; later calls are no-ops.
pub fn init(config: &LoggingConfig, verbosity: u8) {
    let level = match verbosity {
        0 => config.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    if let Err(e) = result {
        tracing::debug!("tracing subscriber already initialized: {e}");
    }
}
