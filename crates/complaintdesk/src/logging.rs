//! Process-wide logging setup.
//!
//! Library code logs through the `log` facade and opens `tracing` spans;
//! both end up in one `tracing-subscriber` registry.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::config::LoggingConfig;
use crate::error::ComplaintDeskError;

/// Builds the filter: `RUST_LOG` when set, otherwise the configured level.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Installs the global subscriber and the `log` bridge.
///
/// Fails if either is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ComplaintDeskError> {
    tracing_log::LogTracer::init().map_err(|e| ComplaintDeskError::Logging(e.to_string()))?;

    let json_layer = config
        .json
        .then(|| fmt::layer().json().with_current_span(true).with_target(true));
    let plain_layer = (!config.json).then(|| fmt::layer().compact().with_target(true));

    let subscriber = Registry::default()
        .with(env_filter(config))
        .with(json_layer)
        .with(plain_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| ComplaintDeskError::Logging(e.to_string()))
}
