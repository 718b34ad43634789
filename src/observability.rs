//! Tracing setup for applications embedding the analytics core

use crate::config::ObservabilityConfig;
use crate::error::{AnalyticsError, AnalyticsResult};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the log filter: `RUST_LOG` when set, otherwise the configured level
pub fn env_filter(config: &ObservabilityConfig) -> AnalyticsResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| {
            AnalyticsError::Configuration(format!(
                "Invalid log level '{}': {}",
                config.log_level, e
            ))
        }),
    }
}

/// Install a global subscriber with plain or JSON output
///
/// Fails instead of panicking when a global subscriber is already set.
pub fn init_tracing(config: &ObservabilityConfig) -> AnalyticsResult<()> {
    let filter = env_filter(config)?;

    let json_layer = config
        .json_logs
        .then(|| tracing_subscriber::fmt::layer().json());
    let plain_layer = (!config.json_logs).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(plain_layer)
        .try_init()
        .map_err(|e| AnalyticsError::Configuration(format!("Failed to install tracing subscriber: {}", e)))?;

    tracing::debug!(
        log_level = %config.log_level,
        json_logs = config.json_logs,
        "Tracing initialized"
    );
    Ok(())
}
