//! # Logging
//!
//! tracing-subscriber setup for the `aksval` front-end.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::config::ValidatorConfig;

/// Install the global subscriber
///
/// `RUST_LOG` wins when set; otherwise the configured level applies to this
/// crate only. Logs go to stderr so stdout stays clean for results.
///
/// # Errors
/// Fails when a global subscriber is already installed.
pub fn init_logging(config: &ValidatorConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "aksval={level},aks_validators={level}",
            level = config.log_level.to_lowercase()
        ))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.json_logs() {
        builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;
    } else {
        builder
            .with_ansi(config.log_enable_color)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;
    }
    Ok(())
}
