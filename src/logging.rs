//! Tracing setup
//!
//! The core only emits `tracing` events; hosts that want them printed call
//! [`init_tracing`] once at start-up.

use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::error::{TrackerError, TrackerResult};

/// Environment variable that overrides `Settings::log_filter`
pub const LOG_ENV_VAR: &str = "MONEYPAL_LOG";

/// Build the filter from `MONEYPAL_LOG`, falling back to the settings value
pub fn build_filter(settings: &Settings) -> TrackerResult<EnvFilter> {
    match std::env::var(LOG_ENV_VAR) {
        Ok(directive) => EnvFilter::try_new(directive)
            .map_err(|e| TrackerError::Config(format!("Invalid {}: {}", LOG_ENV_VAR, e))),
        Err(_) => EnvFilter::try_new(&settings.log_filter)
            .map_err(|e| TrackerError::Config(format!("Invalid log_filter: {}", e))),
    }
}

/// Install a global fmt subscriber
///
/// Returns `Ok(false)` if a global subscriber was already installed.
pub fn init_tracing(settings: &Settings) -> TrackerResult<bool> {
    let filter = build_filter(settings)?;
    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok())
}
