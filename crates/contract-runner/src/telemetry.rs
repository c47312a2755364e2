// crates/contract-runner/src/telemetry.rs
// ============================================================================
// Module: Telemetry
// Description: Global tracing subscriber setup for contract runs.
// Purpose: Route runner events to stderr in the configured format.
// Dependencies: thiserror, tracing-subscriber
// ============================================================================

//! ## Overview
//! Installs a registry with an [`EnvFilter`] and one fmt layer. `RUST_LOG`
//! takes priority over the configured level. Events go to stderr so stdout
//! stays free for command output.

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LogConfig;
use crate::config::LogFormat;

/// Tracing setup failures.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The level directive did not parse.
    #[error("invalid log level '{level}': {reason}")]
    Filter {
        /// Offending directive.
        level: String,
        /// Parser message.
        reason: String,
    },
    /// A global subscriber is already installed.
    #[error("failed to initialize {format} tracing subscriber: {reason}")]
    Init {
        /// Requested format.
        format: &'static str,
        /// Underlying error.
        reason: String,
    },
}

/// Builds the filter: `RUST_LOG` when set, otherwise `level`.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] when `level` is not a valid directive.
pub fn build_filter(level: &str) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|err| TelemetryError::Filter {
        level: level.to_string(),
        reason: err.to_string(),
    })
}

/// Installs the global tracing subscriber.
///
/// Call once per process, before any scenario runs.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the level is invalid or a subscriber is
/// already installed.
pub fn init_tracing(config: &LogConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(&config.level)?;
    let registry = tracing_subscriber::registry().with(filter);
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false);
    let result = match config.format {
        LogFormat::Json => registry.with(layer.json()).try_init(),
        LogFormat::Pretty => registry.with(layer.pretty()).try_init(),
        LogFormat::Compact => registry.with(layer.compact()).try_init(),
    };
    result.map_err(|err| TelemetryError::Init {
        format: config.format.as_str(),
        reason: err.to_string(),
    })
}
