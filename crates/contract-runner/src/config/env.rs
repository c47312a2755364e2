// crates/contract-runner/src/config/env.rs
// ============================================================================
// Module: Runner Environment
// Description: Environment-backed overrides for contract runs.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed, as do empty values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use crate::config::settings::ConfigError;
use crate::config::settings::LogFormat;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for runner configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerEnv {
    /// Base URL of the API under test.
    BaseUrl,
    /// Request timeout in seconds (positive integer).
    TimeoutSeconds,
    /// Directory receiving run reports.
    ReportDir,
    /// Fixture seed (unsigned integer).
    Seed,
    /// Maximum scenarios in flight (positive integer).
    Concurrency,
    /// Default log level when `RUST_LOG` is unset.
    LogLevel,
    /// Log output format (`pretty`, `compact`, `json`).
    LogFormat,
}

impl RunnerEnv {
    /// Every key, in documentation order.
    pub const ALL: [Self; 7] = [
        Self::BaseUrl,
        Self::TimeoutSeconds,
        Self::ReportDir,
        Self::Seed,
        Self::Concurrency,
        Self::LogLevel,
        Self::LogFormat,
    ];

    /// Returns the variable suffix appended to the caller's prefix.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::BaseUrl => "BASE_URL",
            Self::TimeoutSeconds => "TIMEOUT_SEC",
            Self::ReportDir => "REPORT_DIR",
            Self::Seed => "SEED",
            Self::Concurrency => "CONCURRENCY",
            Self::LogLevel => "LOG_LEVEL",
            Self::LogFormat => "LOG_FORMAT",
        }
    }

    /// Returns the full variable name, e.g. `COMPANY_CONTRACT_BASE_URL`.
    #[must_use]
    pub fn key(self, prefix: &str) -> String {
        format!("{prefix}_{}", self.suffix())
    }
}

// ============================================================================
// SECTION: Override Types
// ============================================================================

/// Typed overrides derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvOverrides {
    /// Base URL override (unparsed; validated when applied).
    pub base_url: Option<String>,
    /// Timeout override.
    pub timeout: Option<Duration>,
    /// Report directory override.
    pub report_dir: Option<PathBuf>,
    /// Fixture seed override.
    pub seed: Option<u64>,
    /// Concurrency override.
    pub concurrency: Option<usize>,
    /// Log level override.
    pub log_level: Option<String>,
    /// Log format override.
    pub log_format: Option<LogFormat>,
}

impl EnvOverrides {
    /// Loads overrides from the process environment using `prefix`.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, a zero timeout).
    pub fn load(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_lookup(prefix, read_env_strict)
    }

    /// Loads overrides through a lookup function keyed by full variable name.
    ///
    /// # Errors
    ///
    /// Returns an error when a looked-up value is empty or fails validation.
    pub fn from_lookup<F>(prefix: &str, mut lookup: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Result<Option<String>, ConfigError>,
    {
        let mut read = |key: RunnerEnv| {
            let name = key.key(prefix);
            let value = nonempty(&name, lookup(&name)?)?;
            Ok::<_, ConfigError>(value.map(|value| (name, value)))
        };
        let base_url = read(RunnerEnv::BaseUrl)?.map(|(_, value)| value);
        let timeout = read(RunnerEnv::TimeoutSeconds)?
            .map(|(name, value)| parse_timeout_seconds(&name, &value))
            .transpose()?;
        let report_dir = read(RunnerEnv::ReportDir)?.map(|(_, value)| PathBuf::from(value));
        let seed =
            read(RunnerEnv::Seed)?.map(|(name, value)| parse_seed(&name, &value)).transpose()?;
        let concurrency = read(RunnerEnv::Concurrency)?
            .map(|(name, value)| parse_positive(&name, &value))
            .transpose()?;
        let log_level = read(RunnerEnv::LogLevel)?.map(|(_, value)| value);
        let log_format = read(RunnerEnv::LogFormat)?
            .map(|(name, value)| {
                LogFormat::parse(&value).ok_or(ConfigError::InvalidValue {
                    name,
                    reason: "must be pretty, compact, or json".to_string(),
                })
            })
            .transpose()?;
        Ok(Self {
            base_url,
            timeout,
            report_dir,
            seed,
            concurrency,
            log_level,
            log_format,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| ConfigError::InvalidUtf8 {
            name: name.to_string(),
        })
    })
}

/// Rejects values that are set but empty or whitespace.
fn nonempty(name: &str, value: Option<String>) -> Result<Option<String>, ConfigError> {
    match value {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty {
            name: name.to_string(),
        }),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

/// Parses a positive timeout value in whole seconds.
///
/// # Errors
///
/// Returns an error when the value is non-numeric or zero.
pub(crate) fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, ConfigError> {
    let secs = parse_positive(name, raw)?;
    Ok(Duration::from_secs(u64::try_from(secs).unwrap_or(u64::MAX)))
}

/// Parses a positive integer.
fn parse_positive(name: &str, raw: &str) -> Result<usize, ConfigError> {
    let value: usize = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        reason: "must be a positive integer".to_string(),
    })?;
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            name: name.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}

/// Parses an unsigned 64-bit seed.
fn parse_seed(name: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        reason: "must be an unsigned 64-bit integer".to_string(),
    })
}
