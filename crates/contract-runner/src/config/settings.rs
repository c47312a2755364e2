// crates/contract-runner/src/config/settings.rs
// ============================================================================
// Module: Runner Settings
// Description: Typed runner configuration and TOML file loading.
// Purpose: Merge defaults, file values, and env overrides into one config.
// Dependencies: serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! [`RunnerConfig`] starts from defaults bound to a base URL, then absorbs an
//! optional TOML file and environment overrides. Unknown TOML keys are
//! rejected. [`RunnerConfig::validate`] runs after every layer is applied.
//!
//! ```toml
//! base_url = "https://api.example.test"
//! timeout_sec = 30
//! report_dir = "target/contract-reports"
//! seed = 42
//! concurrency = 1
//! write_report = true
//!
//! [log]
//! level = "info"
//! format = "pretty"
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::config::env::EnvOverrides;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Request timeout applied when no layer sets one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Log level applied when no layer sets one.
const DEFAULT_LOG_LEVEL: &str = "info";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration failures. All of them abort before any request is sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config file {path}: {reason}")]
    Read {
        /// File path as given.
        path: String,
        /// Underlying I/O error.
        reason: String,
    },
    /// Config file is not valid TOML for this schema.
    #[error("invalid config file {path}: {reason}")]
    Parse {
        /// File path as given.
        path: String,
        /// Parser message.
        reason: String,
    },
    /// Environment value is not valid UTF-8.
    #[error("{name} must be valid UTF-8")]
    InvalidUtf8 {
        /// Variable name.
        name: String,
    },
    /// Value is set but empty.
    #[error("{name} must not be empty")]
    Empty {
        /// Variable or key name.
        name: String,
    },
    /// Value failed validation.
    #[error("{name} {reason}")]
    InvalidValue {
        /// Variable or key name.
        name: String,
        /// Validation message.
        reason: String,
    },
    /// Base URL is unparseable or not an http(s) URL with a host.
    #[error("invalid base url '{value}': {reason}")]
    BaseUrl {
        /// Offending value.
        value: String,
        /// Validation message.
        reason: String,
    },
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human output.
    #[default]
    Pretty,
    /// Single-line human output.
    Compact,
    /// Newline-delimited JSON.
    Json,
}

impl LogFormat {
    /// Parses a format name, case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "compact" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Returns the canonical format name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Compact => "compact",
            Self::Json => "json",
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::default(),
        }
    }
}

/// Fully merged runner configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Base URL every step path is joined onto.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Report root; `None` selects the default artifact root.
    pub report_dir: Option<PathBuf>,
    /// Whether report artifacts are written.
    pub write_report: bool,
    /// Fixture seed; `None` draws one from entropy.
    pub seed: Option<u64>,
    /// Maximum scenarios in flight.
    pub concurrency: usize,
    /// Logging settings.
    pub log: LogConfig,
}

/// On-disk TOML shape. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    /// API base URL.
    base_url: Option<String>,
    /// Request timeout in whole seconds.
    timeout_sec: Option<u64>,
    /// Parent directory for run reports.
    report_dir: Option<PathBuf>,
    /// Fixture seed.
    seed: Option<u64>,
    /// Maximum scenarios in flight.
    concurrency: Option<usize>,
    /// Whether report files are written.
    write_report: Option<bool>,
    /// `[log]` table.
    log: Option<FileLogConfig>,
}

/// On-disk `[log]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileLogConfig {
    /// Filter directive.
    level: Option<String>,
    /// Output format.
    format: Option<LogFormat>,
}

impl RunnerConfig {
    /// Returns defaults bound to `base_url`.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            report_dir: None,
            write_report: true,
            seed: None,
            concurrency: 1,
            log: LogConfig::default(),
        }
    }

    /// Applies a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable or invalid.
    pub fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        self.apply_toml(&text, &path.display().to_string())
    }

    /// Applies TOML text; `origin` names the source in errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the text does not match the config schema.
    pub fn apply_toml(&mut self, text: &str, origin: &str) -> Result<(), ConfigError> {
        let file: FileConfig = toml::from_str(text).map_err(|err| ConfigError::Parse {
            path: origin.to_string(),
            reason: err.to_string(),
        })?;
        if let Some(raw) = file.base_url {
            self.base_url = parse_base_url(&raw)?;
        }
        if let Some(secs) = file.timeout_sec {
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(dir) = file.report_dir {
            self.report_dir = Some(dir);
        }
        if let Some(seed) = file.seed {
            self.seed = Some(seed);
        }
        if let Some(concurrency) = file.concurrency {
            self.concurrency = concurrency;
        }
        if let Some(write_report) = file.write_report {
            self.write_report = write_report;
        }
        if let Some(log) = file.log {
            if let Some(level) = log.level {
                self.log.level = level;
            }
            if let Some(format) = log.format {
                self.log.format = format;
            }
        }
        self.validate()
    }

    /// Applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the overridden base URL is invalid.
    pub fn apply_env(&mut self, env: EnvOverrides) -> Result<(), ConfigError> {
        if let Some(raw) = env.base_url {
            self.base_url = parse_base_url(&raw)?;
        }
        if let Some(timeout) = env.timeout {
            self.timeout = timeout;
        }
        if let Some(dir) = env.report_dir {
            self.report_dir = Some(dir);
        }
        if let Some(seed) = env.seed {
            self.seed = Some(seed);
        }
        if let Some(concurrency) = env.concurrency {
            self.concurrency = concurrency;
        }
        if let Some(level) = env.log_level {
            self.log.level = level;
        }
        if let Some(format) = env.log_format {
            self.log.format = format;
        }
        self.validate()
    }

    /// Checks cross-layer constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero timeout, zero
    /// concurrency, or a blank log level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout.is_zero() {
            return Err(invalid("timeout_sec", "must be greater than zero"));
        }
        if self.concurrency == 0 {
            return Err(invalid("concurrency", "must be greater than zero"));
        }
        if self.log.level.trim().is_empty() {
            return Err(ConfigError::Empty {
                name: "log.level".to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses and validates a base URL.
///
/// # Errors
///
/// Returns [`ConfigError::BaseUrl`] unless the value is an absolute http or
/// https URL with a host and no query or fragment.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let fail = |reason: &str| ConfigError::BaseUrl {
        value: raw.to_string(),
        reason: reason.to_string(),
    };
    let url = Url::parse(raw.trim()).map_err(|err| fail(&err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(fail("scheme must be http or https"));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(fail("host is required"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(fail("query and fragment are not allowed"));
    }
    Ok(url)
}

/// Builds an invalid-value error for the named setting.
fn invalid(name: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}
