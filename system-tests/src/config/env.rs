// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed settings for system tests.
// Purpose: Parse live-target and report overrides with strict UTF-8 handling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Values are read with strict UTF-8 enforcement; invalid or empty values are
//! errors rather than silently ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Base URL of a real company API for the live suite.
    LiveBaseUrl,
    /// Per-request timeout in seconds for the live suite.
    TimeoutSeconds,
    /// Parent directory for live run reports.
    ReportRoot,
    /// Write reports from the live suite (`true`/`false` or `1`/`0`).
    WriteReport,
}

impl SystemTestEnv {
    /// Returns the environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LiveBaseUrl => "COMPANY_CONTRACT_SYSTEM_TEST_LIVE_URL",
            Self::TimeoutSeconds => "COMPANY_CONTRACT_SYSTEM_TEST_TIMEOUT_SEC",
            Self::ReportRoot => "COMPANY_CONTRACT_SYSTEM_TEST_REPORT_ROOT",
            Self::WriteReport => "COMPANY_CONTRACT_SYSTEM_TEST_WRITE_REPORT",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Live API base URL; the live suite falls back to the public API.
    pub live_base_url: Option<String>,
    /// Per-request timeout override.
    pub timeout: Option<Duration>,
    /// Report parent directory override.
    pub report_root: Option<PathBuf>,
    /// Whether the live suite writes reports.
    pub write_report: bool,
}

impl SystemTestConfig {
    /// Loads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error when a value is not valid UTF-8, is empty, or fails
    /// validation (for example, a zero timeout or an unknown boolean).
    pub fn load() -> Result<Self, String> {
        let live_base_url = read_env_nonempty(SystemTestEnv::LiveBaseUrl.as_str())?;
        let timeout = read_env_nonempty(SystemTestEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(SystemTestEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        let report_root =
            read_env_nonempty(SystemTestEnv::ReportRoot.as_str())?.map(PathBuf::from);
        let write_report = parse_bool_env(
            SystemTestEnv::WriteReport.as_str(),
            read_env_nonempty(SystemTestEnv::WriteReport.as_str())?,
        )?;
        Ok(Self {
            live_base_url,
            timeout,
            report_root,
            write_report,
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
/// Returns an error when the variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects blank values.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

/// Parses a positive whole number of seconds.
fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, String> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("{name} must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}

/// Parses `1`, `0`, `true`, or `false`; unset means false.
fn parse_bool_env(name: &str, raw: Option<String>) -> Result<bool, String> {
    let Some(value) = raw else {
        return Ok(false);
    };
    if value.eq_ignore_ascii_case("true") || value == "1" {
        return Ok(true);
    }
    if value.eq_ignore_ascii_case("false") || value == "0" {
        return Ok(false);
    }
    Err(format!("{name} must be 1, 0, true, or false"))
}
