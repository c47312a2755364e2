// crates/company-contract/src/config.rs
// ============================================================================
// Module: Company Contract Configuration
// Description: Defaults and layered loading for company contract runs.
// Purpose: Bind the runner config to the company API and its env prefix.
// Dependencies: contract-runner
// ============================================================================

//! ## Overview
//! Layers: defaults (public company API, 30s timeout) then the optional TOML
//! file then `COMPANY_CONTRACT_*` environment variables. The CLI applies its
//! flags on top of the result.

use std::path::Path;

use contract_runner::RunnerConfig;
use contract_runner::config::ConfigError;
use contract_runner::config::EnvOverrides;
use contract_runner::config::parse_base_url;

/// Base URL of the public company API.
pub const DEFAULT_BASE_URL: &str = "https://api-desafio-qa.onrender.com";

/// Prefix of every environment override, e.g. `COMPANY_CONTRACT_TIMEOUT_SEC`.
pub const ENV_PREFIX: &str = "COMPANY_CONTRACT";

/// Returns the built-in defaults.
///
/// # Errors
///
/// Returns [`ConfigError::BaseUrl`] if the default URL fails validation.
pub fn default_config() -> Result<RunnerConfig, ConfigError> {
    Ok(RunnerConfig::new(parse_base_url(DEFAULT_BASE_URL)?))
}

/// Loads defaults, the optional file, and the process environment.
///
/// # Errors
///
/// Returns [`ConfigError`] when any layer is invalid.
pub fn load_config(file: Option<&Path>) -> Result<RunnerConfig, ConfigError> {
    load_config_with(file, EnvOverrides::load(ENV_PREFIX)?)
}

/// Loads defaults and the optional file, then applies the given overrides.
///
/// # Errors
///
/// Returns [`ConfigError`] when any layer is invalid.
pub fn load_config_with(
    file: Option<&Path>,
    env: EnvOverrides,
) -> Result<RunnerConfig, ConfigError> {
    let mut config = default_config()?;
    if let Some(path) = file {
        config.apply_file(path)?;
    }
    config.apply_env(env)?;
    Ok(config)
}
