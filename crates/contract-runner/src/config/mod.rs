// crates/contract-runner/src/config/mod.rs
// ============================================================================
// Module: Runner Configuration
// Description: Centralized configuration for contract runs.
// Purpose: Provide typed settings layered from defaults, files, and env.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then `CONTRACT_RUNNER_*` environment variables. Callers (the CLI) apply
//! their own flags last. Every layer fails closed on invalid values.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;
mod settings;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::EnvOverrides;
pub use env::RunnerEnv;
pub use env::read_env_strict;
pub use settings::ConfigError;
pub use settings::DEFAULT_TIMEOUT;
pub use settings::LogConfig;
pub use settings::LogFormat;
pub use settings::RunnerConfig;
pub use settings::parse_base_url;
