// system-tests/src/config/mod.rs
// ============================================================================
// Module: System Test Configuration
// Description: Typed environment settings for system tests.
// Dependencies: std
// ============================================================================

//! ## Overview
//! System-test settings come from `COMPANY_CONTRACT_SYSTEM_TEST_*` variables
//! and are parsed once into [`SystemTestConfig`].

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::SystemTestConfig;
pub use env::SystemTestEnv;
pub use env::read_env_strict;
