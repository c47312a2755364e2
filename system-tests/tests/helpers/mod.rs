// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Company API stub and run harness shared by the suites.
// Dependencies: axum, company-contract, contract-runner
// ============================================================================

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod company_stub;
pub mod harness;
