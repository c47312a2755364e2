// crates/contract-runner/src/runtime/mod.rs
// ============================================================================
// Module: Contract Runner Runtime
// Description: Scenario execution, response checks, transport, and fixtures.
// Purpose: Turn declared scenarios into HTTP traffic and outcomes.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The runtime drives [`ScenarioRunner`] over an
//! [`crate::interfaces::HttpTransport`], checks responses, and records
//! outcomes. [`ReqwestTransport`] and [`SeededFixtures`] are the production
//! implementations of the transport and fixture seams.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod assertions;
pub mod failure;
pub mod fixtures;
pub mod runner;
pub mod transport;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use failure::AssertionFailure;
pub use failure::CaptureFailure;
pub use failure::StepFailure;
pub use fixtures::SeededFixtures;
pub use runner::RunnerOptions;
pub use runner::ScenarioRunner;
pub use runner::build_request;
pub use runner::join_url;
pub use transport::ReqwestTransport;
