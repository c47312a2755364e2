// crates/contract-runner/src/core/mod.rs
// ============================================================================
// Module: Contract Runner Core
// Description: Scenario model, per-scenario context, and run outcomes.
// Purpose: Provide the transport-agnostic data model used by the runtime.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Core types describe what a contract run does ([`Scenario`], [`Step`]),
//! what it remembers while running ([`ScenarioContext`]), and what it produced
//! ([`ScenarioOutcome`], [`RunSummary`]). Nothing here performs I/O.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod context;
pub mod identifiers;
pub mod outcome;
pub mod scenario;
pub mod template;

#[cfg(test)]
mod template_tests;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use context::ResolveError;
pub use context::ScenarioContext;
pub use identifiers::CaptureName;
pub use identifiers::FieldPath;
pub use identifiers::ScenarioId;
pub use outcome::FailureKind;
pub use outcome::RunSummary;
pub use outcome::RunTotals;
pub use outcome::ScenarioOutcome;
pub use outcome::StepRecord;
pub use outcome::StepStatus;
pub use scenario::BodyAssertion;
pub use scenario::Capture;
pub use scenario::HttpMethod;
pub use scenario::Scenario;
pub use scenario::ScenarioBuilder;
pub use scenario::ScenarioError;
pub use scenario::Step;
pub use template::TemplateError;
