// crates/contract-runner/src/lib.rs
// ============================================================================
// Module: Contract Runner Library
// Description: Sequential HTTP scenario runner for API contract suites.
// Purpose: Execute dependent HTTP steps, thread captured identifiers, and report.
// Dependencies: reqwest, serde, thiserror, tokio, tracing
// ============================================================================

//! ## Overview
//! Contract Runner executes [`Scenario`] values against a fixed base URL. A
//! scenario is an ordered list of [`Step`] values; identifiers captured from an
//! earlier response are substituted into later paths and bodies through a
//! per-scenario [`ScenarioContext`].
//! Invariants:
//! - Steps within a scenario run strictly in order and never concurrently.
//! - The first failing step aborts its scenario; remaining steps are skipped.
//! - Captured identifiers never leak across scenarios.
//! - Requests are never retried; a single timeout applies to every request.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod core;
pub mod interfaces;
pub mod report;
pub mod runtime;
pub mod telemetry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::LogFormat;
pub use config::RunnerConfig;
pub use core::BodyAssertion;
pub use core::Capture;
pub use core::CaptureName;
pub use core::FailureKind;
pub use core::FieldPath;
pub use core::HttpMethod;
pub use core::ResolveError;
pub use core::RunSummary;
pub use core::RunTotals;
pub use core::Scenario;
pub use core::ScenarioBuilder;
pub use core::ScenarioContext;
pub use core::ScenarioError;
pub use core::ScenarioId;
pub use core::ScenarioOutcome;
pub use core::Step;
pub use core::StepRecord;
pub use core::StepStatus;
pub use core::TemplateError;
pub use interfaces::FixtureGenerator;
pub use interfaces::HttpRequest;
pub use interfaces::HttpResponse;
pub use interfaces::HttpTransport;
pub use interfaces::ReportError;
pub use interfaces::Reporter;
pub use interfaces::TransportError;
pub use report::ArtifactReporter;
pub use report::LogReporter;
pub use runtime::ReqwestTransport;
pub use runtime::RunnerOptions;
pub use runtime::ScenarioRunner;
pub use runtime::SeededFixtures;
pub use runtime::StepFailure;
