// crates/contract-runner/src/core/outcome.rs
// ============================================================================
// Module: Run Outcomes
// Description: Per-step, per-scenario, and per-run result records.
// Purpose: Provide serializable results consumed by reporters.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Outcomes are plain data. Failures are flattened into a [`FailureKind`] and
//! a message so reports stay stable even when error types evolve.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ScenarioId;
use crate::core::scenario::HttpMethod;

// ============================================================================
// SECTION: Step Records
// ============================================================================

/// Failure classification used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Response status differed from the expected status.
    Status,
    /// A body assertion failed.
    Assertion,
    /// A capture could not read its field.
    Capture,
    /// The request did not complete within the configured timeout.
    Timeout,
    /// The request failed for a network or protocol reason.
    Transport,
    /// The request could not be built from the scenario context.
    Resolve,
}

impl FailureKind {
    /// Returns a stable label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Assertion => "assertion",
            Self::Capture => "capture",
            Self::Timeout => "timeout",
            Self::Transport => "transport",
            Self::Resolve => "resolve",
        }
    }
}

/// Result of a single step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum StepStatus {
    /// Every check passed.
    Passed,
    /// The step failed and aborted its scenario.
    Failed {
        /// Failure classification.
        kind: FailureKind,
        /// Human-readable failure message.
        message: String,
    },
    /// The step did not run because an earlier step failed.
    Skipped,
}

/// Record of one step execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Step name.
    pub name: String,
    /// Request method.
    pub method: HttpMethod,
    /// Path template as declared.
    pub path: String,
    /// Resolved request URL, absent when the step was skipped or could not resolve.
    pub url: Option<String>,
    /// Expected response status.
    pub expected_status: u16,
    /// Received response status, absent when no response arrived.
    pub actual_status: Option<u16>,
    /// Elapsed time in milliseconds.
    pub duration_ms: u64,
    /// Step result.
    pub status: StepStatus,
}

impl StepRecord {
    /// Returns true when the step passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self.status, StepStatus::Passed)
    }

    /// Returns true when the step failed.
    #[must_use]
    pub const fn failed(&self) -> bool {
        matches!(self.status, StepStatus::Failed { .. })
    }

    /// Returns true when the step was skipped.
    #[must_use]
    pub const fn skipped(&self) -> bool {
        matches!(self.status, StepStatus::Skipped)
    }
}

// ============================================================================
// SECTION: Scenario Outcome
// ============================================================================

/// Result of one scenario execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Scenario identifier.
    pub scenario_id: ScenarioId,
    /// Scenario description.
    pub description: String,
    /// One record per declared step, in order.
    pub steps: Vec<StepRecord>,
    /// Values captured before the scenario ended.
    pub captures: BTreeMap<String, String>,
    /// Elapsed time in milliseconds.
    pub duration_ms: u64,
}

impl ScenarioOutcome {
    /// Returns true when every step passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.steps.iter().all(StepRecord::passed)
    }

    /// Returns the failing step, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&StepRecord> {
        self.steps.iter().find(|step| step.failed())
    }
}

// ============================================================================
// SECTION: Run Summary
// ============================================================================

/// Aggregate counters for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTotals {
    /// Scenarios whose steps all passed.
    pub scenarios_passed: usize,
    /// Scenarios with a failed step.
    pub scenarios_failed: usize,
    /// Steps that passed.
    pub steps_passed: usize,
    /// Steps that failed.
    pub steps_failed: usize,
    /// Steps skipped after a failure.
    pub steps_skipped: usize,
}

impl RunTotals {
    /// Computes totals from scenario outcomes.
    #[must_use]
    pub fn from_outcomes(outcomes: &[ScenarioOutcome]) -> Self {
        let mut totals = Self::default();
        for outcome in outcomes {
            if outcome.passed() {
                totals.scenarios_passed += 1;
            } else {
                totals.scenarios_failed += 1;
            }
            for step in &outcome.steps {
                match step.status {
                    StepStatus::Passed => totals.steps_passed += 1,
                    StepStatus::Failed { .. } => totals.steps_failed += 1,
                    StepStatus::Skipped => totals.steps_skipped += 1,
                }
            }
        }
        totals
    }
}

/// Result of a full run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Base URL every request was sent to.
    pub base_url: String,
    /// Fixture seed used to build the scenarios, when known.
    pub seed: Option<u64>,
    /// Run start time (RFC 3339).
    pub started_at: String,
    /// Run end time (RFC 3339).
    pub ended_at: String,
    /// Elapsed time in milliseconds.
    pub duration_ms: u64,
    /// Scenario outcomes in declaration order.
    pub scenarios: Vec<ScenarioOutcome>,
    /// Aggregate counters.
    pub totals: RunTotals,
}

impl RunSummary {
    /// Returns true when every scenario passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.totals.scenarios_failed == 0
    }
}
