// crates/contract-runner/src/report/log.rs
// ============================================================================
// Module: Log Reporter
// Description: Console reporter emitting one tracing event per scenario.
// Purpose: Give a readable pass/fail line per scenario and a run total.
// Dependencies: tracing
// ============================================================================

//! Console reporter emitting one tracing event per scenario.

use tracing::info;
use tracing::warn;

use crate::core::RunSummary;
use crate::core::ScenarioOutcome;
use crate::core::StepStatus;
use crate::interfaces::ReportError;
use crate::interfaces::Reporter;

/// Reporter writing scenario results to the tracing subscriber.
#[derive(Debug, Default)]
pub struct LogReporter;

impl LogReporter {
    /// Creates a log reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reporter for LogReporter {
    fn scenario_finished(&mut self, outcome: &ScenarioOutcome) {
        let Some(failed) = outcome.failure() else {
            info!(
                scenario = %outcome.scenario_id,
                steps = outcome.steps.len(),
                duration_ms = outcome.duration_ms,
                "PASS {}",
                outcome.description
            );
            return;
        };
        let reason = match &failed.status {
            StepStatus::Failed {
                message, ..
            } => message.as_str(),
            StepStatus::Passed | StepStatus::Skipped => "",
        };
        warn!(
            scenario = %outcome.scenario_id,
            step = %failed.name,
            reason,
            "FAIL {}",
            outcome.description
        );
    }

    fn run_finished(&mut self, summary: &RunSummary) -> Result<(), ReportError> {
        let totals = summary.totals;
        info!(
            base_url = %summary.base_url,
            seed = summary.seed,
            passed = totals.scenarios_passed,
            failed = totals.scenarios_failed,
            steps_passed = totals.steps_passed,
            steps_failed = totals.steps_failed,
            steps_skipped = totals.steps_skipped,
            duration_ms = summary.duration_ms,
            "contract run complete"
        );
        Ok(())
    }
}
