// crates/contract-runner/src/runtime/runner.rs
// ============================================================================
// Module: Scenario Runner
// Description: Executes scenarios step by step against a base URL.
// Purpose: Thread captured identifiers, abort on first failure, and report.
// Dependencies: tokio, tracing, time, url
// ============================================================================

//! ## Overview
//! [`ScenarioRunner`] executes each scenario with a fresh
//! [`ScenarioContext`]. Within a scenario every step awaits its response
//! before the next one is built. Across scenarios the runner is sequential by
//! default; with `concurrency > 1` scenarios run as tokio tasks bounded by a
//! semaphore. Outcomes are always delivered to reporters in declaration order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Instant;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::sync::Semaphore;
use tracing::Instrument;
use tracing::debug;
use tracing::info;
use tracing::info_span;
use tracing::warn;
use url::Url;

use crate::core::FailureKind;
use crate::core::RunSummary;
use crate::core::RunTotals;
use crate::core::Scenario;
use crate::core::ScenarioContext;
use crate::core::ScenarioOutcome;
use crate::core::Step;
use crate::core::StepRecord;
use crate::core::StepStatus;
use crate::interfaces::HttpRequest;
use crate::interfaces::HttpTransport;
use crate::interfaces::ReportError;
use crate::interfaces::Reporter;
use crate::runtime::assertions::ResponseBody;
use crate::runtime::assertions::apply_captures;
use crate::runtime::assertions::check_assertions;
use crate::runtime::assertions::log_fields;
use crate::runtime::failure::StepFailure;

// ============================================================================
// SECTION: Options
// ============================================================================

/// Runner settings that apply to every scenario of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerOptions {
    /// Base URL prepended to every step path.
    pub base_url: Url,
    /// Maximum scenarios in flight; values below 2 run sequentially.
    pub concurrency: usize,
    /// Fixture seed recorded in the run summary.
    pub seed: Option<u64>,
}

impl RunnerOptions {
    /// Creates sequential options for a base URL.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            concurrency: 1,
            seed: None,
        }
    }

    /// Sets the concurrency bound.
    #[must_use]
    pub const fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Records the fixture seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Executes scenarios over an [`HttpTransport`].
#[derive(Clone)]
pub struct ScenarioRunner {
    /// Transport shared by every scenario.
    transport: Arc<dyn HttpTransport>,
    /// Run-wide options.
    options: RunnerOptions,
}

impl ScenarioRunner {
    /// Creates a runner.
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>, options: RunnerOptions) -> Self {
        Self {
            transport,
            options,
        }
    }

    /// Returns the run options.
    #[must_use]
    pub const fn options(&self) -> &RunnerOptions {
        &self.options
    }

    /// Executes one scenario with a fresh context.
    pub async fn run_scenario(&self, scenario: &Scenario) -> ScenarioOutcome {
        execute_scenario(self.transport.as_ref(), &self.options.base_url, scenario).await
    }

    /// Executes scenarios and returns the summary without reporting.
    pub async fn run_all(&self, scenarios: &[Scenario]) -> RunSummary {
        let started_at = now_rfc3339();
        let started = Instant::now();
        let outcomes = self.run_ordered(scenarios, &mut |_: &ScenarioOutcome| {}).await;
        self.summarize(outcomes, started_at, started)
    }

    /// Executes scenarios, notifying reporters as outcomes become available.
    ///
    /// Every reporter receives `run_finished` even if an earlier one fails;
    /// the first error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when a reporter fails to emit the run report.
    pub async fn run_reported(
        &self,
        scenarios: &[Scenario],
        reporters: &mut [Box<dyn Reporter>],
    ) -> Result<RunSummary, ReportError> {
        let started_at = now_rfc3339();
        let started = Instant::now();
        let outcomes = self
            .run_ordered(scenarios, &mut |outcome: &ScenarioOutcome| {
                for reporter in reporters.iter_mut() {
                    reporter.scenario_finished(outcome);
                }
            })
            .await;
        let summary = self.summarize(outcomes, started_at, started);
        let mut first_error = None;
        for reporter in reporters.iter_mut() {
            if let Err(err) = reporter.run_finished(&summary) {
                warn!(error = %err, "reporter failed");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(summary), Err)
    }

    /// Runs scenarios and invokes `on_finished` in declaration order.
    async fn run_ordered(
        &self,
        scenarios: &[Scenario],
        on_finished: &mut (dyn FnMut(&ScenarioOutcome) + Send),
    ) -> Vec<ScenarioOutcome> {
        let mut outcomes = Vec::with_capacity(scenarios.len());
        if self.options.concurrency < 2 {
            for scenario in scenarios {
                let outcome = self.run_scenario(scenario).await;
                on_finished(&outcome);
                outcomes.push(outcome);
            }
            return outcomes;
        }

        let semaphore = Arc::new(Semaphore::new(self.options.concurrency));
        let handles: Vec<_> = scenarios
            .iter()
            .map(|scenario| {
                let transport = Arc::clone(&self.transport);
                let base_url = self.options.base_url.clone();
                let scenario = scenario.clone();
                let semaphore = Arc::clone(&semaphore);
                tokio::spawn(async move {
                    let _permit = semaphore.acquire_owned().await.ok();
                    execute_scenario(transport.as_ref(), &base_url, &scenario).await
                })
            })
            .collect();
        for (scenario, handle) in scenarios.iter().zip(handles) {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(err) => aborted_outcome(scenario, &format!("scenario task aborted: {err}")),
            };
            on_finished(&outcome);
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Builds the run summary.
    fn summarize(
        &self,
        outcomes: Vec<ScenarioOutcome>,
        started_at: String,
        started: Instant,
    ) -> RunSummary {
        let totals = RunTotals::from_outcomes(&outcomes);
        info!(
            scenarios_passed = totals.scenarios_passed,
            scenarios_failed = totals.scenarios_failed,
            steps_skipped = totals.steps_skipped,
            "run finished"
        );
        RunSummary {
            base_url: self.options.base_url.to_string(),
            seed: self.options.seed,
            started_at,
            ended_at: now_rfc3339(),
            duration_ms: elapsed_ms(started),
            scenarios: outcomes,
            totals,
        }
    }
}

// ============================================================================
// SECTION: Scenario Execution
// ============================================================================

/// Executes one scenario inside a tracing span.
async fn execute_scenario(
    transport: &dyn HttpTransport,
    base_url: &Url,
    scenario: &Scenario,
) -> ScenarioOutcome {
    let span = info_span!("scenario", id = %scenario.id());
    async {
        let started = Instant::now();
        let mut context = ScenarioContext::new();
        let mut steps = Vec::with_capacity(scenario.steps().len());
        let mut aborted = false;
        info!(description = scenario.description(), "scenario started");
        for step in scenario.steps() {
            if aborted {
                steps.push(skipped_record(step));
                continue;
            }
            let record = execute_step(transport, base_url, step, &mut context).await;
            if let StepStatus::Failed {
                kind,
                message,
            } = &record.status
            {
                warn!(step = step.name(), kind = kind.as_str(), error = %message, "step failed");
                aborted = true;
            }
            steps.push(record);
        }
        let outcome = ScenarioOutcome {
            scenario_id: scenario.id().clone(),
            description: scenario.description().to_string(),
            steps,
            captures: context.snapshot(),
            duration_ms: elapsed_ms(started),
        };
        info!(passed = outcome.passed(), duration_ms = outcome.duration_ms, "scenario finished");
        outcome
    }
    .instrument(span)
    .await
}

/// Executes one step and records its result.
async fn execute_step(
    transport: &dyn HttpTransport,
    base_url: &Url,
    step: &Step,
    context: &mut ScenarioContext,
) -> StepRecord {
    let started = Instant::now();
    let mut record = StepRecord {
        name: step.name().to_string(),
        method: step.method(),
        path: step.path().to_string(),
        url: None,
        expected_status: step.expected_status(),
        actual_status: None,
        duration_ms: 0,
        status: StepStatus::Passed,
    };
    let result = run_step(transport, base_url, step, context, &mut record).await;
    record.duration_ms = elapsed_ms(started);
    if let Err(failure) = result {
        record.status = StepStatus::Failed {
            kind: failure.kind(),
            message: failure.to_string(),
        };
    }
    record
}

/// Sends the request and applies status, assertion, and capture checks.
async fn run_step(
    transport: &dyn HttpTransport,
    base_url: &Url,
    step: &Step,
    context: &mut ScenarioContext,
    record: &mut StepRecord,
) -> Result<(), StepFailure> {
    let request = build_request(base_url, step, context)?;
    record.url = Some(request.url.to_string());
    debug!(step = step.name(), method = %request.method, url = %request.url, "sending request");
    let response = transport.send(request).await?;
    record.actual_status = Some(response.status);
    info!(
        step = step.name(),
        method = %step.method(),
        status = response.status,
        expected = step.expected_status(),
        "response received"
    );
    if response.status != step.expected_status() {
        return Err(StepFailure::status_mismatch(
            step.expected_status(),
            response.status,
            &response.body,
        ));
    }
    let mut body = ResponseBody::new(&response);
    check_assertions(step.assertions(), &mut body, context)?;
    apply_captures(step.captures(), &mut body, context)?;
    log_fields(step.logged_fields(), &mut body);
    Ok(())
}

/// Resolves a step into a concrete request using the scenario context.
///
/// # Errors
///
/// Returns [`StepFailure`] when a placeholder is unbound or the URL is invalid.
pub fn build_request(
    base_url: &Url,
    step: &Step,
    context: &ScenarioContext,
) -> Result<HttpRequest, StepFailure> {
    let path = context.resolve_path(step.path())?;
    let url = join_url(base_url, &path)?;
    let body = step.body().map(|body| context.resolve_body(body)).transpose()?;
    Ok(HttpRequest {
        method: step.method(),
        url,
        body,
    })
}

/// Appends a path to the base URL, keeping any base path prefix.
///
/// # Errors
///
/// Returns [`StepFailure::InvalidUrl`] when the joined URL does not parse.
pub fn join_url(base_url: &Url, path: &str) -> Result<Url, StepFailure> {
    let raw =
        format!("{}/{}", base_url.as_str().trim_end_matches('/'), path.trim_start_matches('/'));
    Url::parse(&raw).map_err(|err| StepFailure::InvalidUrl {
        url: raw.clone(),
        reason: err.to_string(),
    })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Record for a step that did not run.
fn skipped_record(step: &Step) -> StepRecord {
    StepRecord {
        name: step.name().to_string(),
        method: step.method(),
        path: step.path().to_string(),
        url: None,
        expected_status: step.expected_status(),
        actual_status: None,
        duration_ms: 0,
        status: StepStatus::Skipped,
    }
}

/// Outcome for a scenario whose task ended without producing a result.
fn aborted_outcome(scenario: &Scenario, message: &str) -> ScenarioOutcome {
    let steps = scenario
        .steps()
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let mut record = skipped_record(step);
            if index == 0 {
                record.status = StepStatus::Failed {
                    kind: FailureKind::Transport,
                    message: message.to_string(),
                };
            }
            record
        })
        .collect();
    ScenarioOutcome {
        scenario_id: scenario.id().clone(),
        description: scenario.description().to_string(),
        steps,
        captures: std::collections::BTreeMap::new(),
        duration_ms: 0,
    }
}

/// Returns milliseconds since `started`, saturating.
fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Returns the current UTC time formatted as RFC 3339.
fn now_rfc3339() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default()
}
