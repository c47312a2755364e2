// crates/company-contract/src/run.rs
// ============================================================================
// Module: Company Contract Run
// Description: Builds the catalog and executes it with reporters attached.
// Purpose: Share one run path between the CLI and system tests.
// Dependencies: contract-runner, thiserror, tracing
// ============================================================================

//! ## Overview
//! [`execute`] builds the fixture generator from the configured seed (or a
//! fresh one), selects scenarios, sends them over a [`ReqwestTransport`], and
//! attaches the log and artifact reporters. [`execute_with`] takes the
//! transport and scenarios directly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use contract_runner::ArtifactReporter;
use contract_runner::HttpTransport;
use contract_runner::LogReporter;
use contract_runner::ReportError;
use contract_runner::Reporter;
use contract_runner::ReqwestTransport;
use contract_runner::RunSummary;
use contract_runner::RunnerConfig;
use contract_runner::RunnerOptions;
use contract_runner::Scenario;
use contract_runner::ScenarioRunner;
use contract_runner::SeededFixtures;
use contract_runner::TransportError;
use contract_runner::report::RunArtifacts;
use thiserror::Error;
use tracing::info;

use crate::scenarios::CatalogError;
use crate::scenarios::catalog;
use crate::scenarios::select;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Failures that prevent a run from producing a summary.
#[derive(Debug, Error)]
pub enum RunError {
    /// Catalog construction or scenario selection failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// The HTTP client could not be built.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// A report could not be written.
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Run summary.
    pub summary: RunSummary,
    /// Report directory, when artifacts were written.
    pub report_root: Option<PathBuf>,
}

// ============================================================================
// SECTION: Execution
// ============================================================================

/// Runs the selected scenarios against the configured base URL.
///
/// # Errors
///
/// Returns [`RunError`] when the catalog, client, or reports fail. Scenario
/// failures are reported in the summary, not as errors.
pub async fn execute(config: &RunnerConfig, filter: &[String]) -> Result<RunReport, RunError> {
    let mut fixtures = config.seed.map_or_else(SeededFixtures::from_entropy, SeededFixtures::new);
    let scenarios = select(catalog(&mut fixtures)?, filter)?;
    let transport = ReqwestTransport::new(config.timeout)?;
    execute_with(Arc::new(transport), config, fixtures.seed(), &scenarios).await
}

/// Runs scenarios over the given transport with the configured reporters.
///
/// # Errors
///
/// Returns [`RunError::Report`] when a reporter fails.
pub async fn execute_with(
    transport: Arc<dyn HttpTransport>,
    config: &RunnerConfig,
    seed: u64,
    scenarios: &[Scenario],
) -> Result<RunReport, RunError> {
    let options = RunnerOptions::new(config.base_url.clone())
        .with_concurrency(config.concurrency)
        .with_seed(seed);
    let mut reporters: Vec<Box<dyn Reporter>> = vec![Box::new(LogReporter::new())];
    let report_root = if config.write_report {
        let artifacts = match &config.report_dir {
            Some(parent) => RunArtifacts::create_run(parent)?,
            None => RunArtifacts::create_default_run()?,
        };
        let root = artifacts.root().to_path_buf();
        reporters.push(Box::new(ArtifactReporter::new(artifacts)));
        Some(root)
    } else {
        None
    };
    info!(
        base_url = %config.base_url,
        seed,
        scenarios = scenarios.len(),
        timeout_ms = u64::try_from(config.timeout.as_millis()).unwrap_or(u64::MAX),
        "contract run starting"
    );
    let runner = ScenarioRunner::new(transport, options);
    let summary = runner.run_reported(scenarios, &mut reporters).await?;
    Ok(RunReport {
        summary,
        report_root,
    })
}
