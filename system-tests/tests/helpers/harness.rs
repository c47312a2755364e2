// system-tests/tests/helpers/harness.rs
// ============================================================================
// Module: Run Harness
// Description: Builds run configs pointed at a stub and executes the catalog.
// Dependencies: company-contract, contract-runner
// ============================================================================

use std::path::Path;
use std::time::Duration;

use company_contract::RunReport;
use company_contract::execute;
use contract_runner::RunnerConfig;
use contract_runner::ScenarioOutcome;
use contract_runner::config::parse_base_url;

/// Seed used by suites that compare runs.
pub const FIXED_SEED: u64 = 0x00c0_ffee;

/// Sequential config against `base_url` that writes no reports.
pub fn stub_config(base_url: &str) -> Result<RunnerConfig, String> {
    let mut config =
        RunnerConfig::new(parse_base_url(base_url).map_err(|err| err.to_string())?);
    config.timeout = Duration::from_secs(5);
    config.seed = Some(FIXED_SEED);
    config.write_report = false;
    Ok(config)
}

/// Same as [`stub_config`] but writing reports under `parent`.
pub fn reporting_config(base_url: &str, parent: &Path) -> Result<RunnerConfig, String> {
    let mut config = stub_config(base_url)?;
    config.write_report = true;
    config.report_dir = Some(parent.to_path_buf());
    Ok(config)
}

/// Runs the scenarios named in `ids`, or the whole catalog when empty.
pub async fn run(config: &RunnerConfig, ids: &[&str]) -> Result<RunReport, String> {
    let filter: Vec<String> = ids.iter().map(|id| (*id).to_string()).collect();
    execute(config, &filter).await.map_err(|err| err.to_string())
}

/// Finds an outcome by scenario id.
pub fn outcome<'a>(report: &'a RunReport, id: &str) -> Option<&'a ScenarioOutcome> {
    report.summary.scenarios.iter().find(|outcome| outcome.scenario_id.as_str() == id)
}
