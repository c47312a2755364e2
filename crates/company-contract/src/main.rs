// crates/company-contract/src/main.rs
// ============================================================================
// Module: Company Contract CLI Entry Point
// Description: Command dispatcher for company contract runs.
// Purpose: Run or list the company scenarios with layered configuration.
// Dependencies: clap, company-contract, contract-runner, tokio
// ============================================================================

//! ## Overview
//! `company-contract run` executes the catalog and exits 0 when every
//! scenario passed, 1 when any failed, and 2 on configuration or usage
//! errors. `company-contract list` prints the scenario ids.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use company_contract::RunError;
use company_contract::catalog;
use company_contract::load_config;
use contract_runner::LogFormat;
use contract_runner::RunSummary;
use contract_runner::RunnerConfig;
use contract_runner::SeededFixtures;
use contract_runner::config::ConfigError;
use contract_runner::config::parse_base_url;
use contract_runner::telemetry::init_tracing;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "company-contract", version, about = "Contract checks for the company API")]
struct Cli {
    /// Default log level when `RUST_LOG` is unset.
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,
    /// Log output format.
    #[arg(long, global = true, value_name = "FORMAT", value_parser = ["pretty", "compact", "json"])]
    log_format: Option<String>,
    /// Selected subcommand.
    #[command(subcommand)]
    command: Command,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Run contract scenarios against the API.
    Run(RunArgs),
    /// List scenario ids and descriptions.
    List,
}

/// Flags for `run`, applied over file and environment settings.
#[derive(Args, Debug, Default)]
struct RunArgs {
    /// TOML config file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Base URL of the API under test.
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    timeout_sec: Option<u64>,
    /// Parent directory for run reports.
    #[arg(long, value_name = "DIR")]
    report_dir: Option<PathBuf>,
    /// Fixture seed; a recorded seed replays the same data.
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum scenarios in flight.
    #[arg(long)]
    concurrency: Option<usize>,
    /// Run only this scenario (repeatable).
    #[arg(long = "scenario", value_name = "ID")]
    scenarios: Vec<String>,
    /// Skip writing report.json and report.html.
    #[arg(long)]
    no_report: bool,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI failure with the exit code it maps to.
#[derive(Debug, Error)]
enum CliError {
    /// Configuration or usage problem.
    #[error("{0}")]
    Usage(String),
    /// Failure after the run started.
    #[error("{0}")]
    Runtime(String),
}

impl CliError {
    /// Exit code for the failure.
    fn exit_code(&self) -> ExitCode {
        match self {
            Self::Usage(_) => ExitCode::from(2),
            Self::Runtime(_) => ExitCode::FAILURE,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Usage(format!("configuration error: {err}"))
    }
}

impl From<RunError> for CliError {
    fn from(err: RunError) -> Self {
        match err {
            RunError::Catalog(_) | RunError::Transport(_) => Self::Usage(err.to_string()),
            RunError::Report(_) => Self::Runtime(err.to_string()),
        }
    }
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(2));
        }
    };
    match dispatch(cli).await {
        Ok(code) => code,
        Err(err) => {
            let _ = write_stderr_line(&format!("error: {err}"));
            err.exit_code()
        }
    }
}

/// Executes the selected subcommand.
async fn dispatch(cli: Cli) -> Result<ExitCode, CliError> {
    match cli.command {
        Command::List => command_list(),
        Command::Run(args) => {
            let mut config = load_config(args.config.as_deref())?;
            apply_log_flags(&mut config, cli.log_level, cli.log_format.as_deref())?;
            apply_run_flags(&mut config, &args)?;
            init_tracing(&config.log).map_err(|err| CliError::Usage(err.to_string()))?;
            command_run(&config, &args.scenarios).await
        }
    }
}

/// Prints every scenario id with its description.
fn command_list() -> Result<ExitCode, CliError> {
    let scenarios = catalog(&mut SeededFixtures::new(0))
        .map_err(|err| CliError::Usage(err.to_string()))?;
    for scenario in &scenarios {
        write_stdout_line(&format!("{}\t{}", scenario.id(), scenario.description()))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Runs the catalog and prints a one-line summary.
async fn command_run(config: &RunnerConfig, filter: &[String]) -> Result<ExitCode, CliError> {
    let report = company_contract::execute(config, filter).await?;
    let totals = report.summary.totals;
    let mut line = format!(
        "{} passed, {} failed ({} steps skipped), seed {}",
        totals.scenarios_passed,
        totals.scenarios_failed,
        totals.steps_skipped,
        report.summary.seed.unwrap_or_default()
    );
    if let Some(root) = &report.report_root {
        line.push_str(&format!(", report {}", root.display()));
    }
    write_stdout_line(&line)?;
    Ok(summary_exit_code(&report.summary))
}

/// Exit code of a completed run: 0 when every scenario passed, 1 otherwise.
fn summary_exit_code(summary: &RunSummary) -> ExitCode {
    if summary.passed() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

// ============================================================================
// SECTION: Flag Layering
// ============================================================================

/// Applies global logging flags.
fn apply_log_flags(
    config: &mut RunnerConfig,
    level: Option<String>,
    format: Option<&str>,
) -> Result<(), ConfigError> {
    if let Some(level) = level {
        config.log.level = level;
    }
    if let Some(raw) = format {
        config.log.format = LogFormat::parse(raw).ok_or_else(|| ConfigError::InvalidValue {
            name: "--log-format".to_string(),
            reason: "must be pretty, compact, or json".to_string(),
        })?;
    }
    config.validate()
}

/// Applies `run` flags, the last configuration layer.
fn apply_run_flags(config: &mut RunnerConfig, args: &RunArgs) -> Result<(), ConfigError> {
    if let Some(raw) = &args.base_url {
        config.base_url = parse_base_url(raw)?;
    }
    if let Some(secs) = args.timeout_sec {
        config.timeout = Duration::from_secs(secs);
    }
    if let Some(dir) = &args.report_dir {
        config.report_dir = Some(dir.clone());
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }
    if args.no_report {
        config.write_report = false;
    }
    config.validate()
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> Result<(), CliError> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
        .map_err(|err| CliError::Runtime(format!("failed to write stdout: {err}")))
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}
