// crates/contract-runner/src/report/artifacts.rs
// ============================================================================
// Module: Run Artifacts
// Description: Artifact directory management and file reporter.
// Purpose: Create per-run report roots and write deterministic reports.
// Dependencies: serde, serde_jcs
// ============================================================================

//! ## Overview
//! Each run writes into its own `run_<unix-millis>` directory. Directories are
//! claimed with an exclusive create, so two runs starting in the same
//! millisecond get `run_<millis>` and `run_<millis>_1` instead of sharing one.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::RunSummary;
use crate::interfaces::ReportError;
use crate::interfaces::Reporter;
use crate::report::html::render_html;

/// File name of the JSON report.
pub const JSON_REPORT: &str = "report.json";
/// File name of the HTML report.
pub const HTML_REPORT: &str = "report.html";
/// Parent directory of per-run report roots when none is configured.
pub const DEFAULT_REPORT_PARENT: &str = "target/contract-reports";
/// Suffix attempts before giving up on a unique run directory.
const MAX_RUN_DIR_ATTEMPTS: u32 = 1_000;

/// Returns the current Unix time in milliseconds.
fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

/// Artifact directory for a single run.
#[derive(Debug, Clone)]
pub struct RunArtifacts {
    /// Directory receiving the report files.
    root: PathBuf,
}

impl RunArtifacts {
    /// Creates the artifact root, including missing parents.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] when the directory cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, ReportError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
        })
    }

    /// Claims a fresh run directory under `target/contract-reports`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] when no directory can be created.
    pub fn create_default_run() -> Result<Self, ReportError> {
        Self::create_run(DEFAULT_REPORT_PARENT)
    }

    /// Claims a fresh `run_<unix-millis>` directory under `parent`.
    ///
    /// A directory that already exists is never reused; a numeric suffix is
    /// appended until an unused name is found.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] when the parent cannot be created or every
    /// candidate name is taken.
    pub fn create_run(parent: impl AsRef<Path>) -> Result<Self, ReportError> {
        let parent = parent.as_ref();
        fs::create_dir_all(parent)?;
        let stem = format!("run_{}", now_millis());
        for attempt in 0 .. MAX_RUN_DIR_ATTEMPTS {
            let name = if attempt == 0 { stem.clone() } else { format!("{stem}_{attempt}") };
            let root = parent.join(name);
            match fs::create_dir(&root) {
                Ok(()) => {
                    return Ok(Self {
                        root,
                    });
                }
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {}
                Err(err) => return Err(err.into()),
            }
        }
        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no unused run directory for {stem} under {}", parent.display()),
        )
        .into())
    }

    /// Returns the root directory for the run artifacts.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes a JSON artifact using canonical JCS serialization.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when serialization or the write fails.
    pub fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<PathBuf, ReportError> {
        let path = self.root.join(name);
        let bytes =
            serde_jcs::to_vec(value).map_err(|err| ReportError::Serialize(err.to_string()))?;
        fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Writes a text artifact with UTF-8 encoding.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] when the write fails.
    pub fn write_text(&self, name: &str, value: &str) -> Result<PathBuf, ReportError> {
        let path = self.root.join(name);
        fs::write(&path, value.as_bytes())?;
        Ok(path)
    }
}

/// Reporter that writes `report.json` and `report.html` when the run ends.
#[derive(Debug)]
pub struct ArtifactReporter {
    /// Directory receiving the reports.
    artifacts: RunArtifacts,
    /// Files written so far, in write order.
    written: Vec<PathBuf>,
}

impl ArtifactReporter {
    /// Creates a reporter writing into the given artifact directory.
    #[must_use]
    pub const fn new(artifacts: RunArtifacts) -> Self {
        Self {
            artifacts,
            written: Vec::new(),
        }
    }

    /// Returns the files written so far.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl Reporter for ArtifactReporter {
    fn run_finished(&mut self, summary: &RunSummary) -> Result<(), ReportError> {
        let json = self.artifacts.write_json(JSON_REPORT, summary)?;
        self.written.push(json);
        let html = self.artifacts.write_text(HTML_REPORT, &render_html(summary))?;
        self.written.push(html);
        tracing::info!(root = %self.artifacts.root().display(), "run report written");
        Ok(())
    }
}
