// crates/contract-runner/src/report/mod.rs
// ============================================================================
// Module: Run Reporting
// Description: Reporter implementations for console logs and report files.
// Purpose: Emit human-readable progress and persistent run artifacts.
// Dependencies: serde_jcs, tracing
// ============================================================================

//! ## Overview
//! [`LogReporter`] writes one log line per scenario through `tracing`.
//! [`ArtifactReporter`] writes `report.json` and `report.html` into a run
//! directory once the run has finished.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod artifacts;
pub mod html;
pub mod log;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use artifacts::ArtifactReporter;
pub use artifacts::RunArtifacts;
pub use html::render_html;
pub use log::LogReporter;
