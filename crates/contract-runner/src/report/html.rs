// crates/contract-runner/src/report/html.rs
// ============================================================================
// Module: HTML Report
// Description: Self-contained HTML rendering of a run summary.
// Purpose: Provide a browsable report artifact without external assets.
// Dependencies: html-escape
// ============================================================================

//! ## Overview
//! The report is a single page with a totals header and one table per
//! scenario. Every interpolated value is escaped as element text; no
//! attribute carries run data.

use std::fmt::Write;

use crate::core::RunSummary;
use crate::core::ScenarioOutcome;
use crate::core::StepRecord;
use crate::core::StepStatus;

/// Inline stylesheet.
const STYLE: &str = "body{font-family:sans-serif;margin:2rem}\
table{border-collapse:collapse;width:100%;margin-bottom:1.5rem}\
th,td{border:1px solid #ccc;padding:.3rem .5rem;text-align:left}\
.passed{color:#1a7f37}.failed{color:#cf222e}.skipped{color:#6e7781}";

/// Renders the run summary as an HTML document.
#[must_use]
pub fn render_html(summary: &RunSummary) -> String {
    let totals = summary.totals;
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>Contract Run Report</title>\n");
    let _ = writeln!(out, "<style>{STYLE}</style>\n</head>\n<body>");
    out.push_str("<h1>Contract Run Report</h1>\n<ul>\n");
    let _ = writeln!(out, "<li>Base URL: {}</li>", escape(&summary.base_url));
    if let Some(seed) = summary.seed {
        let _ = writeln!(out, "<li>Seed: {seed}</li>");
    }
    let _ = writeln!(out, "<li>Started: {}</li>", escape(&summary.started_at));
    let _ = writeln!(out, "<li>Duration (ms): {}</li>", summary.duration_ms);
    let _ = writeln!(
        out,
        "<li>Scenarios: {} passed, {} failed</li>",
        totals.scenarios_passed, totals.scenarios_failed
    );
    let _ = writeln!(
        out,
        "<li>Steps: {} passed, {} failed, {} skipped</li>",
        totals.steps_passed, totals.steps_failed, totals.steps_skipped
    );
    out.push_str("</ul>\n");
    for scenario in &summary.scenarios {
        render_scenario(&mut out, scenario);
    }
    out.push_str("</body>\n</html>\n");
    out
}

/// Renders one scenario heading and its step table.
fn render_scenario(out: &mut String, scenario: &ScenarioOutcome) {
    let (class, label) = if scenario.passed() { ("passed", "PASS") } else { ("failed", "FAIL") };
    let _ = writeln!(
        out,
        "<h2 class=\"{class}\">{label} {} <small>({})</small></h2>",
        escape(&scenario.description),
        escape(scenario.scenario_id.as_str())
    );
    out.push_str("<table>\n<tr><th>Step</th><th>Request</th><th>Status</th>");
    out.push_str("<th>Result</th><th>Duration (ms)</th></tr>\n");
    for step in &scenario.steps {
        render_step(out, step);
    }
    out.push_str("</table>\n");
}

/// Renders one step row.
fn render_step(out: &mut String, step: &StepRecord) {
    let target = step.url.as_deref().unwrap_or(&step.path);
    let actual = step.actual_status.map_or_else(|| "-".to_string(), |status| status.to_string());
    let (class, result) = match &step.status {
        StepStatus::Passed => ("passed", "passed".to_string()),
        StepStatus::Failed {
            kind,
            message,
        } => ("failed", format!("{}: {}", kind.as_str(), message)),
        StepStatus::Skipped => ("skipped", "skipped".to_string()),
    };
    let _ = write!(
        out,
        "<tr class=\"{class}\"><td>{}</td><td>{} {}</td>",
        escape(&step.name),
        step.method,
        escape(target)
    );
    let _ = writeln!(
        out,
        "<td>{actual} / {}</td><td>{}</td><td>{}</td></tr>",
        step.expected_status,
        escape(&result),
        step.duration_ms
    );
}

/// Escapes text for HTML element content.
#[must_use]
pub fn escape(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}
