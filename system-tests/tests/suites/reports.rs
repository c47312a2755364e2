// system-tests/tests/suites/reports.rs
// ============================================================================
// Module: Report Suite
// Description: Report artifacts written by a full run.
// Dependencies: company-contract, serde_json, tempfile, helpers
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use company_contract::scenarios::ids;
use serde_json::Value;

use crate::helpers::company_stub::spawn_company_stub;
use crate::helpers::harness::reporting_config;
use crate::helpers::harness::run;
use crate::helpers::harness::stub_config;

#[tokio::test(flavor = "multi_thread")]
async fn run_writes_json_and_html_reports() {
    let stub = spawn_company_stub().expect("stub");
    let parent = tempfile::tempdir().expect("tempdir");
    let config = reporting_config(stub.base_url(), parent.path()).expect("config");
    let report = run(&config, &[]).await.expect("run");

    let root = report.report_root.expect("report root");
    assert!(root.starts_with(parent.path()));
    assert!(root.file_name().unwrap().to_string_lossy().starts_with("run_"));

    let json: Value =
        serde_json::from_slice(&std::fs::read(root.join("report.json")).expect("json report"))
            .expect("valid json");
    assert_eq!(json["totals"]["scenarios_passed"], ids::ALL.len());
    assert_eq!(json["base_url"], report.summary.base_url.as_str());
    assert_eq!(json["scenarios"][0]["scenario_id"], ids::CREATE);

    let html = std::fs::read_to_string(root.join("report.html")).expect("html report");
    for id in ids::ALL {
        assert!(html.contains(id), "{id}");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn disabled_reports_write_nothing() {
    let stub = spawn_company_stub().expect("stub");
    let parent = tempfile::tempdir().expect("tempdir");
    let mut config = stub_config(stub.base_url()).expect("config");
    config.report_dir = Some(parent.path().to_path_buf());
    let report = run(&config, &[ids::CREATE]).await.expect("run");

    assert!(report.report_root.is_none());
    assert_eq!(std::fs::read_dir(parent.path()).expect("read dir").count(), 0);
}
