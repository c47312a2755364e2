// system-tests/tests/suites/catalog.rs
// ============================================================================
// Module: Catalog Suite
// Description: The full company catalog against a well-behaved stub.
// Dependencies: company-contract, contract-runner, helpers
// ============================================================================

//! ## Overview
//! A conforming API must pass every scenario, sequentially or concurrently,
//! and a fixed seed must reproduce the exact request sequence.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use company_contract::scenarios::ids;

use crate::helpers::company_stub::StubBehavior;
use crate::helpers::company_stub::spawn_company_stub;
use crate::helpers::company_stub::spawn_company_stub_with;
use crate::helpers::harness::outcome;
use crate::helpers::harness::run;
use crate::helpers::harness::stub_config;

#[tokio::test(flavor = "multi_thread")]
async fn full_catalog_passes_against_conforming_api() {
    let stub = spawn_company_stub().expect("stub");
    let config = stub_config(stub.base_url()).expect("config");
    let report = run(&config, &[]).await.expect("run");

    assert!(report.summary.passed(), "{}", serde_json::to_string(&report.summary).unwrap());
    assert_eq!(report.summary.totals.scenarios_passed, ids::ALL.len());
    assert_eq!(report.summary.totals.steps_skipped, 0);
    assert_eq!(report.summary.seed, Some(config.seed.unwrap()));
    assert!(report.report_root.is_none());
    let order: Vec<&str> =
        report.summary.scenarios.iter().map(|outcome| outcome.scenario_id.as_str()).collect();
    assert_eq!(order, ids::ALL);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_is_confirmed_by_a_not_found_fetch() {
    let stub = spawn_company_stub().expect("stub");
    let config = stub_config(stub.base_url()).expect("config");
    let report = run(&config, &[ids::DELETE]).await.expect("run");

    let delete = outcome(&report, ids::DELETE).expect("delete outcome");
    assert!(delete.passed());
    let id = delete.captures.get("id").expect("captured id").clone();
    assert_eq!(
        stub.requests(),
        vec![
            "POST /company".to_string(),
            format!("DELETE /company/{id}"),
            format!("GET /company/{id}"),
        ]
    );
    assert_eq!(delete.steps[2].actual_status, Some(404));
    assert_eq!(stub.company_count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_run_keeps_declaration_order() {
    let stub = spawn_company_stub().expect("stub");
    let mut config = stub_config(stub.base_url()).expect("config");
    config.concurrency = 4;
    let report = run(&config, &[]).await.expect("run");

    assert!(report.summary.passed());
    let order: Vec<&str> =
        report.summary.scenarios.iter().map(|outcome| outcome.scenario_id.as_str()).collect();
    assert_eq!(order, ids::ALL);
}

#[tokio::test(flavor = "multi_thread")]
async fn fixed_seed_replays_the_same_requests() {
    let first = spawn_company_stub().expect("stub");
    let second = spawn_company_stub().expect("stub");
    let a = run(&stub_config(first.base_url()).expect("config"), &[]).await.expect("run");
    let b = run(&stub_config(second.base_url()).expect("config"), &[]).await.expect("run");

    assert!(a.summary.passed() && b.summary.passed());
    assert_eq!(first.requests(), second.requests());
    let unknown = outcome(&a, ids::FETCH_UNKNOWN).expect("unknown outcome");
    assert_eq!(unknown.steps[0].url, outcome(&b, ids::FETCH_UNKNOWN).unwrap().steps[0].url);
}

#[tokio::test(flavor = "multi_thread")]
async fn scenarios_do_not_share_companies() {
    let stub = spawn_company_stub().expect("stub");
    let config = stub_config(stub.base_url()).expect("config");
    let report = run(&config, &[ids::CREATE, ids::FETCH, ids::UPDATE]).await.expect("run");

    let captured: Vec<&String> = report
        .summary
        .scenarios
        .iter()
        .map(|outcome| outcome.captures.get("id").expect("captured id"))
        .collect();
    assert_eq!(captured.len(), 3);
    assert_ne!(captured[0], captured[1]);
    assert_ne!(captured[1], captured[2]);
    assert_eq!(stub.company_count(), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn numeric_ids_pass_the_full_catalog() {
    let stub = spawn_company_stub_with(StubBehavior {
        numeric_ids: true,
        ..StubBehavior::default()
    })
    .expect("stub");
    let config = stub_config(stub.base_url()).expect("config");
    let report = run(&config, &[]).await.expect("run");

    assert!(report.summary.passed(), "{}", serde_json::to_string(&report.summary).unwrap());
    let fetch = outcome(&report, ids::FETCH).expect("fetch outcome");
    let id = fetch.captures.get("id").expect("captured id");
    assert!(id.chars().all(|c| c.is_ascii_digit()), "{id}");
}

#[tokio::test(flavor = "multi_thread")]
async fn populated_product_listing_passes() {
    let stub = spawn_company_stub().expect("stub");
    let config = stub_config(stub.base_url()).expect("config");
    let report = run(&config, &[ids::LIST_PRODUCTS]).await.expect("run");

    let listing = outcome(&report, ids::LIST_PRODUCTS).expect("listing outcome");
    assert!(listing.passed());
    assert_eq!(listing.steps[1].actual_status, Some(200));
}
