// system-tests/tests/suites/faults.rs
// ============================================================================
// Module: Fault Suite
// Description: Non-conforming API behavior surfaces as scenario failures.
// Dependencies: company-contract, contract-runner, helpers
// ============================================================================

//! ## Overview
//! A fault fails only the scenarios that observe it; later steps of a failed
//! scenario are skipped and the rest of the run is unaffected.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::time::Duration;

use company_contract::scenarios::ids;
use contract_runner::FailureKind;
use contract_runner::StepStatus;

use crate::helpers::company_stub::StubBehavior;
use crate::helpers::company_stub::spawn_company_stub_with;
use crate::helpers::harness::outcome;
use crate::helpers::harness::run;
use crate::helpers::harness::stub_config;

/// Failure kind of a failed step, if it failed.
fn failure_kind(status: &StepStatus) -> Option<FailureKind> {
    match status {
        StepStatus::Failed {
            kind, ..
        } => Some(*kind),
        _ => None,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn retained_company_fails_only_delete_scenarios() {
    let stub = spawn_company_stub_with(StubBehavior {
        delete_keeps_company: true,
        ..StubBehavior::default()
    })
    .expect("stub");
    let config = stub_config(stub.base_url()).expect("config");
    let report = run(&config, &[]).await.expect("run");

    assert!(!report.summary.passed());
    assert_eq!(report.summary.totals.scenarios_failed, 2);
    for id in [ids::DELETE, ids::FELIX] {
        let failed = outcome(&report, id).expect("outcome");
        let failure = failed.failure().expect("failing step");
        assert_eq!(failure_kind(&failure.status), Some(FailureKind::Status));
        assert_eq!(failure.expected_status, 404);
        assert_eq!(failure.actual_status, Some(200));
    }
    for id in [ids::CREATE, ids::UPDATE, ids::FETCH, ids::LIST_PRODUCTS, ids::FETCH_UNKNOWN] {
        assert!(outcome(&report, id).expect("outcome").passed(), "{id}");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_create_skips_the_remaining_steps() {
    let stub = spawn_company_stub_with(StubBehavior {
        create_failure: Some(500),
        ..StubBehavior::default()
    })
    .expect("stub");
    let config = stub_config(stub.base_url()).expect("config");
    let report = run(&config, &[ids::UPDATE, ids::FETCH_UNKNOWN]).await.expect("run");

    let update = outcome(&report, ids::UPDATE).expect("update outcome");
    assert_eq!(failure_kind(&update.steps[0].status), Some(FailureKind::Status));
    assert!(update.steps[1 ..].iter().all(|step| step.skipped()));
    assert!(update.steps[1].url.is_none());
    assert!(update.captures.is_empty());
    assert!(outcome(&report, ids::FETCH_UNKNOWN).expect("unknown outcome").passed());
    assert_eq!(report.summary.totals.steps_skipped, 2);
    assert_eq!(stub.requests().iter().filter(|line| line.starts_with("PUT")).count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_created_id_is_a_field_failure() {
    let stub = spawn_company_stub_with(StubBehavior {
        omit_created_id: true,
        ..StubBehavior::default()
    })
    .expect("stub");
    let config = stub_config(stub.base_url()).expect("config");
    let report = run(&config, &[ids::FETCH]).await.expect("run");

    let fetch = outcome(&report, ids::FETCH).expect("fetch outcome");
    let failure = fetch.failure().expect("failing step");
    assert_eq!(failure.name, "create company");
    assert!(matches!(
        failure_kind(&failure.status),
        Some(FailureKind::Assertion | FailureKind::Capture)
    ));
    assert!(fetch.steps[1].skipped());
}

#[tokio::test(flavor = "multi_thread")]
async fn slow_api_fails_with_timeout() {
    let stub = spawn_company_stub_with(StubBehavior {
        response_delay: Duration::from_millis(1_500),
        ..StubBehavior::default()
    })
    .expect("stub");
    let mut config = stub_config(stub.base_url()).expect("config");
    config.timeout = Duration::from_millis(200);
    let report = run(&config, &[ids::FETCH_UNKNOWN]).await.expect("run");

    let unknown = outcome(&report, ids::FETCH_UNKNOWN).expect("unknown outcome");
    let failure = unknown.failure().expect("failing step");
    assert_eq!(failure_kind(&failure.status), Some(FailureKind::Timeout));
    assert_eq!(failure.actual_status, None);
    assert_eq!(stub.requests().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn product_without_price_fails_the_listing() {
    let stub = spawn_company_stub_with(StubBehavior {
        malformed_products: true,
        ..StubBehavior::default()
    })
    .expect("stub");
    let config = stub_config(stub.base_url()).expect("config");
    let report = run(&config, &[ids::LIST_PRODUCTS, ids::FETCH]).await.expect("run");

    let listing = outcome(&report, ids::LIST_PRODUCTS).expect("listing outcome");
    let failure = listing.failure().expect("failing step");
    assert_eq!(failure.name, "list products");
    assert_eq!(failure_kind(&failure.status), Some(FailureKind::Assertion));
    let StepStatus::Failed {
        message, ..
    } = &failure.status
    else {
        panic!("expected a failed step");
    };
    assert!(message.contains("price"), "{message}");
    assert!(outcome(&report, ids::FETCH).expect("fetch outcome").passed());
}
