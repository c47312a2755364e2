// crates/contract-runner/src/interfaces/mod.rs
// ============================================================================
// Module: Contract Runner Interfaces
// Description: Seams for HTTP transport, fixture data, and reporting.
// Purpose: Keep the runner independent of concrete clients and sinks.
// Dependencies: async-trait, serde_json, thiserror, url
// ============================================================================

//! ## Overview
//! The runtime talks to the outside world through three traits:
//! [`HttpTransport`] sends requests, [`FixtureGenerator`] supplies test data,
//! and [`Reporter`] receives outcomes. Implementations must not retry on
//! their own; retries would hide flaky remote behavior from the run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::core::HttpMethod;
use crate::core::RunSummary;
use crate::core::ScenarioOutcome;

// ============================================================================
// SECTION: HTTP Transport
// ============================================================================

/// Fully resolved HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Request method.
    pub method: HttpMethod,
    /// Absolute request URL.
    pub url: Url,
    /// Optional JSON payload.
    pub body: Option<Value>,
}

/// HTTP response with the body read to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Response body decoded as UTF-8 (lossy).
    pub body: String,
}

impl HttpResponse {
    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when the body is not valid JSON.
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Transport failures. None of them are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No response arrived within the configured timeout.
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    /// The connection could not be established.
    #[error("connection failed: {0}")]
    Connect(String),
    /// The request failed after connecting.
    #[error("request failed: {0}")]
    Request(String),
    /// The response body could not be read.
    #[error("response body unreadable: {0}")]
    Body(String),
}

/// Sends resolved requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends the request and reads the full response body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no complete response is received.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

// ============================================================================
// SECTION: Fixture Generation
// ============================================================================

/// Source of test data used while declaring scenarios.
pub trait FixtureGenerator {
    /// Picks one entry of a non-empty pool; returns an empty string for an empty pool.
    fn pick(&mut self, pool: &[&str]) -> String;

    /// Returns a lowercase hexadecimal token of `len` characters.
    fn token(&mut self, len: usize) -> String;
}

// ============================================================================
// SECTION: Reporting
// ============================================================================

/// Errors raised while emitting reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Filesystem write failed.
    #[error("report io failure: {0}")]
    Io(#[from] std::io::Error),
    /// Report serialization failed.
    #[error("report serialization failure: {0}")]
    Serialize(String),
}

/// Receives outcomes while a run progresses.
pub trait Reporter: Send {
    /// Called once per scenario, in declaration order, after it finishes.
    fn scenario_finished(&mut self, _outcome: &ScenarioOutcome) {}

    /// Called once after every scenario has finished.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when the report cannot be emitted.
    fn run_finished(&mut self, summary: &RunSummary) -> Result<(), ReportError>;
}
