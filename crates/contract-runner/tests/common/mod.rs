// crates/contract-runner/tests/common/mod.rs
// ============================================================================
// Module: Runner Test Helpers
// Description: Scripted in-memory transport and recording reporter.
// Purpose: Drive the runner without network access.
// ============================================================================

#![allow(dead_code, reason = "Each test binary uses a subset of helpers.")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only helpers favor direct unwrap/expect for clarity."
)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use contract_runner::HttpRequest;
use contract_runner::HttpResponse;
use contract_runner::HttpTransport;
use contract_runner::ReportError;
use contract_runner::Reporter;
use contract_runner::RunSummary;
use contract_runner::ScenarioOutcome;
use contract_runner::TransportError;
use serde_json::Value;

/// Route handler returning a scripted response.
pub type Handler = dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync;

/// In-memory transport answering every request through a handler.
pub struct ScriptedTransport {
    /// Produces the response for each request.
    handler: Box<Handler>,
    /// Delay applied before answering.
    delay: Option<Duration>,
    /// Requests received, in arrival order.
    requests: Mutex<Vec<HttpRequest>>,
    /// Requests currently being answered.
    in_flight: AtomicUsize,
    /// Peak of `in_flight`.
    max_in_flight: AtomicUsize,
}

impl ScriptedTransport {
    /// Creates a transport answering through `handler`.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            delay: None,
            requests: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Delays every response by `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests received so far, as `METHOD path` strings.
    pub fn calls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|request| format!("{} {}", request.method, request.url.path()))
            .collect()
    }

    /// Bodies received so far, in order.
    pub fn bodies(&self) -> Vec<Option<Value>> {
        self.requests.lock().unwrap().iter().map(|request| request.body.clone()).collect()
    }

    /// Highest number of concurrent requests observed.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let result = (self.handler)(&request);
        self.requests.lock().unwrap().push(request);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Builds a successful transport result with the given status and body.
pub fn respond(status: u16, body: &str) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse {
        status,
        body: body.to_string(),
    })
}

/// Shared log of reporter callbacks.
pub type EventLog = Arc<Mutex<Vec<String>>>;

/// Reporter appending `scenario:<id>` and `run:<passed>` entries to a log.
pub struct RecordingReporter {
    /// Destination of recorded events.
    pub events: EventLog,
    /// Fails `run_finished` when set.
    pub fail_on_finish: bool,
}

impl RecordingReporter {
    /// Creates a reporter that never fails.
    pub fn new(events: EventLog) -> Self {
        Self {
            events,
            fail_on_finish: false,
        }
    }
}

impl Reporter for RecordingReporter {
    fn scenario_finished(&mut self, outcome: &ScenarioOutcome) {
        self.events.lock().unwrap().push(format!("scenario:{}", outcome.scenario_id));
    }

    fn run_finished(&mut self, summary: &RunSummary) -> Result<(), ReportError> {
        self.events.lock().unwrap().push(format!("run:{}", summary.passed()));
        if self.fail_on_finish {
            return Err(ReportError::Serialize("scripted reporter failure".to_string()));
        }
        Ok(())
    }
}
