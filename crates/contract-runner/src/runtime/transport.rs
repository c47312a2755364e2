// crates/contract-runner/src/runtime/transport.rs
// ============================================================================
// Module: Reqwest Transport
// Description: HTTP transport backed by a reqwest async client.
// Purpose: Send contract requests with a single uniform timeout.
// Dependencies: async-trait, reqwest
// ============================================================================

//! ## Overview
//! [`ReqwestTransport`] sends each request once. The client-level timeout
//! covers connect, send, and body read; expiry surfaces as
//! [`TransportError::Timeout`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::Method;
use reqwest::header::ACCEPT;

use crate::core::HttpMethod;
use crate::interfaces::HttpRequest;
use crate::interfaces::HttpResponse;
use crate::interfaces::HttpTransport;
use crate::interfaces::TransportError;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("contract-runner/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// SECTION: Transport
// ============================================================================

/// Reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    /// Shared HTTP client.
    client: Client,
    /// Timeout configured on the client, reported on expiry.
    timeout: Duration,
}

impl ReqwestTransport {
    /// Builds a transport with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Request`] when the client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| TransportError::Request(format!("failed to build http client: {err}")))?;
        Ok(Self::with_client(client, timeout))
    }

    /// Wraps an existing client; `timeout` must match the client's own timeout.
    #[must_use]
    pub const fn with_client(client: Client, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
        }
    }

    /// Returns the configured timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Maps a reqwest error onto the transport taxonomy.
    fn classify(&self, err: &reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), request.url)
            .header(ACCEPT, "application/json");
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let response = builder.send().await.map_err(|err| self.classify(&err))?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|err| {
            if err.is_timeout() {
                TransportError::Timeout(self.timeout)
            } else {
                TransportError::Body(err.to_string())
            }
        })?;
        Ok(HttpResponse {
            status,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

/// Converts the runner method into a reqwest method.
const fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}
