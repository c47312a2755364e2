// crates/contract-runner/src/runtime/failure.rs
// ============================================================================
// Module: Step Failures
// Description: Error taxonomy for failed contract steps.
// Purpose: Distinguish status, body, capture, and transport failures.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! Every failure terminates only its own scenario. [`StepFailure::kind`] maps
//! each variant onto the stable [`FailureKind`] used by reports.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

use crate::core::CaptureName;
use crate::core::FailureKind;
use crate::core::FieldPath;
use crate::core::ResolveError;
use crate::interfaces::TransportError;

/// Maximum number of body characters quoted in a status mismatch.
const BODY_EXCERPT_CHARS: usize = 200;

// ============================================================================
// SECTION: Failure Types
// ============================================================================

/// Body assertion failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssertionFailure {
    /// Body text does not contain the needle.
    #[error("response body does not contain '{needle}'")]
    MissingSubstring {
        /// Resolved needle.
        needle: String,
    },
    /// Field is absent or null.
    #[error("response body has no value at '{field}'")]
    MissingField {
        /// Field path.
        field: FieldPath,
    },
    /// Field value differs from the expected value.
    #[error("field '{field}' expected {expected}, received {actual}")]
    FieldMismatch {
        /// Field path.
        field: FieldPath,
        /// Resolved expected value.
        expected: Value,
        /// Received value.
        actual: Value,
    },
    /// Body is not a JSON array.
    #[error("response body is {actual}, expected an array")]
    NotArray {
        /// JSON kind of the received body.
        actual: &'static str,
    },
    /// An array element lacks a required field.
    #[error("array element {index} has no value at '{field}'")]
    ElementMissingField {
        /// Zero-based element position.
        index: usize,
        /// Field path.
        field: FieldPath,
    },
    /// Body is not valid JSON.
    #[error("response body is not valid json: {0}")]
    InvalidJson(String),
}

/// Capture failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureFailure {
    /// Field is absent or null.
    #[error("cannot capture '{name}': no value at '{field}'")]
    MissingField {
        /// Capture name.
        name: CaptureName,
        /// Field path.
        field: FieldPath,
    },
    /// Field holds an empty string.
    #[error("cannot capture '{name}': '{field}' is empty")]
    Empty {
        /// Capture name.
        name: CaptureName,
        /// Field path.
        field: FieldPath,
    },
    /// Field holds a value that is not a string or number.
    #[error("cannot capture '{name}': '{field}' is {actual}")]
    Unsupported {
        /// Capture name.
        name: CaptureName,
        /// Field path.
        field: FieldPath,
        /// JSON kind of the received value.
        actual: &'static str,
    },
    /// Body is not valid JSON.
    #[error("cannot capture '{name}': response body is not valid json: {reason}")]
    InvalidJson {
        /// Capture name.
        name: CaptureName,
        /// Parser message.
        reason: String,
    },
}

/// Reason a step failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StepFailure {
    /// Status code differs from the expected one.
    #[error("expected status {expected}, received {actual} (body: {body})")]
    StatusMismatch {
        /// Expected status.
        expected: u16,
        /// Received status.
        actual: u16,
        /// Leading part of the response body.
        body: String,
    },
    /// A body assertion failed.
    #[error(transparent)]
    Assertion(#[from] AssertionFailure),
    /// A capture failed.
    #[error(transparent)]
    Capture(#[from] CaptureFailure),
    /// The request did not complete.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The request could not be resolved from the scenario context.
    #[error("cannot build request: {0}")]
    Resolve(#[from] ResolveError),
    /// The resolved URL is invalid.
    #[error("invalid request url '{url}': {reason}")]
    InvalidUrl {
        /// Resolved URL text.
        url: String,
        /// Parser message.
        reason: String,
    },
}

impl StepFailure {
    /// Builds a status mismatch quoting the start of the body.
    #[must_use]
    pub fn status_mismatch(expected: u16, actual: u16, body: &str) -> Self {
        let mut excerpt: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
        if body.chars().nth(BODY_EXCERPT_CHARS).is_some() {
            excerpt.push_str("...");
        }
        Self::StatusMismatch {
            expected,
            actual,
            body: excerpt,
        }
    }

    /// Returns the report classification.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::StatusMismatch { .. } => FailureKind::Status,
            Self::Assertion(_) => FailureKind::Assertion,
            Self::Capture(_) => FailureKind::Capture,
            Self::Transport(TransportError::Timeout(_)) => FailureKind::Timeout,
            Self::Transport(_) => FailureKind::Transport,
            Self::Resolve(_) | Self::InvalidUrl { .. } => FailureKind::Resolve,
        }
    }
}

/// Returns a JSON kind label for messages.
#[must_use]
pub const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
