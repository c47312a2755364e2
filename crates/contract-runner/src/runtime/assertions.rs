// crates/contract-runner/src/runtime/assertions.rs
// ============================================================================
// Module: Response Checks
// Description: Body assertions and captures applied to a received response.
// Purpose: Verify response content and record identifiers for later steps.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! The body is parsed as JSON at most once, and only when an assertion or
//! capture needs structured access. Substring checks use the raw text.
//! Identifier fields compare by text form, so a numeric `7` matches a
//! captured `"7"`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::core::BodyAssertion;
use crate::core::Capture;
use crate::core::FieldPath;
use crate::core::ScenarioContext;
use crate::interfaces::HttpResponse;
use crate::runtime::failure::AssertionFailure;
use crate::runtime::failure::CaptureFailure;
use crate::runtime::failure::StepFailure;
use crate::runtime::failure::json_kind;

// ============================================================================
// SECTION: Parsed Body
// ============================================================================

/// Response body with lazily parsed JSON.
pub struct ResponseBody<'a> {
    /// Response being inspected.
    response: &'a HttpResponse,
    /// Parse result, filled on first structured access.
    parsed: Option<Result<Value, String>>,
}

impl<'a> ResponseBody<'a> {
    /// Wraps a response.
    #[must_use]
    pub const fn new(response: &'a HttpResponse) -> Self {
        Self {
            response,
            parsed: None,
        }
    }

    /// Returns the raw body text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.response.body
    }

    /// Returns the parsed JSON body or the parser message.
    fn json(&mut self) -> Result<&Value, &str> {
        if self.parsed.is_none() {
            self.parsed = Some(self.response.json().map_err(|err| err.to_string()));
        }
        match &self.parsed {
            Some(Ok(value)) => Ok(value),
            Some(Err(reason)) => Err(reason.as_str()),
            None => Err("response body was not parsed"),
        }
    }
}

// ============================================================================
// SECTION: Assertions
// ============================================================================

/// Evaluates assertions in order, stopping at the first failure.
///
/// # Errors
///
/// Returns [`StepFailure`] describing the first failed assertion.
pub fn check_assertions(
    assertions: &[BodyAssertion],
    body: &mut ResponseBody<'_>,
    context: &ScenarioContext,
) -> Result<(), StepFailure> {
    for assertion in assertions {
        check_assertion(assertion, body, context)?;
    }
    Ok(())
}

/// Evaluates one assertion.
fn check_assertion(
    assertion: &BodyAssertion,
    body: &mut ResponseBody<'_>,
    context: &ScenarioContext,
) -> Result<(), StepFailure> {
    match assertion {
        BodyAssertion::Contains(needle) => {
            let needle = context.resolve_path(needle)?;
            if !body.text().contains(&needle) {
                return Err(AssertionFailure::MissingSubstring {
                    needle,
                }
                .into());
            }
        }
        BodyAssertion::HasField(field) => {
            let json = body.json().map_err(invalid_json)?;
            if field.lookup(json).is_none_or(Value::is_null) {
                return Err(AssertionFailure::MissingField {
                    field: field.clone(),
                }
                .into());
            }
        }
        BodyAssertion::FieldEquals {
            field,
            expected,
        } => {
            let expected = context.resolve_body(expected)?;
            let json = body.json().map_err(invalid_json)?;
            let Some(actual) = field.lookup(json) else {
                return Err(AssertionFailure::MissingField {
                    field: field.clone(),
                }
                .into());
            };
            if *actual != expected {
                return Err(AssertionFailure::FieldMismatch {
                    field: field.clone(),
                    expected,
                    actual: actual.clone(),
                }
                .into());
            }
        }
        BodyAssertion::FieldText {
            field,
            expected,
        } => {
            let expected = context.resolve_path(expected)?;
            let json = body.json().map_err(invalid_json)?;
            let Some(actual) = field.lookup(json).filter(|value| !value.is_null()) else {
                return Err(AssertionFailure::MissingField {
                    field: field.clone(),
                }
                .into());
            };
            if text_form(actual).as_deref() != Some(expected.as_str()) {
                return Err(AssertionFailure::FieldMismatch {
                    field: field.clone(),
                    expected: Value::String(expected),
                    actual: actual.clone(),
                }
                .into());
            }
        }
        BodyAssertion::IsArray => {
            array_elements(body)?;
        }
        BodyAssertion::EachHasFields(fields) => {
            for (index, element) in array_elements(body)?.iter().enumerate() {
                if let Some(field) =
                    fields.iter().find(|field| field.lookup(element).is_none_or(Value::is_null))
                {
                    return Err(AssertionFailure::ElementMissingField {
                        index,
                        field: field.clone(),
                    }
                    .into());
                }
            }
        }
    }
    Ok(())
}

/// Returns the elements of an array body.
fn array_elements<'b>(body: &'b mut ResponseBody<'_>) -> Result<&'b [Value], StepFailure> {
    let json = body.json().map_err(invalid_json)?;
    json.as_array().map(Vec::as_slice).ok_or_else(|| {
        AssertionFailure::NotArray {
            actual: json_kind(json),
        }
        .into()
    })
}

/// Returns the text form of a string or number.
fn text_form(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Maps a parser message into an assertion failure.
fn invalid_json(reason: &str) -> StepFailure {
    AssertionFailure::InvalidJson(reason.to_string()).into()
}

// ============================================================================
// SECTION: Captures
// ============================================================================

/// Applies captures in order, storing values in the context.
///
/// # Errors
///
/// Returns [`StepFailure`] when a captured field is missing, empty, or not a
/// string or number.
pub fn apply_captures(
    captures: &[Capture],
    body: &mut ResponseBody<'_>,
    context: &mut ScenarioContext,
) -> Result<(), StepFailure> {
    for capture in captures {
        let json = body.json().map_err(|reason| CaptureFailure::InvalidJson {
            name: capture.name.clone(),
            reason: reason.to_string(),
        })?;
        let value = match capture.field.lookup(json) {
            None | Some(Value::Null) => {
                return Err(CaptureFailure::MissingField {
                    name: capture.name.clone(),
                    field: capture.field.clone(),
                }
                .into());
            }
            Some(Value::String(text)) if text.trim().is_empty() => {
                return Err(CaptureFailure::Empty {
                    name: capture.name.clone(),
                    field: capture.field.clone(),
                }
                .into());
            }
            Some(other) => text_form(other).ok_or_else(|| CaptureFailure::Unsupported {
                name: capture.name.clone(),
                field: capture.field.clone(),
                actual: json_kind(other),
            })?,
        };
        tracing::info!(capture = %capture.name, value = %value, "captured value");
        context.capture(capture.name.clone(), value);
    }
    Ok(())
}

// ============================================================================
// SECTION: Field Logging
// ============================================================================

/// Logs the requested fields of a passing response.
///
/// Array bodies log one line per element; any other JSON body logs one line.
/// Absent fields render as `-`. Bodies that are not JSON log nothing.
pub fn log_fields(fields: &[FieldPath], body: &mut ResponseBody<'_>) {
    if fields.is_empty() {
        return;
    }
    let Ok(json) = body.json() else {
        return;
    };
    match json {
        Value::Array(elements) => {
            for (index, element) in elements.iter().enumerate() {
                let rendered = render_fields(fields, element);
                tracing::info!(index, fields = %rendered, "response element");
            }
        }
        other => tracing::info!(fields = %render_fields(fields, other), "response fields"),
    }
}

/// Renders `field=value` pairs separated by spaces.
fn render_fields(fields: &[FieldPath], value: &Value) -> String {
    fields
        .iter()
        .map(|field| {
            let rendered = field.lookup(value).map_or_else(
                || "-".to_string(),
                |found| text_form(found).unwrap_or_else(|| found.to_string()),
            );
            format!("{field}={rendered}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}
