// crates/contract-runner/src/core/scenario.rs
// ============================================================================
// Module: Scenario Model
// Description: Scenario and step declarations for HTTP contract runs.
// Purpose: Describe requests, expected statuses, assertions, and captures.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`Scenario`] is an ordered list of [`Step`] values built through
//! [`ScenarioBuilder`]. Construction validates that every `{name}` placeholder
//! used by a step is captured by an earlier step of the same scenario, so a
//! built scenario can only fail at run time because of the remote API.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::context::escape_value;
use crate::core::context::value_placeholders;
use crate::core::identifiers::CaptureName;
use crate::core::identifiers::FieldPath;
use crate::core::identifiers::ScenarioId;
use crate::core::template;
use crate::core::template::TemplateError;

// ============================================================================
// SECTION: HTTP Method
// ============================================================================

/// HTTP methods supported by contract steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET request.
    Get,
    /// POST request.
    Post,
    /// PUT request.
    Put,
    /// PATCH request.
    Patch,
    /// DELETE request.
    Delete,
}

impl HttpMethod {
    /// Returns the canonical method token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Assertions and Captures
// ============================================================================

/// Assertion evaluated against a response body after the status check.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyAssertion {
    /// Raw body text contains the needle (placeholders are resolved first).
    Contains(String),
    /// JSON body has a non-null value at the field path.
    HasField(FieldPath),
    /// JSON body value at the field path equals the expected value.
    FieldEquals {
        /// Field to compare.
        field: FieldPath,
        /// Expected value; string leaves may reference captured values.
        expected: Value,
    },
    /// JSON body value at the field path is a string or number whose text
    /// equals the expected template.
    FieldText {
        /// Field to compare.
        field: FieldPath,
        /// Expected text; may reference captured values.
        expected: String,
    },
    /// JSON body is an array, possibly empty.
    IsArray,
    /// JSON body is an array whose elements all have non-null values at
    /// every listed field.
    EachHasFields(Vec<FieldPath>),
}

impl BodyAssertion {
    /// Returns placeholders referenced by the assertion.
    fn placeholders(&self) -> Result<Vec<CaptureName>, TemplateError> {
        match self {
            Self::Contains(needle)
            | Self::FieldText {
                expected: needle, ..
            } => template::placeholders(needle),
            Self::FieldEquals {
                expected, ..
            } => value_placeholders(expected),
            Self::HasField(_) | Self::IsArray | Self::EachHasFields(_) => Ok(Vec::new()),
        }
    }
}

/// Captures a response body field into the scenario context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// Name the value is stored under.
    pub name: CaptureName,
    /// Field the value is read from.
    pub field: FieldPath,
}

// ============================================================================
// SECTION: Step
// ============================================================================

/// One HTTP request with its expectations.
///
/// # Invariants
/// - `expected_status` defaults to 200.
/// - Assertions run in declaration order after the status check.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Human-readable step name.
    name: String,
    /// Request method.
    method: HttpMethod,
    /// Path template appended to the base URL.
    path: String,
    /// Optional JSON payload template.
    body: Option<Value>,
    /// Expected response status.
    expected_status: u16,
    /// Body assertions.
    assertions: Vec<BodyAssertion>,
    /// Values captured from the response.
    captures: Vec<Capture>,
    /// Response fields logged after the step passes.
    logged_fields: Vec<FieldPath>,
}

impl Step {
    /// Creates a step with no body, no assertions, and an expected status of 200.
    #[must_use]
    pub fn new(name: impl Into<String>, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method,
            path: path.into(),
            body: None,
            expected_status: 200,
            assertions: Vec::new(),
            captures: Vec::new(),
            logged_fields: Vec::new(),
        }
    }

    /// Creates a GET step.
    #[must_use]
    pub fn get(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Get, path)
    }

    /// Creates a POST step.
    #[must_use]
    pub fn post(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Post, path)
    }

    /// Creates a PUT step.
    #[must_use]
    pub fn put(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Put, path)
    }

    /// Creates a DELETE step.
    #[must_use]
    pub fn delete(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Delete, path)
    }

    /// Attaches a JSON payload.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attaches a JSON payload sent exactly as given, braces included.
    #[must_use]
    pub fn json_literal(self, body: &Value) -> Self {
        self.json(escape_value(body))
    }

    /// Sets the expected response status.
    #[must_use]
    pub fn expect_status(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }

    /// Requires the raw body to contain the needle.
    #[must_use]
    pub fn expect_contains(mut self, needle: impl Into<String>) -> Self {
        self.assertions.push(BodyAssertion::Contains(needle.into()));
        self
    }

    /// Requires the raw body to contain `needle` verbatim, braces included.
    #[must_use]
    pub fn expect_contains_literal(self, needle: &str) -> Self {
        self.expect_contains(template::escape(needle))
    }

    /// Requires a non-null field in the JSON body.
    #[must_use]
    pub fn expect_field(mut self, field: impl Into<FieldPath>) -> Self {
        self.assertions.push(BodyAssertion::HasField(field.into()));
        self
    }

    /// Requires a JSON body field to equal the expected value.
    #[must_use]
    pub fn expect_field_eq(mut self, field: impl Into<FieldPath>, expected: Value) -> Self {
        self.assertions.push(BodyAssertion::FieldEquals {
            field: field.into(),
            expected,
        });
        self
    }

    /// Requires a string or numeric field whose text equals `expected`.
    ///
    /// `{id}` matches both `"7"` and `7` once `id` captured `7`.
    #[must_use]
    pub fn expect_field_text(
        mut self,
        field: impl Into<FieldPath>,
        expected: impl Into<String>,
    ) -> Self {
        self.assertions.push(BodyAssertion::FieldText {
            field: field.into(),
            expected: expected.into(),
        });
        self
    }

    /// Requires every field of `expected` to appear with the same value in the body.
    ///
    /// Values are compared literally. Non-object values add a single
    /// whole-body equality assertion.
    #[must_use]
    pub fn expect_fields(mut self, expected: &Value) -> Self {
        match expected {
            Value::Object(fields) => {
                for (key, value) in fields {
                    let pointer = format!("/{}", key.replace('~', "~0").replace('/', "~1"));
                    self = self.expect_field_eq(FieldPath::new(pointer), escape_value(value));
                }
                self
            }
            _ => self.expect_field_eq(FieldPath::new(""), escape_value(expected)),
        }
    }

    /// Requires the JSON body to be an array.
    #[must_use]
    pub fn expect_array(mut self) -> Self {
        self.assertions.push(BodyAssertion::IsArray);
        self
    }

    /// Requires an array body whose elements all carry the given fields.
    #[must_use]
    pub fn expect_each_field<I, F>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldPath>,
    {
        let fields = fields.into_iter().map(Into::into).collect();
        self.assertions.push(BodyAssertion::EachHasFields(fields));
        self
    }

    /// Logs the given response fields once the step passes; array bodies
    /// log one line per element.
    #[must_use]
    pub fn log_fields<I, F>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldPath>,
    {
        self.logged_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Captures a body field under the given name.
    #[must_use]
    pub fn capture(mut self, name: impl Into<CaptureName>, field: impl Into<FieldPath>) -> Self {
        self.captures.push(Capture {
            name: name.into(),
            field: field.into(),
        });
        self
    }

    /// Returns the step name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the request method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the path template.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the JSON payload template.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Returns the expected response status.
    #[must_use]
    pub const fn expected_status(&self) -> u16 {
        self.expected_status
    }

    /// Returns the body assertions.
    #[must_use]
    pub fn assertions(&self) -> &[BodyAssertion] {
        &self.assertions
    }

    /// Returns the captures.
    #[must_use]
    pub fn captures(&self) -> &[Capture] {
        &self.captures
    }

    /// Returns the fields logged after the step passes.
    #[must_use]
    pub fn logged_fields(&self) -> &[FieldPath] {
        &self.logged_fields
    }

    /// Returns every placeholder the step reads from the scenario context.
    fn referenced_captures(&self) -> Result<Vec<CaptureName>, TemplateError> {
        let mut names = template::placeholders(&self.path)?;
        if let Some(body) = &self.body {
            names.extend(value_placeholders(body)?);
        }
        for assertion in &self.assertions {
            names.extend(assertion.placeholders()?);
        }
        Ok(names)
    }
}

// ============================================================================
// SECTION: Scenario
// ============================================================================

/// Errors raised while building a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    /// Scenario has no steps.
    #[error("scenario '{0}' has no steps")]
    Empty(ScenarioId),
    /// A step contains a malformed template.
    #[error("scenario '{scenario}' step {index} ('{step}'): {source}")]
    Template {
        /// Scenario identifier.
        scenario: ScenarioId,
        /// Zero-based step index.
        index: usize,
        /// Step name.
        step: String,
        /// Template error.
        source: TemplateError,
    },
    /// A step references a value no earlier step captures.
    #[error(
        "scenario '{scenario}' step {index} ('{step}') references '{name}' before it is captured"
    )]
    CaptureOrder {
        /// Scenario identifier.
        scenario: ScenarioId,
        /// Zero-based step index.
        index: usize,
        /// Step name.
        step: String,
        /// Unbound capture name.
        name: CaptureName,
    },
}

/// Ordered group of dependent HTTP steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    /// Stable identifier.
    id: ScenarioId,
    /// Human-readable description.
    description: String,
    /// Steps in execution order.
    steps: Vec<Step>,
}

impl Scenario {
    /// Starts building a scenario.
    #[must_use]
    pub fn builder(id: impl Into<ScenarioId>, description: impl Into<String>) -> ScenarioBuilder {
        ScenarioBuilder {
            id: id.into(),
            description: description.into(),
            steps: Vec::new(),
        }
    }

    /// Returns the scenario identifier.
    #[must_use]
    pub const fn id(&self) -> &ScenarioId {
        &self.id
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the steps in execution order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

/// Builder validating capture ordering before a scenario can run.
#[derive(Debug, Clone)]
pub struct ScenarioBuilder {
    /// Scenario identifier.
    id: ScenarioId,
    /// Human-readable description.
    description: String,
    /// Steps collected so far.
    steps: Vec<Step>,
}

impl ScenarioBuilder {
    /// Appends a step.
    #[must_use]
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Validates and returns the scenario.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError`] when the scenario is empty, a template is
    /// malformed, or a step references a value before it is captured.
    pub fn build(self) -> Result<Scenario, ScenarioError> {
        if self.steps.is_empty() {
            return Err(ScenarioError::Empty(self.id));
        }
        let mut captured: BTreeSet<&CaptureName> = BTreeSet::new();
        for (index, step) in self.steps.iter().enumerate() {
            let referenced = step.referenced_captures().map_err(|source| {
                ScenarioError::Template {
                    scenario: self.id.clone(),
                    index,
                    step: step.name.clone(),
                    source,
                }
            })?;
            if let Some(name) = referenced.into_iter().find(|name| !captured.contains(name)) {
                return Err(ScenarioError::CaptureOrder {
                    scenario: self.id.clone(),
                    index,
                    step: step.name.clone(),
                    name,
                });
            }
            captured.extend(step.captures.iter().map(|capture| &capture.name));
        }
        Ok(Scenario {
            id: self.id,
            description: self.description,
            steps: self.steps,
        })
    }
}
