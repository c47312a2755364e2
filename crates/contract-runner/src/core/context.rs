// crates/contract-runner/src/core/context.rs
// ============================================================================
// Module: Scenario Context
// Description: Scenario-scoped store of captured identifiers.
// Purpose: Thread values from earlier responses into later requests.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`ScenarioContext`] is created empty when a scenario starts, receives
//! captured values as steps succeed, and is dropped when the scenario ends.
//! It is never shared between scenarios.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::core::identifiers::CaptureName;
use crate::core::template;
use crate::core::template::Segment;
use crate::core::template::TemplateError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while substituting captured values into a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Template text is malformed.
    #[error(transparent)]
    Template(#[from] TemplateError),
    /// Placeholder references a value that has not been captured.
    #[error("no captured value named '{0}'")]
    Unbound(CaptureName),
}

// ============================================================================
// SECTION: Context
// ============================================================================

/// Captured identifiers for one scenario execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioContext {
    /// Captured values keyed by name.
    values: BTreeMap<CaptureName, String>,
}

impl ScenarioContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a captured value, replacing any earlier value with the same name.
    pub fn capture(&mut self, name: CaptureName, value: impl Into<String>) {
        self.values.insert(name, value.into());
    }

    /// Returns a captured value.
    #[must_use]
    pub fn get(&self, name: &CaptureName) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Returns true when nothing has been captured yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns captured values as plain strings, ordered by name.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.values.iter().map(|(name, value)| (name.as_str().to_string(), value.clone())).collect()
    }

    /// Substitutes captured values into a path template.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when the template is malformed or references
    /// a value that has not been captured.
    pub fn resolve_path(&self, path: &str) -> Result<String, ResolveError> {
        let mut out = String::with_capacity(path.len());
        for segment in template::parse(path)? {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    let name = CaptureName::new(name);
                    let value =
                        self.get(&name).ok_or_else(|| ResolveError::Unbound(name.clone()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }

    /// Substitutes captured values into every string of a JSON body.
    ///
    /// Object keys are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when any string template cannot be resolved.
    pub fn resolve_body(&self, value: &Value) -> Result<Value, ResolveError> {
        match value {
            Value::String(text) => self.resolve_path(text).map(Value::String),
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve_body(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Value::Object(fields) => {
                let mut resolved = Map::with_capacity(fields.len());
                for (key, field) in fields {
                    resolved.insert(key.clone(), self.resolve_body(field)?);
                }
                Ok(Value::Object(resolved))
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => Ok(value.clone()),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Collects placeholders referenced by strings inside a JSON value.
///
/// # Errors
///
/// Returns [`TemplateError`] when any string is a malformed template.
pub fn value_placeholders(value: &Value) -> Result<Vec<CaptureName>, TemplateError> {
    let mut names = Vec::new();
    collect_placeholders(value, &mut names)?;
    Ok(names)
}

/// Escapes every string of a JSON value so it resolves to itself.
///
/// Object keys are never templated and are left untouched.
#[must_use]
pub fn escape_value(value: &Value) -> Value {
    match value {
        Value::String(text) => Value::String(template::escape(text)),
        Value::Array(items) => Value::Array(items.iter().map(escape_value).collect()),
        Value::Object(fields) => Value::Object(
            fields.iter().map(|(key, field)| (key.clone(), escape_value(field))).collect(),
        ),
        Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
    }
}

/// Walks a JSON value and appends placeholder names in document order.
fn collect_placeholders(value: &Value, names: &mut Vec<CaptureName>) -> Result<(), TemplateError> {
    match value {
        Value::String(text) => names.extend(template::placeholders(text)?),
        Value::Array(items) => {
            for item in items {
                collect_placeholders(item, names)?;
            }
        }
        Value::Object(fields) => {
            for field in fields.values() {
                collect_placeholders(field, names)?;
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
    Ok(())
}
