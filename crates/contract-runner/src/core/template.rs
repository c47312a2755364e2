// crates/contract-runner/src/core/template.rs
// ============================================================================
// Module: Contract Runner Templates
// Description: Placeholder parsing for paths and JSON string values.
// Purpose: Locate `{name}` references to captured identifiers.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! A template is plain text with `{name}` placeholders. Names are ASCII
//! alphanumerics, `_`, or `-`. `{{` and `}}` stand for literal braces; a lone
//! `}` or an unterminated `{` is rejected rather than sent verbatim. Data that
//! must go out unchanged is passed through [`escape`] first.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::identifiers::CaptureName;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Template syntax errors.
///
/// # Invariants
/// - Offsets are byte offsets into the original template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A `{` without a matching `}`.
    #[error("unterminated placeholder at byte {offset} in '{template}'")]
    Unterminated {
        /// Template text.
        template: String,
        /// Offset of the opening brace.
        offset: usize,
    },
    /// A `}` without a preceding `{`.
    #[error("unmatched closing brace at byte {offset} in '{template}'")]
    UnmatchedClose {
        /// Template text.
        template: String,
        /// Offset of the closing brace.
        offset: usize,
    },
    /// Placeholder name is empty or contains unsupported characters.
    #[error("invalid placeholder name '{name}' in '{template}'")]
    InvalidName {
        /// Template text.
        template: String,
        /// Offending name.
        name: String,
    },
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parsed template segment borrowing from the template text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text copied as-is.
    Literal(&'a str),
    /// Placeholder name without braces.
    Placeholder(&'a str),
}

/// Splits a template into literal and placeholder segments.
///
/// `{{` and `}}` produce literal braces.
///
/// # Errors
///
/// Returns [`TemplateError`] on unbalanced braces or invalid names.
pub fn parse(template: &str) -> Result<Vec<Segment<'_>>, TemplateError> {
    let bytes = template.as_bytes();
    let mut segments = Vec::new();
    let mut literal_start = 0usize;
    let mut index = 0usize;
    while let Some(&byte) = bytes.get(index) {
        let doubled = bytes.get(index + 1) == Some(&byte);
        match byte {
            b'{' | b'}' if doubled => {
                push_literal(&mut segments, &template[literal_start ..= index]);
                index += 2;
                literal_start = index;
            }
            b'}' => {
                return Err(TemplateError::UnmatchedClose {
                    template: template.to_string(),
                    offset: index,
                });
            }
            b'{' => {
                push_literal(&mut segments, &template[literal_start .. index]);
                let after = &template[index + 1 ..];
                let Some(end) = after.find('}') else {
                    return Err(TemplateError::Unterminated {
                        template: template.to_string(),
                        offset: index,
                    });
                };
                let name = &after[.. end];
                if !is_valid_name(name) {
                    return Err(TemplateError::InvalidName {
                        template: template.to_string(),
                        name: name.to_string(),
                    });
                }
                segments.push(Segment::Placeholder(name));
                index += end + 2;
                literal_start = index;
            }
            _ => index += 1,
        }
    }
    push_literal(&mut segments, &template[literal_start ..]);
    Ok(segments)
}

/// Escapes braces so the text parses back to itself as one literal.
#[must_use]
pub fn escape(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

/// Returns every placeholder referenced by a template, in order of appearance.
///
/// # Errors
///
/// Returns [`TemplateError`] when the template is malformed.
pub fn placeholders(template: &str) -> Result<Vec<CaptureName>, TemplateError> {
    Ok(parse(template)?
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(CaptureName::new(name)),
            Segment::Literal(_) => None,
        })
        .collect())
}

/// Appends a non-empty literal segment.
fn push_literal<'a>(segments: &mut Vec<Segment<'a>>, text: &'a str) {
    if !text.is_empty() {
        segments.push(Segment::Literal(text));
    }
}

/// Returns true when the name is usable as a placeholder.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|byte| byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-')
}
