// crates/contract-runner/src/core/template_tests.rs
// ============================================================================
// Module: Template Unit Tests
// Description: Placeholder parsing and substitution coverage.
// Purpose: Ensure templates fail closed and substitute captured values exactly.
// Dependencies: proptest, serde_json
// ============================================================================

//! ## Overview
//! Covers template parsing, path and JSON substitution through
//! [`ScenarioContext`], and property checks for literal passthrough.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use proptest::prelude::*;
use serde_json::json;

use super::CaptureName;
use super::ResolveError;
use super::ScenarioContext;
use super::TemplateError;
use super::Step;
use super::context::value_placeholders;
use super::template::Segment;
use super::template::escape;
use super::template::parse;
use super::template::placeholders;

/// Context holding the given captures.
fn context_with(pairs: &[(&str, &str)]) -> ScenarioContext {
    let mut context = ScenarioContext::new();
    for (name, value) in pairs {
        context.capture(CaptureName::new(*name), *value);
    }
    context
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

#[test]
fn parse_splits_literals_and_placeholders() {
    let segments = parse("/company/{id}/products").expect("valid template");
    assert_eq!(
        segments,
        vec![
            Segment::Literal("/company/"),
            Segment::Placeholder("id"),
            Segment::Literal("/products"),
        ]
    );
}

#[test]
fn parse_handles_adjacent_placeholders() {
    let segments = parse("{a}{b-2}").expect("valid template");
    assert_eq!(segments, vec![Segment::Placeholder("a"), Segment::Placeholder("b-2")]);
}

#[test]
fn parse_rejects_unbalanced_braces() {
    assert_eq!(
        parse("/company/{id").unwrap_err(),
        TemplateError::Unterminated {
            template: "/company/{id".to_string(),
            offset: 9,
        }
    );
    assert_eq!(
        parse("/company/id}").unwrap_err(),
        TemplateError::UnmatchedClose {
            template: "/company/id}".to_string(),
            offset: 11,
        }
    );
}

#[test]
fn parse_rejects_invalid_names() {
    assert!(matches!(
        parse("/x/{}"),
        Err(TemplateError::InvalidName { ref name, .. }) if name.is_empty()
    ));
    assert!(matches!(parse("/x/{a b}"), Err(TemplateError::InvalidName { .. })));
    assert!(matches!(parse("/x/{a{b}"), Err(TemplateError::InvalidName { .. })));
}

#[test]
fn doubled_braces_are_literal() {
    let segments = parse("{{x}} {id}}}").expect("valid template");
    assert_eq!(
        segments,
        vec![
            Segment::Literal("{"),
            Segment::Literal("x}"),
            Segment::Literal(" "),
            Segment::Placeholder("id"),
            Segment::Literal("}"),
        ]
    );
    assert!(placeholders("Acme {{Holding}}").expect("valid template").is_empty());
}

#[test]
fn escaped_text_resolves_verbatim() {
    let context = ScenarioContext::new();
    for text in ["Acme {Holding}", "Rua } 12", "{{", "}{"] {
        assert_eq!(context.resolve_path(&escape(text)).unwrap(), text);
    }
}

#[test]
fn literal_json_bodies_keep_their_braces() {
    let record = json!({"name": "Acme {Holding}", "address": "Rua } 12", "tags": ["{x}"]});
    let step = Step::post("create", "/company").json_literal(&record);
    let body = step.body().expect("body");
    assert!(value_placeholders(body).expect("valid body").is_empty());
    let resolved = ScenarioContext::new().resolve_body(body).expect("resolvable");
    assert_eq!(resolved, record);
}

#[test]
fn placeholders_are_listed_in_order() {
    let names = placeholders("/{parent}/child/{child}/{parent}").expect("valid template");
    let names: Vec<&str> = names.iter().map(CaptureName::as_str).collect();
    assert_eq!(names, vec!["parent", "child", "parent"]);
}

#[test]
fn value_placeholders_walk_nested_strings_only() {
    let body = json!({
        "{not_a_key}": "{id}",
        "items": [{"ref": "{other}"}, 42, null],
        "flag": true
    });
    let mut names: Vec<String> = value_placeholders(&body)
        .expect("valid body")
        .into_iter()
        .map(|name| name.as_str().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["id".to_string(), "other".to_string()]);
}

// ============================================================================
// SECTION: Substitution
// ============================================================================

#[test]
fn resolve_path_substitutes_captured_values() {
    let context = context_with(&[("id", "65f0c0ffee")]);
    assert_eq!(context.resolve_path("/company/{id}").unwrap(), "/company/65f0c0ffee");
    assert_eq!(context.resolve_path("/company").unwrap(), "/company");
}

#[test]
fn resolve_path_reports_unbound_names() {
    let context = context_with(&[("id", "1")]);
    assert_eq!(
        context.resolve_path("/company/{other}").unwrap_err(),
        ResolveError::Unbound(CaptureName::new("other"))
    );
}

#[test]
fn resolve_body_keeps_keys_and_non_strings() {
    let context = context_with(&[("id", "abc")]);
    let resolved = context
        .resolve_body(&json!({"{id}": "{id}", "nested": ["x-{id}", 7, false]}))
        .expect("resolvable");
    assert_eq!(resolved, json!({"{id}": "abc", "nested": ["x-abc", 7, false]}));
}

#[test]
fn later_capture_replaces_earlier_value() {
    let mut context = context_with(&[("id", "first")]);
    context.capture(CaptureName::new("id"), "second");
    assert_eq!(context.get(&CaptureName::new("id")), Some("second"));
    assert_eq!(context.snapshot().len(), 1);
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #[test]
    fn brace_free_text_resolves_to_itself(text in "[^{}]{0,64}") {
        let context = ScenarioContext::new();
        prop_assert_eq!(context.resolve_path(&text).unwrap(), text);
    }

    #[test]
    fn substitution_inserts_value_verbatim(
        prefix in "[a-z/]{0,16}",
        value in "[^{}]{0,32}",
        suffix in "[a-z/]{0,16}",
    ) {
        let context = context_with(&[("id", value.as_str())]);
        let template = format!("{prefix}{{id}}{suffix}");
        let expected = format!("{prefix}{value}{suffix}");
        prop_assert_eq!(context.resolve_path(&template).unwrap(), expected);
    }

    #[test]
    fn escaped_text_always_resolves_to_itself(text in ".{0,64}") {
        let context = ScenarioContext::new();
        prop_assert_eq!(context.resolve_path(&escape(&text)).unwrap(), text);
    }

    #[test]
    fn parser_never_panics(text in ".{0,64}") {
        let _ = parse(&text);
    }
}
