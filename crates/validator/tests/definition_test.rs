//! Rules declared in JSON documents.

use pretty_assertions::assert_eq;
use serde_json::json;
use verifchain::prelude::*;

const DOCUMENT: &str = r#"[
    { "name": "slug",     "control": "^[a-z0-9-]+$",            "error": "Invalid slug" },
    { "name": "zip",      "control": { "pattern": "^\\d{5}$" },  "error": "Invalid ZIP code" },
    { "name": "nickname", "control": { "builtin": "minLength" }, "error": "Nickname too short" }
]"#;

#[tokio::test]
async fn declared_rules_evaluate_like_code_rules() {
    let mut registry = RuleRegistry::<String>::with_builtins();
    registry.load_definitions(DOCUMENT).unwrap();

    let report = registry
        .evaluate("required|slug|nickname:4", &"ab".to_owned(), false)
        .await
        .unwrap();
    assert_eq!(report.failed_rules().collect::<Vec<_>>(), ["nickname"]);
    assert_eq!(report.messages().collect::<Vec<_>>(), ["Nickname too short"]);

    let report = registry
        .evaluate_default("zip", &"1234x".to_owned())
        .await
        .unwrap();
    assert_eq!(report.messages().collect::<Vec<_>>(), ["Invalid ZIP code"]);
}

#[tokio::test]
async fn declared_rules_work_on_json_content() {
    let mut registry = RuleRegistry::<serde_json::Value>::new();
    registry.load_definitions(DOCUMENT).unwrap();

    let report = registry.evaluate_default("zip", &json!(12345)).await.unwrap();
    assert!(report.success);
}

#[test]
fn control_kinds_after_loading() {
    let mut registry = RuleRegistry::<String>::new();
    registry.load_definitions(DOCUMENT).unwrap();

    let kinds: Vec<_> = registry.rules().map(|r| (r.name(), r.control_kind())).collect();
    assert_eq!(
        kinds,
        [
            ("slug", ControlKind::Pattern),
            ("zip", ControlKind::Pattern),
            ("nickname", ControlKind::Sync),
        ]
    );
}

#[test]
fn duplicate_definition_keeps_earlier_rules() {
    let mut registry = RuleRegistry::<String>::new();
    let err = registry
        .add_definitions(json!([
            {"name": "a", "control": "a", "error": "first"},
            {"name": "b", "control": "b", "error": "e"},
            {"name": "a", "control": "c", "error": "second"}
        ]))
        .unwrap_err();

    assert!(matches!(err, ChainError::DuplicateRule { ref name } if name == "a"));
    assert_eq!(registry.names().collect::<Vec<_>>(), ["a", "b"]);
}

#[test]
fn unsupported_shapes_name_the_json_type() {
    let mut registry = RuleRegistry::<String>::new();

    let err = registry
        .add_definitions(json!({"name": "n", "control": 42, "error": "e"}))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        ChainError::unsupported_control("n", "number").to_string()
    );

    let err = registry
        .add_definitions(json!({"name": "n", "control": "x", "error": ["e"]}))
        .unwrap_err();
    assert!(matches!(err, ChainError::UnsupportedErrorType { ref found, .. } if found == "array"));
    assert!(registry.is_empty());
}

#[test]
fn definitions_round_trip_through_serde() {
    let definition = RuleDefinition::new("slug", json!("^[a-z]+$"), json!("Invalid slug"));
    let value = serde_json::to_value(&definition).unwrap();
    assert_eq!(value, json!({"name": "slug", "control": "^[a-z]+$", "error": "Invalid slug"}));
    let back: RuleDefinition = serde_json::from_value(value).unwrap();
    assert_eq!(back, definition);
}
