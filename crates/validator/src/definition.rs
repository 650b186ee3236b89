//! Declarative rule definitions loaded from JSON.
//!
//! Lets an application keep part of its rule set in configuration:
//!
//! ```json
//! [
//!   { "name": "slug",     "control": "^[a-z0-9-]+$",            "error": "Invalid slug" },
//!   { "name": "zip",      "control": { "pattern": "^\\d{5}$" },  "error": "Invalid ZIP code" },
//!   { "name": "nickname", "control": { "builtin": "minLength" }, "error": "Nickname too short" }
//! ]
//! ```
//!
//! A control is either regex source (a string or `{"pattern": ...}`) or a
//! reference to a [built-in rule](crate::rules) reused under a new name and
//! message. The error is always message text. Other JSON shapes are rejected
//! with [`ChainError::UnsupportedControlType`] /
//! [`ChainError::UnsupportedErrorType`].
//!
//! # Examples
//!
//! ```
//! use verifchain::prelude::*;
//!
//! let mut registry = RuleRegistry::<String>::new();
//! registry.load_definitions(r#"[{"name": "slug", "control": "^[a-z-]+$", "error": "bad slug"}]"#)?;
//! assert!(registry.contains("slug"));
//! # Ok::<(), ChainError>(())
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::foundation::{ChainError, ChainResult, RuleContent};
use crate::registry::RuleRegistry;
use crate::rule::{Control, ErrorMessage, RuleSpec};

/// One rule as written in a configuration document.
///
/// `control` and `error` stay raw JSON until conversion so that unsupported
/// shapes can be reported by type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDefinition {
    /// Rule name.
    pub name: String,
    /// Regex source, `{"pattern": ...}` or `{"builtin": ...}`.
    pub control: Value,
    /// Message text.
    pub error: Value,
}

/// A control after shape checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlDefinition {
    /// Regex source.
    Pattern(String),
    /// Name of a built-in rule.
    Builtin(String),
}

impl RuleDefinition {
    /// Creates a definition from raw JSON parts.
    pub fn new(name: impl Into<String>, control: Value, error: Value) -> Self {
        Self {
            name: name.into(),
            control,
            error,
        }
    }

    /// Checks the control shape.
    pub fn control_definition(&self) -> ChainResult<ControlDefinition> {
        let unsupported = || ChainError::unsupported_control(&self.name, json_type(&self.control));
        match &self.control {
            Value::String(source) => Ok(ControlDefinition::Pattern(source.clone())),
            Value::Object(map) if map.len() == 1 => match map.iter().next() {
                Some((key, Value::String(value))) if key == "pattern" => {
                    Ok(ControlDefinition::Pattern(value.clone()))
                }
                Some((key, Value::String(value))) if key == "builtin" => {
                    Ok(ControlDefinition::Builtin(value.clone()))
                }
                _ => Err(unsupported()),
            },
            _ => Err(unsupported()),
        }
    }

    /// Checks the error shape.
    pub fn error_message(&self) -> ChainResult<String> {
        match &self.error {
            Value::String(text) => Ok(text.clone()),
            other => Err(ChainError::unsupported_error(&self.name, json_type(other))),
        }
    }
}

impl<C: RuleContent> TryFrom<RuleDefinition> for RuleSpec<C> {
    type Error = ChainError;

    fn try_from(definition: RuleDefinition) -> Result<Self, Self::Error> {
        let message = definition.error_message()?;
        let control = match definition.control_definition()? {
            ControlDefinition::Pattern(source) => {
                Control::pattern(&source).map_err(|source| ChainError::InvalidPattern {
                    rule: definition.name.clone(),
                    source,
                })?
            }
            ControlDefinition::Builtin(builtin) => crate::rules::control(&builtin).ok_or_else(
                || ChainError::unsupported_control(&definition.name, format!("builtin:{builtin}")),
            )?,
        };
        Ok(Self::new(
            definition.name,
            control,
            ErrorMessage::literal(message),
        ))
    }
}

impl<C: RuleContent> RuleRegistry<C> {
    /// Registers definitions from a JSON value: one definition object or an
    /// array of them.
    ///
    /// Like [`add_rules`](Self::add_rules), stops at the first failure and
    /// keeps what was registered before it.
    pub fn add_definitions(&mut self, document: Value) -> ChainResult<&mut Self> {
        let definitions: Vec<RuleDefinition> = match document {
            Value::Array(_) => serde_json::from_value(document)?,
            single => vec![serde_json::from_value(single)?],
        };
        tracing::debug!(count = definitions.len(), "loading rule definitions");
        for definition in definitions {
            self.add_rule(RuleSpec::try_from(definition)?)?;
        }
        Ok(self)
    }

    /// Parses JSON text, then behaves like [`add_definitions`](Self::add_definitions).
    pub fn load_definitions(&mut self, json: &str) -> ChainResult<&mut Self> {
        let document: Value = serde_json::from_str(json)?;
        self.add_definitions(document)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!("^a"), ControlDefinition::Pattern("^a".into()))]
    #[case(json!({"pattern": "^b"}), ControlDefinition::Pattern("^b".into()))]
    #[case(json!({"builtin": "required"}), ControlDefinition::Builtin("required".into()))]
    fn accepted_control_shapes(#[case] control: Value, #[case] expected: ControlDefinition) {
        let definition = RuleDefinition::new("r", control, json!("msg"));
        assert_eq!(definition.control_definition().unwrap(), expected);
    }

    #[rstest]
    #[case(json!(1), "number")]
    #[case(json!(true), "boolean")]
    #[case(json!(null), "null")]
    #[case(json!(["^a"]), "array")]
    #[case(json!({"pattern": 1}), "object")]
    #[case(json!({"pattern": "a", "builtin": "b"}), "object")]
    fn rejected_control_shapes(#[case] control: Value, #[case] found: &str) {
        let definition = RuleDefinition::new("r", control, json!("msg"));
        let err = definition.control_definition().unwrap_err();
        assert!(
            matches!(err, ChainError::UnsupportedControlType { found: ref f, .. } if f == found),
            "{err}"
        );
    }

    #[test]
    fn error_must_be_text() {
        let definition = RuleDefinition::new("r", json!("^a"), json!({"text": "no"}));
        let err = RuleSpec::<String>::try_from(definition).unwrap_err();
        assert!(matches!(err, ChainError::UnsupportedErrorType { ref found, .. } if found == "object"));
    }

    #[test]
    fn unknown_builtin_is_unsupported() {
        let definition = RuleDefinition::new("r", json!({"builtin": "nope"}), json!("msg"));
        let err = RuleSpec::<String>::try_from(definition).unwrap_err();
        assert!(matches!(err, ChainError::UnsupportedControlType { ref found, .. } if found == "builtin:nope"));
    }

    #[test]
    fn bad_regex_is_invalid_pattern() {
        let definition = RuleDefinition::new("r", json!("("), json!("msg"));
        let err = RuleSpec::<String>::try_from(definition).unwrap_err();
        assert!(matches!(err, ChainError::InvalidPattern { ref rule, .. } if rule == "r"));
    }

    #[test]
    fn single_object_or_array() {
        let mut registry = RuleRegistry::<String>::new();
        registry
            .add_definitions(json!({"name": "a", "control": "a", "error": "e"}))
            .unwrap()
            .add_definitions(json!([
                {"name": "b", "control": "b", "error": "e"},
                {"name": "c", "control": {"builtin": "numeric"}, "error": "e"}
            ]))
            .unwrap();
        assert_eq!(registry.names().collect::<Vec<_>>(), ["a", "b", "c"]);
    }

    #[test]
    fn malformed_document_is_invalid_definition() {
        let mut registry = RuleRegistry::<String>::new();
        let err = registry.load_definitions(r#"[{"control": "a"}]"#).unwrap_err();
        assert!(matches!(err, ChainError::InvalidDefinition(_)));
        let err = registry.load_definitions("not json").unwrap_err();
        assert!(matches!(err, ChainError::InvalidDefinition(_)));
    }
}
