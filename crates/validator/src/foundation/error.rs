//! Structural errors raised by the rule engine.
//!
//! Two channels exist and must not be conflated:
//!
//! - **Structural failures** ([`ChainError`]) mean the API was misused or a
//!   user-supplied rule itself failed. They are returned as `Err(..)`.
//! - **Validation failures** (a predicate answering `false`) are ordinary data
//!   carried in [`EvaluationReport`](crate::evaluator::EvaluationReport).
//!
//! # Examples
//!
//! ```
//! use verifchain::prelude::*;
//!
//! let mut registry = RuleRegistry::<String>::new();
//! registry.add_rule(RuleSpec::new("short", Control::func(|c: &String, _| c.len() < 5), "too long"))?;
//!
//! let err = registry
//!     .add_rule(RuleSpec::new("short", Control::func(|_: &String, _| true), "dup"))
//!     .unwrap_err();
//! assert!(matches!(err, ChainError::DuplicateRule { .. }));
//! # Ok::<(), ChainError>(())
//! ```

use std::fmt;

/// Type-erased failure produced by user-supplied predicates and error producers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used across the crate.
pub type ChainResult<T> = Result<T, ChainError>;

// ============================================================================
// CHAIN ERROR
// ============================================================================

/// Every structural failure the registry and evaluator can report.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ChainError {
    /// A rule with this name is already registered. The registry is unchanged.
    #[error("rule \"{name}\" already exists in the registry")]
    DuplicateRule {
        /// Name that collided.
        name: String,
    },

    /// A chain referenced a rule name that was never registered.
    #[error("rule \"{name}\" is not registered")]
    RuleNotFound {
        /// Name taken verbatim from the chain string.
        name: String,
    },

    /// A rule definition carried a control of an unsupported shape.
    #[error("cannot use control of type \"{found}\" for rule \"{rule}\"")]
    UnsupportedControlType {
        /// Rule being registered.
        rule: String,
        /// Shape that was rejected.
        found: String,
    },

    /// A rule definition carried an error message of an unsupported shape.
    #[error("cannot use error of type \"{found}\" for rule \"{rule}\"")]
    UnsupportedErrorType {
        /// Rule being registered.
        rule: String,
        /// Shape that was rejected.
        found: String,
    },

    /// A pattern control did not compile.
    #[error("invalid pattern for rule \"{rule}\": {source}")]
    InvalidPattern {
        /// Rule being registered.
        rule: String,
        /// Compilation error from the regex engine.
        #[source]
        source: regex::Error,
    },

    /// A declarative rule document could not be deserialized.
    #[error("invalid rule definition: {0}")]
    InvalidDefinition(#[from] serde_json::Error),

    /// A user-supplied predicate or error producer failed.
    ///
    /// The inner error is passed through as-is: `Display` and `source()`
    /// are those of the rule's own error.
    #[error(transparent)]
    Rule(BoxError),
}

impl ChainError {
    /// Creates a duplicate-rule error.
    pub fn duplicate_rule(name: impl Into<String>) -> Self {
        Self::DuplicateRule { name: name.into() }
    }

    /// Creates a rule-not-found error.
    pub fn rule_not_found(name: impl Into<String>) -> Self {
        Self::RuleNotFound { name: name.into() }
    }

    /// Creates an unsupported-control error.
    pub fn unsupported_control(rule: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnsupportedControlType {
            rule: rule.into(),
            found: found.into(),
        }
    }

    /// Creates an unsupported-error-message error.
    pub fn unsupported_error(rule: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnsupportedErrorType {
            rule: rule.into(),
            found: found.into(),
        }
    }

    /// Wraps a failure raised inside a rule.
    pub fn rule(error: impl Into<BoxError>) -> Self {
        Self::Rule(error.into())
    }

    /// `true` for misuse of the registry API, `false` for failures raised
    /// inside user rules.
    pub fn is_structural(&self) -> bool {
        !matches!(self, Self::Rule(_))
    }

    /// Name of the rule the error is about, when one is known.
    pub fn rule_name(&self) -> Option<&str> {
        match self {
            Self::DuplicateRule { name } | Self::RuleNotFound { name } => Some(name),
            Self::UnsupportedControlType { rule, .. }
            | Self::UnsupportedErrorType { rule, .. }
            | Self::InvalidPattern { rule, .. } => Some(rule),
            Self::InvalidDefinition(_) | Self::Rule(_) => None,
        }
    }

    /// Borrows the user error for [`ChainError::Rule`].
    pub fn as_rule_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Rule(inner) => Some(inner.as_ref()),
            _ => None,
        }
    }
}

// ============================================================================
// ARGUMENT ERROR
// ============================================================================

/// Raised by built-in rules when a chain passes an argument they cannot use.
///
/// Surfaces to callers as [`ChainError::Rule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentError {
    /// Rule that rejected the argument.
    pub rule: String,
    /// Zero-based argument position.
    pub index: usize,
    /// What was wrong with it.
    pub reason: String,
}

impl ArgumentError {
    /// Creates a new argument error.
    pub fn new(rule: impl Into<String>, index: usize, reason: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            index,
            reason: reason.into(),
        }
    }

    /// Argument is absent from the chain token.
    pub fn missing(rule: impl Into<String>, index: usize) -> Self {
        Self::new(rule, index, "missing argument")
    }
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rule \"{}\" argument #{}: {}",
            self.rule, self.index, self.reason
        )
    }
}

impl std::error::Error for ArgumentError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn duplicate_rule_message_names_the_rule() {
        let err = ChainError::duplicate_rule("email");
        assert_eq!(err.to_string(), "rule \"email\" already exists in the registry");
        assert_eq!(err.rule_name(), Some("email"));
        assert!(err.is_structural());
    }

    #[test]
    fn rule_failure_is_transparent() {
        let inner = ArgumentError::new("minLength", 0, "expected an integer");
        let err = ChainError::rule(inner.clone());

        assert!(!err.is_structural());
        assert_eq!(err.to_string(), inner.to_string());
        assert!(err.rule_name().is_none());
        let passed = err
            .as_rule_error()
            .and_then(|e| e.downcast_ref::<ArgumentError>());
        assert_eq!(passed, Some(&inner));
    }

    #[test]
    fn invalid_pattern_keeps_source() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = ChainError::InvalidPattern {
            rule: "broken".into(),
            source,
        };
        assert!(err.source().is_some());
        assert_eq!(err.rule_name(), Some("broken"));
    }

    #[test]
    fn unsupported_shapes_report_found_type() {
        let err = ChainError::unsupported_control("age", "number");
        assert_eq!(
            err.to_string(),
            "cannot use control of type \"number\" for rule \"age\""
        );
        let err = ChainError::unsupported_error("age", "array");
        assert_eq!(
            err.to_string(),
            "cannot use error of type \"array\" for rule \"age\""
        );
    }
}
