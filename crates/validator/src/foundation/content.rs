//! Content that rules can be evaluated against.

use std::borrow::Cow;
use std::sync::Arc;

/// A value a [`RuleRegistry`](crate::registry::RuleRegistry) can validate.
///
/// Closures and async predicates see the content as-is. Pattern controls and
/// the text built-ins only see [`pattern_text`](RuleContent::pattern_text):
/// strings are used verbatim, anything else is rendered to text first.
///
/// Entries in an [`EvaluationReport`](crate::evaluator::EvaluationReport)
/// carry their own copy of the content, hence the `Clone` bound.
pub trait RuleContent: Clone + Send + Sync + 'static {
    /// Text that regular-expression controls are matched against.
    fn pattern_text(&self) -> Cow<'_, str>;

    /// `true` when the content counts as absent for `required`/`notRequired`.
    fn is_blank(&self) -> bool {
        self.pattern_text().trim().is_empty()
    }
}

impl RuleContent for String {
    fn pattern_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl RuleContent for &'static str {
    fn pattern_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(*self)
    }
}

impl RuleContent for Box<str> {
    fn pattern_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&**self)
    }
}

impl RuleContent for Arc<str> {
    fn pattern_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&**self)
    }
}

impl RuleContent for Cow<'static, str> {
    fn pattern_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&**self)
    }
}

/// JSON strings match by their value; every other JSON value by its
/// serialized form (`42`, `true`, `{"a":1}`).
impl RuleContent for serde_json::Value {
    fn pattern_text(&self) -> Cow<'_, str> {
        match self {
            Self::String(text) => Cow::Borrowed(text.as_str()),
            other => Cow::Owned(other.to_string()),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(text) => text.trim().is_empty(),
            _ => false,
        }
    }
}
