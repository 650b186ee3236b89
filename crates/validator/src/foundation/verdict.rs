//! Predicate outcome.

/// What a predicate decided about one piece of content.
///
/// `value` is the pass/fail answer. `terminal` asks the evaluator to end the
/// chain right after this rule, whatever `value` is and whatever
/// `stop_on_error` says.
///
/// Conversions mirror the two return shapes a rule author can use:
///
/// - `bool` → non-terminal verdict.
/// - `&str` / `String` → terminal verdict, passing only for the exact text
///   `"true"`.
///
/// ```
/// use verifchain::foundation::Verdict;
///
/// assert_eq!(Verdict::from(false), Verdict::fail());
/// assert_eq!(Verdict::from("true"), Verdict::stop(true));
/// assert_eq!(Verdict::from("nope"), Verdict::stop(false));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Verdict {
    /// Whether the rule passed.
    pub value: bool,
    /// Whether the chain ends after this rule.
    pub terminal: bool,
}

impl Verdict {
    /// Non-terminal pass.
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            value: true,
            terminal: false,
        }
    }

    /// Non-terminal failure.
    #[must_use]
    pub const fn fail() -> Self {
        Self {
            value: false,
            terminal: false,
        }
    }

    /// Terminal verdict with the given answer.
    #[must_use]
    pub const fn stop(value: bool) -> Self {
        Self {
            value,
            terminal: true,
        }
    }

    /// Reads the textual boolean sentinel: always terminal, `"true"` passes.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::stop(text == "true")
    }
}

impl From<bool> for Verdict {
    fn from(value: bool) -> Self {
        Self {
            value,
            terminal: false,
        }
    }
}

impl From<&str> for Verdict {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<String> for Verdict {
    fn from(text: String) -> Self {
        Self::from_text(&text)
    }
}
