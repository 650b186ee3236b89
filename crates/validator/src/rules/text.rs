//! Text shape rules.

use regex::Regex;

use crate::chain::ARGUMENT_SEPARATOR;
use crate::foundation::{ArgumentError, RuleContent};
use crate::rule::{Control, ErrorMessage, RuleSpec};

/// `matches:REGEX`
///
/// The chain grammar splits arguments on `:`, so the arguments are joined
/// back with `:` before compiling: `matches:^\d{2}:\d{2}$` works as written.
/// A `|` cannot appear in the pattern; it always separates invocations.
pub fn matches<C: RuleContent>() -> RuleSpec<C> {
    RuleSpec::new(
        "matches",
        Control::try_func(|content: &C, args: &[String]| -> Result<bool, ArgumentError> {
            if args.is_empty() {
                return Err(ArgumentError::missing("matches", 0));
            }
            let separator = ARGUMENT_SEPARATOR.to_string();
            let source = args.join(separator.as_str());
            let pattern =
                Regex::new(&source).map_err(|e| ArgumentError::new("matches", 0, e.to_string()))?;
            Ok(pattern.is_match(&content.pattern_text()))
        }),
        "Does not match the expected format",
    )
}

/// `oneOf:A:B:...`
pub fn one_of<C: RuleContent>() -> RuleSpec<C> {
    RuleSpec::new(
        "oneOf",
        Control::func(|content: &C, args: &[String]| {
            let text = content.pattern_text();
            args.iter().any(|allowed| *allowed == *text)
        }),
        ErrorMessage::func(|_: &C, args: &[String]| {
            format!("Must be one of: {}", args.join(", "))
        }),
    )
}

/// `numeric`: a finite decimal number, surrounding whitespace allowed.
pub fn numeric<C: RuleContent>() -> RuleSpec<C> {
    RuleSpec::new(
        "numeric",
        Control::func(|content: &C, _: &[String]| {
            content
                .pattern_text()
                .trim()
                .parse::<f64>()
                .is_ok_and(f64::is_finite)
        }),
        "Must be a number",
    )
}
