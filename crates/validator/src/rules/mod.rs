//! Built-in rules
//!
//! Text rules usable from any chain once registered. They read the content
//! through [`RuleContent::pattern_text`], so they work for strings and JSON
//! values alike.
//!
//! | Name          | Arguments       | Passes when                                    |
//! |---------------|-----------------|------------------------------------------------|
//! | `required`    |                 | content is not blank                           |
//! | `notRequired` |                 | always; blank content also ends the chain      |
//! | `minLength`   | `N`             | at least `N` characters                        |
//! | `maxLength`   | `N`             | at most `N` characters                         |
//! | `length`      | `MIN:MAX`       | between `MIN` and `MAX` characters, inclusive  |
//! | `matches`     | `REGEX`         | the regex finds a match (`:` inside is kept)   |
//! | `oneOf`       | `A:B:...`       | content equals one of the arguments            |
//! | `numeric`     |                 | content parses as a finite number              |
//!
//! Missing or malformed arguments fail the evaluation with an
//! [`ArgumentError`] rather than a validation failure.
//!
//! # Examples
//!
//! ```
//! use verifchain::prelude::*;
//!
//! # futures::executor::block_on(async {
//! let registry = RuleRegistry::<String>::with_builtins();
//!
//! let report = registry.evaluate_default("notRequired|minLength:3", &String::new()).await?;
//! assert!(report.success);
//!
//! let report = registry.evaluate_default("notRequired|minLength:3", &"ab".to_owned()).await?;
//! assert!(!report.success);
//! # Ok::<(), ChainError>(())
//! # }).unwrap();
//! ```

mod length;
mod presence;
mod text;

pub use length::{length, max_length, min_length};
pub use presence::{not_required, required};
pub use text::{matches, numeric, one_of};

use crate::foundation::{ArgumentError, RuleContent};
use crate::rule::{Control, RuleSpec};

/// Names of every built-in rule, in registration order.
pub const NAMES: &[&str] = &[
    "required",
    "notRequired",
    "minLength",
    "maxLength",
    "length",
    "matches",
    "oneOf",
    "numeric",
];

/// Every built-in rule with its default message.
pub fn standard<C: RuleContent>() -> Vec<RuleSpec<C>> {
    vec![
        required(),
        not_required(),
        min_length(),
        max_length(),
        length(),
        matches(),
        one_of(),
        numeric(),
    ]
}

/// Control of the built-in named `name`, for reuse under another name.
pub fn control<C: RuleContent>(name: &str) -> Option<Control<C>> {
    standard::<C>()
        .into_iter()
        .find(|spec| spec.name == name)
        .map(|spec| spec.control)
}

/// Reads argument `index` as a non-negative integer.
fn usize_arg(rule: &str, args: &[String], index: usize) -> Result<usize, ArgumentError> {
    let raw = args
        .get(index)
        .ok_or_else(|| ArgumentError::missing(rule, index))?;
    raw.trim()
        .parse()
        .map_err(|_| ArgumentError::new(rule, index, format!("expected an integer, got \"{raw}\"")))
}
