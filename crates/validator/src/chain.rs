//! Chain string grammar
//!
//! A chain is an ordered list of rule invocations separated by `|`. Each
//! invocation is a rule name optionally followed by `:`-separated arguments:
//!
//! ```text
//! chain      = invocation *( "|" invocation )
//! invocation = name [ ":" arg *( ":" arg ) ]
//! ```
//!
//! - The name runs up to the first `:` that is not the token's first
//!   character, so a token always has a non-empty name.
//! - Arguments may be empty: `name::x` has the arguments `["", "x"]`.
//! - Order and repetitions are preserved verbatim.
//! - A token containing a line break is never split; the whole token is the
//!   name.
//!
//! Parsing never fails. Unknown names are only detected when the evaluator
//! reaches them.
//!
//! # Examples
//!
//! ```
//! use verifchain::chain::parse_chain;
//!
//! let chain = parse_chain("required|length:3:10|oneOf:a::c");
//! assert_eq!(chain.len(), 3);
//! assert_eq!(chain[1].name, "length");
//! assert_eq!(chain[1].args, ["3", "10"]);
//! assert_eq!(chain[2].args, ["a", "", "c"]);
//! ```

use std::convert::Infallible;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Separator between invocations.
pub const INVOCATION_SEPARATOR: char = '|';

/// Separator between a name and its arguments, and between arguments.
pub const ARGUMENT_SEPARATOR: char = ':';

static INVOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^\n\r\x{2028}\x{2029}]+?):([^\n\r\x{2028}\x{2029}]*)$").unwrap()
});

// ============================================================================
// RULE INVOCATION
// ============================================================================

/// One `name[:args]` element of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleInvocation {
    /// Rule name, looked up in the registry.
    pub name: String,
    /// Arguments in chain order. Empty strings are kept.
    pub args: Vec<String>,
}

impl RuleInvocation {
    /// Creates an invocation with arguments.
    pub fn new<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates an invocation without arguments.
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Parses a single token (no `|`).
    pub fn parse(token: &str) -> Self {
        match INVOCATION.captures(token) {
            Some(caps) => Self::new(&caps[1], caps[2].split(ARGUMENT_SEPARATOR)),
            None => Self::bare(token),
        }
    }
}

impl fmt::Display for RuleInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for arg in &self.args {
            write!(f, "{ARGUMENT_SEPARATOR}{arg}")?;
        }
        Ok(())
    }
}

// ============================================================================
// CHAIN
// ============================================================================

/// A parsed chain: invocations in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chain {
    invocations: Vec<RuleInvocation>,
}

impl Chain {
    /// Parses a chain string. See the [module docs](self) for the grammar.
    pub fn parse(chain: &str) -> Self {
        Self {
            invocations: chain
                .split(INVOCATION_SEPARATOR)
                .map(RuleInvocation::parse)
                .collect(),
        }
    }

    /// Number of invocations.
    pub fn len(&self) -> usize {
        self.invocations.len()
    }

    /// `true` when the chain holds no invocation. Never the case for a
    /// parsed string: `""` parses to one invocation with an empty name.
    pub fn is_empty(&self) -> bool {
        self.invocations.is_empty()
    }

    /// Invocations in order.
    pub fn iter(&self) -> std::slice::Iter<'_, RuleInvocation> {
        self.invocations.iter()
    }

    /// Invocations as a slice.
    pub fn as_slice(&self) -> &[RuleInvocation] {
        &self.invocations
    }

    /// Appends an invocation.
    ///
    /// The invocation is stored as given. Its text form only parses back to
    /// the same invocation when the name is non-empty and contains no `:`,
    /// `|` or line break, and no argument contains `|`.
    #[must_use]
    pub fn then(mut self, invocation: RuleInvocation) -> Self {
        self.invocations.push(invocation);
        self
    }

    /// Consumes the chain.
    pub fn into_inner(self) -> Vec<RuleInvocation> {
        self.invocations
    }
}

impl FromStr for Chain {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Chain {
    fn from(chain: &str) -> Self {
        Self::parse(chain)
    }
}

impl From<Vec<RuleInvocation>> for Chain {
    fn from(invocations: Vec<RuleInvocation>) -> Self {
        Self { invocations }
    }
}

impl FromIterator<RuleInvocation> for Chain {
    fn from_iter<T: IntoIterator<Item = RuleInvocation>>(iter: T) -> Self {
        Self {
            invocations: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Chain {
    type Item = RuleInvocation;
    type IntoIter = std::vec::IntoIter<RuleInvocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.invocations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a RuleInvocation;
    type IntoIter = std::slice::Iter<'a, RuleInvocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.invocations.iter()
    }
}

impl Index<usize> for Chain {
    type Output = RuleInvocation;

    fn index(&self, index: usize) -> &Self::Output {
        &self.invocations[index]
    }
}

/// Rebuilds chain text. Parsing it yields the same chain for well-formed
/// names (see [`Chain::then`]); `RuleInvocation::new("", ["x"])` renders as
/// `:x`, which parses back as the bare name `":x"`.
impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, invocation) in self.invocations.iter().enumerate() {
            if i > 0 {
                write!(f, "{INVOCATION_SEPARATOR}")?;
            }
            write!(f, "{invocation}")?;
        }
        Ok(())
    }
}

/// Parses a chain string into its invocations.
pub fn parse_chain(chain: &str) -> Chain {
    Chain::parse(chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("a", "a", &[])]
    #[case("a:1", "a", &["1"])]
    #[case("a:1:2", "a", &["1", "2"])]
    #[case("a:", "a", &[""])]
    #[case("name::x", "name", &["", "x"])]
    #[case("a:b:", "a", &["b", ""])]
    #[case(":x", ":x", &[])]
    #[case("::a", ":", &["a"])]
    #[case("", "", &[])]
    #[case("a\nb:c", "a\nb:c", &[])]
    fn parses_single_token(#[case] token: &str, #[case] name: &str, #[case] args: &[&str]) {
        let invocation = RuleInvocation::parse(token);
        assert_eq!(invocation.name, name);
        assert_eq!(invocation.args, args);
    }

    #[test]
    fn splits_on_pipe_in_order() {
        let chain = parse_chain("a:1:2|b");
        assert_eq!(
            chain.into_inner(),
            vec![RuleInvocation::new("a", ["1", "2"]), RuleInvocation::bare("b")]
        );
    }

    #[test]
    fn keeps_duplicates() {
        let chain = parse_chain("x|y|x:1|x");
        let names: Vec<_> = chain.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["x", "y", "x", "x"]);
    }

    #[test]
    fn empty_segments_become_empty_names() {
        let chain = parse_chain("a||b|");
        assert_eq!(chain.len(), 4);
        assert_eq!(chain[1], RuleInvocation::bare(""));
        assert_eq!(chain[3], RuleInvocation::bare(""));
    }

    #[test]
    fn display_rebuilds_chain_text() {
        let text = "required|length:3:10|a::x|b:";
        assert_eq!(parse_chain(text).to_string(), text);
    }

    #[test]
    fn empty_name_does_not_survive_display() {
        let chain = Chain::from(vec![RuleInvocation::new("", ["x"])]);
        assert_eq!(chain.to_string(), ":x");
        assert_eq!(parse_chain(&chain.to_string())[0], RuleInvocation::bare(":x"));
    }

    #[test]
    fn builds_chain_programmatically() {
        let chain = Chain::default()
            .then(RuleInvocation::bare("required"))
            .then(RuleInvocation::new("minLength", ["3"]));
        assert_eq!(chain.to_string(), "required|minLength:3");
        assert_eq!(chain, "required|minLength:3".parse::<Chain>().unwrap());
    }

    #[test]
    fn serializes_as_list() {
        let chain = parse_chain("a:1|b");
        let json = serde_json::to_value(&chain).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"name": "a", "args": ["1"]},
                {"name": "b", "args": []}
            ])
        );
    }
}
