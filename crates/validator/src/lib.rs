//! # verifchain
//!
//! Named validation rules evaluated as textual chains.
//!
//! ## Quick Start
//!
//! ```rust
//! use verifchain::prelude::*;
//!
//! # futures::executor::block_on(async {
//! let mut registry = RuleRegistry::<String>::with_builtins();
//! registry.add_rule(RuleSpec::new(
//!     "username",
//!     Control::pattern("^[a-z0-9_]+$").unwrap(),
//!     "Only lowercase letters, digits and underscores",
//! ))?;
//!
//! let report = registry
//!     .evaluate("required|minLength:3|username", &"Al".to_owned(), false)
//!     .await?;
//! assert!(!report.success);
//! assert_eq!(report.failed_rules().collect::<Vec<_>>(), ["minLength", "username"]);
//! # Ok::<(), ChainError>(())
//! # }).unwrap();
//! ```
//!
//! ## Chains
//!
//! `|` separates invocations and `:` separates a rule name from its
//! arguments: `required|length:3:20|matches:^[a-z]+$`. See [`chain`].
//!
//! ## Rules
//!
//! A rule pairs a control with an error message. Controls are regexes,
//! synchronous closures or async predicates ([`Control`]); messages are
//! literals, closures or async producers ([`ErrorMessage`]). All of them are
//! normalized to the [`Predicate`](foundation::Predicate) /
//! [`ErrorProducer`](foundation::ErrorProducer) traits on registration, so
//! evaluation awaits every rule the same way.
//!
//! A control that answers with the text `"true"` or `"false"` instead of a
//! boolean ends the chain after its entry. See [`Verdict`](foundation::Verdict).
//!
//! ## Built-in Rules
//!
//! [`rules`] ships `required`, `notRequired`, `minLength`, `maxLength`,
//! `length`, `matches`, `oneOf` and `numeric`. Rules can also be declared in
//! JSON, see [`definition`].

pub mod chain;
pub mod definition;
pub mod evaluator;
pub mod foundation;
pub mod prelude;
pub mod registry;
pub mod rule;
pub mod rules;

pub use chain::{Chain, RuleInvocation, parse_chain};
pub use evaluator::{EvaluateOptions, EvaluationEntry, EvaluationReport};
pub use foundation::{ChainError, ChainResult};
pub use registry::RuleRegistry;
pub use rule::{Control, ErrorMessage, Rule, RuleSpec};
