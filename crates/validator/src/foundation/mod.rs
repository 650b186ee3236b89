//! Core vocabulary shared by the registry and the evaluator
//!
//! - **Outcome**: [`Verdict`] - pass/fail plus the "end the chain" flag
//! - **Content**: [`RuleContent`] - what rules are evaluated against
//! - **Seams**: [`Predicate`], [`ErrorProducer`] - the uniform async interface
//!   every registered rule is normalized into
//! - **Errors**: [`ChainError`], [`ArgumentError`], [`BoxError`]
//!
//! # Two failure channels
//!
//! A predicate answering `false` is data: it lands in the
//! [`EvaluationReport`](crate::evaluator::EvaluationReport). Anything returned
//! as `Err(ChainError)` is a structural failure: misuse of the registry, or a
//! rule that itself errored.

pub mod content;
pub mod error;
pub mod traits;
pub mod verdict;

pub use content::RuleContent;
pub use error::{ArgumentError, BoxError, ChainError, ChainResult};
pub use traits::{ErrorProducer, Predicate};
pub use verdict::Verdict;
