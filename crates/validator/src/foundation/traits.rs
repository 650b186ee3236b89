//! Async seams every rule is normalized into.
//!
//! Whatever shape a rule author registers (pattern, plain closure, async
//! closure, hand-written type), the registry stores it behind these two
//! traits so the evaluator only ever awaits one interface.

use async_trait::async_trait;

use crate::foundation::{BoxError, Verdict};

// ============================================================================
// PREDICATE
// ============================================================================

/// Decides whether `content` satisfies a rule, given the chain arguments.
///
/// Implement this directly for predicates that hold state (connection
/// pools, lookup tables) or need to borrow the content across an `.await`.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use verifchain::foundation::{BoxError, Predicate, Verdict};
///
/// struct Reserved(Vec<&'static str>);
///
/// #[async_trait]
/// impl Predicate<String> for Reserved {
///     async fn check(&self, content: &String, _args: &[String]) -> Result<Verdict, BoxError> {
///         Ok((!self.0.iter().any(|r| *r == content.as_str())).into())
///     }
/// }
/// ```
#[async_trait]
pub trait Predicate<C>: Send + Sync {
    /// Evaluates the rule. Errors propagate to the caller of `evaluate`.
    async fn check(&self, content: &C, args: &[String]) -> Result<Verdict, BoxError>;
}

// ============================================================================
// ERROR PRODUCER
// ============================================================================

/// Builds the human-readable message attached to a failed entry.
///
/// Only awaited when the rule's predicate answered `false`.
#[async_trait]
pub trait ErrorProducer<C>: Send + Sync {
    /// Produces the message. Errors propagate to the caller of `evaluate`.
    async fn produce(&self, content: &C, args: &[String]) -> Result<String, BoxError>;
}
