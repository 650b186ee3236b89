//! Sequential chain evaluation
//!
//! Invocations run strictly one after another: each rule's predicate is
//! awaited, then its error producer if the predicate failed, before the next
//! invocation starts. Evaluation ends early when
//!
//! - a rule fails and `stop_on_error` is set (the default), or
//! - a rule returns a terminal [`Verdict`](crate::foundation::Verdict), whether
//!   it passed or not and whatever `stop_on_error` says.
//!
//! Rule names are resolved as the chain reaches them, so an unknown name
//! after an early stop is never reported.
//!
//! # Examples
//!
//! ```
//! use verifchain::prelude::*;
//!
//! # futures::executor::block_on(async {
//! let mut registry = RuleRegistry::<String>::new();
//! registry.add_rule(RuleSpec::new(
//!     "minLength",
//!     Control::func(|c: &String, args: &[String]| c.len() >= args[0].parse().unwrap_or(0)),
//!     "too short",
//! ))?;
//!
//! let report = registry.evaluate("minLength:3", &"ab".to_owned(), true).await?;
//! assert!(!report.success);
//! assert_eq!(report.errors[0].error.as_deref(), Some("too short"));
//! # Ok::<(), ChainError>(())
//! # }).unwrap();
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::chain::Chain;
use crate::foundation::{ChainError, ChainResult, RuleContent};
use crate::registry::RuleRegistry;

// ============================================================================
// OPTIONS
// ============================================================================

/// Evaluation settings.
///
/// Deserializes from partial documents; missing fields take their defaults.
///
/// ```
/// use verifchain::evaluator::EvaluateOptions;
///
/// let options: EvaluateOptions = serde_json::from_str("{}").unwrap();
/// assert!(options.stop_on_error);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluateOptions {
    /// Stop after the first failing rule.
    pub stop_on_error: bool,
}

impl EvaluateOptions {
    /// Default options: stop on the first error.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stop_on_error: true,
        }
    }

    /// Evaluate every invocation, collecting all failures.
    #[must_use]
    pub const fn collect_all() -> Self {
        Self {
            stop_on_error: false,
        }
    }

    /// Sets [`stop_on_error`](Self::stop_on_error).
    #[must_use]
    pub const fn with_stop_on_error(mut self, stop_on_error: bool) -> Self {
        self.stop_on_error = stop_on_error;
        self
    }
}

impl Default for EvaluateOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// Outcome of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationEntry<C> {
    /// Name from the chain.
    pub rule_name: String,
    /// Whether the rule passed.
    pub result: bool,
    /// Content the rule was evaluated against.
    pub content: C,
    /// Arguments from the chain.
    pub args: Vec<String>,
    /// Message from the error producer; present only when `result` is `false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<C> EvaluationEntry<C> {
    /// `true` when the rule failed.
    pub fn is_failure(&self) -> bool {
        !self.result
    }
}

/// Result of evaluating a whole chain.
///
/// `entries` lists every invocation that ran, in order; it is cut short when
/// evaluation stopped early. `errors` is the failing subset. `success` is
/// `true` exactly when `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationReport<C> {
    /// No rule failed.
    pub success: bool,
    /// Failed entries, in evaluation order.
    pub errors: Vec<EvaluationEntry<C>>,
    /// All evaluated entries, in evaluation order.
    pub entries: Vec<EvaluationEntry<C>>,
}

impl<C: Clone> EvaluationReport<C> {
    /// Builds the report from the entries that were evaluated.
    pub fn from_entries(entries: Vec<EvaluationEntry<C>>) -> Self {
        let errors: Vec<_> = entries.iter().filter(|e| e.is_failure()).cloned().collect();
        Self {
            success: errors.is_empty(),
            errors,
            entries,
        }
    }
}

impl<C> EvaluationReport<C> {
    /// Error messages of the failed entries, in order.
    pub fn messages(&self) -> impl Iterator<Item = &str> + '_ {
        self.errors.iter().filter_map(|e| e.error.as_deref())
    }

    /// Names of the failed rules, in order.
    pub fn failed_rules(&self) -> impl Iterator<Item = &str> + '_ {
        self.errors.iter().map(|e| e.rule_name.as_str())
    }

    /// First failure, if any.
    pub fn first_error(&self) -> Option<&EvaluationEntry<C>> {
        self.errors.first()
    }
}

// ============================================================================
// EVALUATION
// ============================================================================

impl<C: RuleContent> RuleRegistry<C> {
    /// Evaluates `chain` against `content`.
    ///
    /// Validation failures are reported in the returned
    /// [`EvaluationReport`]. `Err` means the chain named an unregistered rule
    /// or a rule itself failed.
    pub async fn evaluate(
        &self,
        chain: &str,
        content: &C,
        stop_on_error: bool,
    ) -> ChainResult<EvaluationReport<C>> {
        let options = EvaluateOptions::new().with_stop_on_error(stop_on_error);
        self.evaluate_with(chain, content, options).await
    }

    /// [`evaluate`](Self::evaluate) with `stop_on_error = true`.
    pub async fn evaluate_default(
        &self,
        chain: &str,
        content: &C,
    ) -> ChainResult<EvaluationReport<C>> {
        self.evaluate_with(chain, content, EvaluateOptions::default())
            .await
    }

    /// [`evaluate`](Self::evaluate) driven by [`EvaluateOptions`].
    pub async fn evaluate_with(
        &self,
        chain: &str,
        content: &C,
        options: EvaluateOptions,
    ) -> ChainResult<EvaluationReport<C>> {
        self.evaluate_chain(&Chain::parse(chain), content, options)
            .await
    }

    /// Evaluates an already parsed chain.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(chain = %chain, len = chain.len(), stop_on_error = options.stop_on_error)
    )]
    pub async fn evaluate_chain(
        &self,
        chain: &Chain,
        content: &C,
        options: EvaluateOptions,
    ) -> ChainResult<EvaluationReport<C>> {
        let mut entries = Vec::with_capacity(chain.len());

        for invocation in chain {
            let rule = self.require(&invocation.name)?;
            trace!(rule = %invocation.name, args = ?invocation.args, "evaluating rule");

            let verdict = rule
                .verify(content, &invocation.args)
                .await
                .map_err(ChainError::Rule)?;

            let error = if verdict.value {
                None
            } else {
                let message = rule
                    .error_message(content, &invocation.args)
                    .await
                    .map_err(ChainError::Rule)?;
                debug!(rule = %invocation.name, error = %message, "rule failed");
                Some(message)
            };

            entries.push(EvaluationEntry {
                rule_name: invocation.name.clone(),
                result: verdict.value,
                content: content.clone(),
                args: invocation.args.clone(),
                error,
            });

            if !verdict.value && options.stop_on_error {
                debug!(rule = %invocation.name, "stopping chain on first error");
                break;
            }
            if verdict.terminal {
                debug!(rule = %invocation.name, passed = verdict.value, "rule ended the chain");
                break;
            }
        }

        let report = EvaluationReport::from_entries(entries);
        debug!(
            success = report.success,
            evaluated = report.entries.len(),
            failed = report.errors.len(),
            "chain evaluated"
        );
        Ok(report)
    }
}
