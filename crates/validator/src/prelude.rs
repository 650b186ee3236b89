//! Prelude module for convenient imports.
//!
//! Provides a single `use verifchain::prelude::*;` import that brings in the
//! registry, rule building blocks, chain types and errors.
//!
//! # Examples
//!
//! ```rust
//! use verifchain::prelude::*;
//!
//! let registry = RuleRegistry::<String>::with_builtins();
//! let chain = parse_chain("required|minLength:3");
//! assert!(chain.iter().all(|inv| registry.contains(&inv.name)));
//! ```

// ============================================================================
// FOUNDATION: Traits, errors, verdicts
// ============================================================================

pub use crate::foundation::{
    ArgumentError, BoxError, ChainError, ChainResult, ErrorProducer, Predicate, RuleContent,
    Verdict,
};

// ============================================================================
// RULES: Building blocks and registry
// ============================================================================

pub use crate::definition::RuleDefinition;
pub use crate::registry::RuleRegistry;
pub use crate::rule::{Control, ControlKind, ErrorMessage, Rule, RuleSpec};

// ============================================================================
// CHAINS: Parsing and evaluation
// ============================================================================

pub use crate::chain::{Chain, RuleInvocation, parse_chain};
pub use crate::evaluator::{EvaluateOptions, EvaluationEntry, EvaluationReport};
