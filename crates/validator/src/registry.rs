//! Rule registry
//!
//! Holds the named rules a chain can reference. The registry follows a
//! build-then-use lifecycle: register everything up front, then share it
//! (`&RuleRegistry` or `Arc<RuleRegistry>`) across as many concurrent
//! evaluations as needed. Evaluation only reads, so no locking is involved.
//! Registration takes `&mut self`, which keeps it from interleaving with
//! evaluations.
//!
//! # Examples
//!
//! ```
//! use verifchain::prelude::*;
//!
//! let mut registry = RuleRegistry::<String>::new();
//! registry
//!     .add_rule(RuleSpec::new("lower", Control::pattern("^[a-z]*$")?, "lowercase only"))?
//!     .add_rule(RuleSpec::new(
//!         "minLength",
//!         Control::func(|c: &String, args: &[String]| {
//!             c.chars().count() >= args[0].parse().unwrap_or(0)
//!         }),
//!         "too short",
//!     ))?;
//!
//! assert_eq!(registry.len(), 2);
//! assert!(registry.contains("lower"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::foundation::{ChainError, ChainResult, RuleContent};
use crate::rule::Rule;

/// Named rules, kept in registration order.
pub struct RuleRegistry<C = String> {
    rules: IndexMap<String, Rule<C>>,
}

impl<C> RuleRegistry<C> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            rules: IndexMap::new(),
        }
    }

    /// Registered rules in registration order. For introspection only.
    pub fn rules(&self) -> impl ExactSizeIterator<Item = &Rule<C>> + '_ {
        self.rules.values()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.rules.keys().map(String::as_str)
    }

    /// Looks up a rule by name.
    pub fn get(&self, name: &str) -> Option<&Rule<C>> {
        self.rules.get(name)
    }

    /// Looks up a rule, failing with [`ChainError::RuleNotFound`].
    pub fn require(&self, name: &str) -> ChainResult<&Rule<C>> {
        self.get(name).ok_or_else(|| {
            tracing::warn!(rule = name, "chain references an unregistered rule");
            ChainError::rule_not_found(name)
        })
    }

    /// `true` if a rule with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<C: RuleContent> RuleRegistry<C> {
    /// Registers one rule.
    ///
    /// Accepts a [`RuleSpec`](crate::rule::RuleSpec) or an already normalized
    /// [`Rule`]. Fails with [`ChainError::DuplicateRule`] when the name is
    /// taken; the existing rule is kept. Returns `&mut Self` so calls chain
    /// with `?`.
    pub fn add_rule(&mut self, rule: impl Into<Rule<C>>) -> ChainResult<&mut Self> {
        let rule = rule.into();
        match self.rules.entry(rule.name().to_owned()) {
            Entry::Occupied(entry) => {
                tracing::warn!(rule = entry.key().as_str(), "duplicate rule rejected");
                Err(ChainError::duplicate_rule(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                tracing::debug!(
                    rule = entry.key().as_str(),
                    control = %rule.control_kind(),
                    "rule registered"
                );
                entry.insert(rule);
                Ok(self)
            }
        }
    }

    /// Registers rules in order.
    ///
    /// Stops at the first duplicate. Rules registered before it stay
    /// registered; there is no rollback.
    pub fn add_rules<I, R>(&mut self, rules: I) -> ChainResult<&mut Self>
    where
        I: IntoIterator<Item = R>,
        R: Into<Rule<C>>,
    {
        for rule in rules {
            self.add_rule(rule)?;
        }
        Ok(self)
    }

    /// Owned variant of [`add_rule`](Self::add_rule) for builder-style setup.
    pub fn with_rule(mut self, rule: impl Into<Rule<C>>) -> ChainResult<Self> {
        self.add_rule(rule)?;
        Ok(self)
    }

    /// Registry pre-loaded with every [built-in rule](crate::rules).
    pub fn with_builtins() -> Self {
        let rules = crate::rules::standard::<C>()
            .into_iter()
            .map(|spec| (spec.name.clone(), Rule::new(spec)))
            .collect();
        Self { rules }
    }

    /// Registers every built-in rule. Fails on the first name already taken.
    pub fn add_builtins(&mut self) -> ChainResult<&mut Self> {
        self.add_rules(crate::rules::standard::<C>())
    }

    /// Owned variant of [`add_rules`](Self::add_rules).
    pub fn with_rules<I, R>(mut self, rules: I) -> ChainResult<Self>
    where
        I: IntoIterator<Item = R>,
        R: Into<Rule<C>>,
    {
        self.add_rules(rules)?;
        Ok(self)
    }
}

impl<C> Default for RuleRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for RuleRegistry<C> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
        }
    }
}

impl<C> std::fmt::Debug for RuleRegistry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}
