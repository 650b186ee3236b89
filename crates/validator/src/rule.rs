//! Rule specifications and their normalized form.
//!
//! A [`RuleSpec`] is what callers hand to the registry: a name, a
//! [`Control`] and an [`ErrorMessage`], each in whichever shape is most
//! convenient. Registration turns it into a [`Rule`], where both halves sit
//! behind the async [`Predicate`] / [`ErrorProducer`] seams. The shape is
//! resolved once, so evaluation never inspects it again.
//!
//! # Examples
//!
//! ```
//! use verifchain::rule::{Control, Rule, RuleSpec};
//!
//! let digits = RuleSpec::<String>::new("digits", Control::pattern(r"^\d+$")?, "digits only");
//! let rule = Rule::from(digits);
//! assert_eq!(rule.name(), "digits");
//! # Ok::<(), regex::Error>(())
//! ```

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;
use serde::Serialize;

use crate::foundation::{BoxError, ErrorProducer, Predicate, RuleContent, Verdict};

type SyncPredicateFn<C> = dyn Fn(&C, &[String]) -> Result<Verdict, BoxError> + Send + Sync;
type SyncMessageFn<C> = dyn Fn(&C, &[String]) -> Result<String, BoxError> + Send + Sync;

// ============================================================================
// CONTROL
// ============================================================================

/// Which shape a control was registered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    /// Regular expression tested against the content text.
    Pattern,
    /// Synchronous closure.
    Sync,
    /// Async closure or a [`Predicate`] implementation.
    Async,
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern => write!(f, "pattern"),
            Self::Sync => write!(f, "sync"),
            Self::Async => write!(f, "async"),
        }
    }
}

/// The "does it pass?" half of a rule.
///
/// A pattern control ignores chain arguments and is tested against
/// [`RuleContent::pattern_text`] only. Use the `matches` built-in when the
/// pattern itself should come from the chain.
pub enum Control<C> {
    /// Regular expression matched anywhere in the content text.
    Pattern(Regex),
    /// Synchronous predicate.
    Sync(Arc<SyncPredicateFn<C>>),
    /// Asynchronous predicate.
    Async(Arc<dyn Predicate<C>>),
}

impl<C> Control<C>
where
    C: Send + Sync + 'static,
{
    /// Compiles `pattern` into a pattern control.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self::Pattern)
    }

    /// Wraps a synchronous predicate.
    ///
    /// Return `bool` for an ordinary verdict, or `"true"` / `"false"` text to
    /// also end the chain after this rule.
    pub fn func<F, R>(f: F) -> Self
    where
        F: Fn(&C, &[String]) -> R + Send + Sync + 'static,
        R: Into<Verdict>,
    {
        Self::Sync(Arc::new(
            move |content: &C, args: &[String]| -> Result<Verdict, BoxError> {
                Ok(f(content, args).into())
            },
        ))
    }

    /// Wraps a synchronous predicate that can fail.
    pub fn try_func<F, R, E>(f: F) -> Self
    where
        F: Fn(&C, &[String]) -> Result<R, E> + Send + Sync + 'static,
        R: Into<Verdict>,
        E: Into<BoxError>,
    {
        Self::Sync(Arc::new(
            move |content: &C, args: &[String]| -> Result<Verdict, BoxError> {
                f(content, args).map(Into::into).map_err(Into::into)
            },
        ))
    }

    /// Wraps an async closure. It receives its own copy of the content and
    /// arguments so the returned future can be `'static`.
    pub fn async_fn<F, Fut, R>(f: F) -> Self
    where
        C: Clone,
        F: Fn(C, Vec<String>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, BoxError>> + Send + 'static,
        R: Into<Verdict>,
    {
        Self::Async(Arc::new(AsyncFnPredicate {
            f,
            _marker: PhantomData,
        }))
    }

    /// Uses a hand-written [`Predicate`].
    pub fn predicate<P>(predicate: P) -> Self
    where
        P: Predicate<C> + 'static,
    {
        Self::Async(Arc::new(predicate))
    }

    /// Shape of this control.
    pub fn kind(&self) -> ControlKind {
        match self {
            Self::Pattern(_) => ControlKind::Pattern,
            Self::Sync(_) => ControlKind::Sync,
            Self::Async(_) => ControlKind::Async,
        }
    }
}

impl<C> From<Regex> for Control<C> {
    fn from(regex: Regex) -> Self {
        Self::Pattern(regex)
    }
}

impl<C> Clone for Control<C> {
    fn clone(&self) -> Self {
        match self {
            Self::Pattern(re) => Self::Pattern(re.clone()),
            Self::Sync(f) => Self::Sync(Arc::clone(f)),
            Self::Async(p) => Self::Async(Arc::clone(p)),
        }
    }
}

impl<C> fmt::Debug for Control<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            Self::Sync(_) => f.write_str("Sync(..)"),
            Self::Async(_) => f.write_str("Async(..)"),
        }
    }
}

// ============================================================================
// ERROR MESSAGE
// ============================================================================

/// The "what went wrong" half of a rule.
pub enum ErrorMessage<C> {
    /// Fixed text, whatever the content and arguments.
    Literal(String),
    /// Synchronous message builder.
    Sync(Arc<SyncMessageFn<C>>),
    /// Asynchronous message builder.
    Async(Arc<dyn ErrorProducer<C>>),
}

impl<C> ErrorMessage<C>
where
    C: Send + Sync + 'static,
{
    /// Fixed message text.
    pub fn literal(message: impl Into<String>) -> Self {
        Self::Literal(message.into())
    }

    /// Builds the message from the content and chain arguments.
    pub fn func<F, S>(f: F) -> Self
    where
        F: Fn(&C, &[String]) -> S + Send + Sync + 'static,
        S: Into<String>,
    {
        Self::Sync(Arc::new(
            move |content: &C, args: &[String]| -> Result<String, BoxError> {
                Ok(f(content, args).into())
            },
        ))
    }

    /// Async message builder; receives owned copies of its inputs.
    pub fn async_fn<F, Fut, S>(f: F) -> Self
    where
        C: Clone,
        F: Fn(C, Vec<String>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<S, BoxError>> + Send + 'static,
        S: Into<String>,
    {
        Self::Async(Arc::new(AsyncFnMessage {
            f,
            _marker: PhantomData,
        }))
    }

    /// Uses a hand-written [`ErrorProducer`].
    pub fn producer<P>(producer: P) -> Self
    where
        P: ErrorProducer<C> + 'static,
    {
        Self::Async(Arc::new(producer))
    }
}

impl<C> From<&str> for ErrorMessage<C> {
    fn from(message: &str) -> Self {
        Self::Literal(message.to_owned())
    }
}

impl<C> From<String> for ErrorMessage<C> {
    fn from(message: String) -> Self {
        Self::Literal(message)
    }
}

impl<C> Clone for ErrorMessage<C> {
    fn clone(&self) -> Self {
        match self {
            Self::Literal(text) => Self::Literal(text.clone()),
            Self::Sync(f) => Self::Sync(Arc::clone(f)),
            Self::Async(p) => Self::Async(Arc::clone(p)),
        }
    }
}

impl<C> fmt::Debug for ErrorMessage<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Sync(_) => f.write_str("Sync(..)"),
            Self::Async(_) => f.write_str("Async(..)"),
        }
    }
}

// ============================================================================
// ADAPTERS
// ============================================================================

struct PatternPredicate(Regex);

#[async_trait]
impl<C: RuleContent> Predicate<C> for PatternPredicate {
    async fn check(&self, content: &C, _args: &[String]) -> Result<Verdict, BoxError> {
        Ok(self.0.is_match(&content.pattern_text()).into())
    }
}

struct SyncPredicate<C>(Arc<SyncPredicateFn<C>>);

#[async_trait]
impl<C: Sync> Predicate<C> for SyncPredicate<C> {
    async fn check(&self, content: &C, args: &[String]) -> Result<Verdict, BoxError> {
        (self.0)(content, args)
    }
}

struct AsyncFnPredicate<F, C> {
    f: F,
    _marker: PhantomData<fn(C)>,
}

#[async_trait]
impl<C, F, Fut, R> Predicate<C> for AsyncFnPredicate<F, C>
where
    C: Clone + Send + Sync + 'static,
    F: Fn(C, Vec<String>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<R, BoxError>> + Send + 'static,
    R: Into<Verdict>,
{
    async fn check(&self, content: &C, args: &[String]) -> Result<Verdict, BoxError> {
        let raw = (self.f)(content.clone(), args.to_vec()).await?;
        Ok(raw.into())
    }
}

struct LiteralMessage(String);

#[async_trait]
impl<C: Sync> ErrorProducer<C> for LiteralMessage {
    async fn produce(&self, _content: &C, _args: &[String]) -> Result<String, BoxError> {
        Ok(self.0.clone())
    }
}

struct SyncMessage<C>(Arc<SyncMessageFn<C>>);

#[async_trait]
impl<C: Sync> ErrorProducer<C> for SyncMessage<C> {
    async fn produce(&self, content: &C, args: &[String]) -> Result<String, BoxError> {
        (self.0)(content, args)
    }
}

struct AsyncFnMessage<F, C> {
    f: F,
    _marker: PhantomData<fn(C)>,
}

#[async_trait]
impl<C, F, Fut, S> ErrorProducer<C> for AsyncFnMessage<F, C>
where
    C: Clone + Send + Sync + 'static,
    F: Fn(C, Vec<String>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<S, BoxError>> + Send + 'static,
    S: Into<String>,
{
    async fn produce(&self, content: &C, args: &[String]) -> Result<String, BoxError> {
        let message = (self.f)(content.clone(), args.to_vec()).await?;
        Ok(message.into())
    }
}

// ============================================================================
// RULE SPEC
// ============================================================================

/// Input to [`RuleRegistry::add_rule`](crate::registry::RuleRegistry::add_rule).
#[derive(Debug, Clone)]
pub struct RuleSpec<C> {
    /// Unique rule name, referenced from chain strings.
    pub name: String,
    /// Predicate half.
    pub control: Control<C>,
    /// Message half.
    pub error: ErrorMessage<C>,
}

impl<C> RuleSpec<C> {
    /// Creates a spec. `error` accepts message text directly.
    pub fn new(
        name: impl Into<String>,
        control: Control<C>,
        error: impl Into<ErrorMessage<C>>,
    ) -> Self {
        Self {
            name: name.into(),
            control,
            error: error.into(),
        }
    }
}

// ============================================================================
// RULE
// ============================================================================

/// A registered rule: a name plus the normalized async predicate and error
/// producer.
///
/// Cloning is cheap; both halves are reference-counted.
pub struct Rule<C> {
    name: String,
    kind: ControlKind,
    predicate: Arc<dyn Predicate<C>>,
    error: Arc<dyn ErrorProducer<C>>,
}

impl<C: RuleContent> Rule<C> {
    /// Normalizes a spec.
    pub fn new(spec: RuleSpec<C>) -> Self {
        let kind = spec.control.kind();
        let predicate: Arc<dyn Predicate<C>> = match spec.control {
            Control::Pattern(re) => Arc::new(PatternPredicate(re)),
            Control::Sync(f) => Arc::new(SyncPredicate(f)),
            Control::Async(p) => p,
        };
        let error: Arc<dyn ErrorProducer<C>> = match spec.error {
            ErrorMessage::Literal(text) => Arc::new(LiteralMessage(text)),
            ErrorMessage::Sync(f) => Arc::new(SyncMessage(f)),
            ErrorMessage::Async(p) => p,
        };
        Self {
            name: spec.name,
            kind,
            predicate,
            error,
        }
    }

    /// Awaits the predicate.
    pub async fn verify(&self, content: &C, args: &[String]) -> Result<Verdict, BoxError> {
        self.predicate.check(content, args).await
    }

    /// Awaits the error producer.
    pub async fn error_message(&self, content: &C, args: &[String]) -> Result<String, BoxError> {
        self.error.produce(content, args).await
    }
}

impl<C> Rule<C> {
    /// Rule name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shape the control was registered as.
    pub fn control_kind(&self) -> ControlKind {
        self.kind
    }
}

impl<C: RuleContent> From<RuleSpec<C>> for Rule<C> {
    fn from(spec: RuleSpec<C>) -> Self {
        Self::new(spec)
    }
}

impl<C> Clone for Rule<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            predicate: Arc::clone(&self.predicate),
            error: Arc::clone(&self.error),
        }
    }
}

impl<C> fmt::Debug for Rule<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("control", &self.kind)
            .finish_non_exhaustive()
    }
}
