//! Rules: the unit of validation and transformation.
//!
//! A [`Rule`] is a named predicate over the in-flight [`Value`]. It may
//! propose a replacement value ([`RuleOutcome::value`]), and it carries the
//! message to report when it fails. Rules are plain data plus a shared
//! closure, so a schema is cheap to clone and safe to share across threads.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Weekday};
use chrono_tz::Tz;
use regex::Regex;

use crate::config::DateFormat;
use crate::foundation::value::display_number;
use crate::foundation::{ErrorKind, SchemaRef, ValidationError, Value};

/// Shared predicate.
pub type Predicate = Arc<dyn Fn(&Value) -> RuleOutcome + Send + Sync>;

/// Shared message builder.
pub type MessageFn = Arc<dyn Fn(&MessageContext<'_>) -> Vec<String> + Send + Sync>;

// ============================================================================
// RULE KIND / OUTCOME
// ============================================================================

/// Which phase of the pipeline a rule runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Runs before every check and may rewrite the value.
    Transform,
    /// Runs after all transformers. May still normalize the value.
    Check,
}

/// What a rule reports for one value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleOutcome {
    pub ok: bool,
    /// Replacement value. Applied whether or not the rule passed.
    pub value: Option<Value>,
    /// Diagnostics from nested schemas, keyed relative to this node
    /// (`[2]`, `[0].name`). Reported only when the rule fails.
    pub issues: Vec<ValidationError>,
}

impl RuleOutcome {
    #[must_use]
    pub fn pass() -> Self {
        Self {
            ok: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn fail() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_bool(ok: bool) -> Self {
        Self {
            ok,
            ..Self::default()
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_issues(mut self, issues: Vec<ValidationError>) -> Self {
        self.issues = issues;
        self
    }
}

impl From<bool> for RuleOutcome {
    fn from(ok: bool) -> Self {
        Self::from_bool(ok)
    }
}

// ============================================================================
// RULE CONFIG
// ============================================================================

/// The parameter a rule was declared with.
///
/// Predicates capture their parameters directly; the config is kept on the
/// rule so message builders and documentation generators can read it without
/// parsing messages.
#[derive(Debug, Clone, Default)]
pub enum RuleConfig {
    #[default]
    None,
    Number(f64),
    Range(f64, f64),
    Count(usize),
    Text(String),
    Texts(Vec<String>),
    Pattern(Regex),
    Flag(bool),
    Instant(DateTime<FixedOffset>),
    Instants(Vec<DateTime<FixedOffset>>),
    Weekdays(Vec<Weekday>),
    Timezone(Tz),
    Format(DateFormat),
    Value(Value),
    Values(Vec<Value>),
    Schema(SchemaRef),
}

impl RuleConfig {
    /// Parameters attached to errors of a rule declared with this config.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Number(n) => vec![("limit", display_number(*n))],
            Self::Range(min, max) => vec![
                ("min", display_number(*min)),
                ("max", display_number(*max)),
            ],
            Self::Count(n) => vec![("limit", n.to_string())],
            Self::Text(text) => vec![("expected", text.clone())],
            Self::Texts(texts) => vec![("expected", texts.join(", "))],
            Self::Pattern(re) => vec![("pattern", re.as_str().to_owned())],
            Self::Instant(date) => vec![("limit", date.to_rfc3339())],
            Self::Timezone(tz) => vec![("timezone", tz.name().to_owned())],
            Self::Format(format) => vec![("format", format.format.clone())],
            Self::Value(value) => vec![("expected", value.to_string())],
            _ => Vec::new(),
        }
    }
}

// ============================================================================
// FAILURE MESSAGE
// ============================================================================

/// Inputs available when a failure message is computed.
#[derive(Debug)]
pub struct MessageContext<'a> {
    /// The value the rule inspected (before any replacement it proposed).
    pub value: &'a Value,
    pub outcome: &'a RuleOutcome,
    pub config: &'a RuleConfig,
}

/// A fixed message, or one computed from the failing value.
#[derive(Clone)]
pub enum FailureMessage {
    Static(Cow<'static, str>),
    Computed(MessageFn),
}

impl FailureMessage {
    /// A message computed from the failure context.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&MessageContext<'_>) -> String + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(move |ctx| vec![f(ctx)]))
    }

    /// A message builder that may report several messages at once.
    pub fn from_fn_many<F>(f: F) -> Self
    where
        F: Fn(&MessageContext<'_>) -> Vec<String> + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    pub(crate) fn resolve(&self, ctx: &MessageContext<'_>) -> Vec<Cow<'static, str>> {
        match self {
            Self::Static(message) => vec![message.clone()],
            Self::Computed(f) => f(ctx).into_iter().map(Cow::Owned).collect(),
        }
    }
}

impl fmt::Debug for FailureMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(message) => f.debug_tuple("Static").field(message).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&'static str> for FailureMessage {
    fn from(message: &'static str) -> Self {
        Self::Static(Cow::Borrowed(message))
    }
}

impl From<String> for FailureMessage {
    fn from(message: String) -> Self {
        Self::Static(Cow::Owned(message))
    }
}

impl From<Cow<'static, str>> for FailureMessage {
    fn from(message: Cow<'static, str>) -> Self {
        Self::Static(message)
    }
}

// ============================================================================
// RULE
// ============================================================================

/// One named check or transform attached to a validation node.
///
/// # Examples
///
/// ```rust
/// use tessera_validator::foundation::{Rule, RuleOutcome, Value};
///
/// let rule = Rule::check("even", |v: &Value| {
///     RuleOutcome::from_bool(v.as_f64().is_none_or(|n| n % 2.0 == 0.0))
/// })
/// .with_message("Number must be even");
///
/// assert!(rule.apply(&Value::from(4)).ok);
/// assert!(!rule.apply(&Value::from(3)).ok);
/// ```
#[derive(Clone)]
pub struct Rule {
    title: Cow<'static, str>,
    kind: RuleKind,
    config: RuleConfig,
    predicate: Predicate,
    message: FailureMessage,
}

impl Rule {
    pub fn new<F>(kind: RuleKind, title: impl Into<Cow<'static, str>>, predicate: F) -> Self
    where
        F: Fn(&Value) -> RuleOutcome + Send + Sync + 'static,
    {
        let title = title.into();
        let message = FailureMessage::Static(Cow::Owned(format!("Validation failed for {title}")));
        Self {
            title,
            kind,
            config: RuleConfig::None,
            predicate: Arc::new(predicate),
            message,
        }
    }

    /// A check-phase rule.
    pub fn check<F>(title: impl Into<Cow<'static, str>>, predicate: F) -> Self
    where
        F: Fn(&Value) -> RuleOutcome + Send + Sync + 'static,
    {
        Self::new(RuleKind::Check, title, predicate)
    }

    /// A transform-phase rule.
    pub fn transform<F>(title: impl Into<Cow<'static, str>>, predicate: F) -> Self
    where
        F: Fn(&Value) -> RuleOutcome + Send + Sync + 'static,
    {
        Self::new(RuleKind::Transform, title, predicate)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_config(mut self, config: RuleConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<FailureMessage>) -> Self {
        self.message = message.into();
        self
    }

    pub(crate) fn set_message(&mut self, message: FailureMessage) {
        self.message = message;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub const fn kind(&self) -> RuleKind {
        self.kind
    }

    pub const fn config(&self) -> &RuleConfig {
        &self.config
    }

    pub const fn message(&self) -> &FailureMessage {
        &self.message
    }

    pub fn is_transformer(&self) -> bool {
        self.kind == RuleKind::Transform
    }

    /// Runs the predicate against `value`.
    pub fn apply(&self, value: &Value) -> RuleOutcome {
        (self.predicate)(value)
    }

    /// Default classification of this rule's failures.
    pub fn error_kind(&self) -> ErrorKind {
        match (self.title.as_ref(), self.kind) {
            ("required", _) => ErrorKind::MissingRequired,
            ("isValidType", _) => ErrorKind::TypeMismatch,
            (_, RuleKind::Transform) => ErrorKind::TransformFailure,
            (_, RuleKind::Check) => ErrorKind::ConstraintViolation,
        }
    }

    /// Builds the root-level errors for a failed outcome.
    pub(crate) fn failures(&self, value: &Value, outcome: &RuleOutcome) -> Vec<ValidationError> {
        let ctx = MessageContext {
            value,
            outcome,
            config: &self.config,
        };
        let kind = self.error_kind();
        let params = self.config.params();
        self.message
            .resolve(&ctx)
            .into_iter()
            .map(|message| {
                params.iter().fold(
                    ValidationError::new(self.title.clone(), message).with_kind(kind),
                    |error, (key, value)| error.with_param(*key, value.clone()),
                )
            })
            .collect()
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("title", &self.title)
            .field("kind", &self.kind)
            .field("config", &self.config)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================
