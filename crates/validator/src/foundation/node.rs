//! The validation node and its rule pipeline.
//!
//! Every validator owns one [`ValidationNode`]. Running a node threads the
//! value through its transformers, then its checks, and collects every
//! failure; nothing short-circuits. Composite validators run their own node
//! first and then recurse into children (see `validators::object`).

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::foundation::{
    FailureMessage, Rule, RuleKind, Source, ValidationError, ValidationErrors, Value,
};

// ============================================================================
// SCHEMA KIND / READ MODE
// ============================================================================

/// Type tag of a validation node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    String,
    Number,
    Boolean,
    Date,
    File,
    Array,
    Object,
    Any,
    #[default]
    Unset,
}

impl SchemaKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::File => "file",
            Self::Array => "array",
            Self::Object => "object",
            Self::Any => "any",
            Self::Unset => "unset",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a form-data style collaborator should read the raw slot: one value,
/// or every value sharing the name. The engine itself never reads this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadMode {
    #[default]
    Single,
    Multi,
}

// ============================================================================
// VALIDATION NODE
// ============================================================================

/// An ordered list of rules with a type tag.
///
/// No two rules share a title: adding a rule whose title is already present
/// replaces the existing one in place.
#[derive(Debug, Clone, Default)]
pub struct ValidationNode {
    rules: Vec<Rule>,
    kind: SchemaKind,
    read_mode: ReadMode,
    last_added: Option<String>,
}

impl ValidationNode {
    #[must_use]
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub const fn kind(&self) -> SchemaKind {
        self.kind
    }

    pub const fn read_mode(&self) -> ReadMode {
        self.read_mode
    }

    pub(crate) fn set_read_mode(&mut self, mode: ReadMode) {
        self.read_mode = mode;
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, title: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.title() == title)
    }

    pub fn has_rule(&self, title: &str) -> bool {
        self.rule(title).is_some()
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.title() == title)
    }

    /// Appends `rule`, or replaces the rule with the same title in place.
    pub fn add_rule(&mut self, rule: Rule) {
        self.last_added = Some(rule.title().to_owned());
        match self.position(rule.title()) {
            Some(index) => self.rules[index] = rule,
            None => self.rules.push(rule),
        }
    }

    /// Puts `rule` at the front of the list, dropping any rule with the same
    /// title.
    pub fn insert_rule_first(&mut self, rule: Rule) {
        self.last_added = Some(rule.title().to_owned());
        if let Some(index) = self.position(rule.title()) {
            self.rules.remove(index);
        }
        self.rules.insert(0, rule);
    }

    /// Removes the rule titled `title`, returning it.
    pub fn remove_rule(&mut self, title: &str) -> Option<Rule> {
        let index = self.position(title)?;
        if self.last_added.as_deref() == Some(title) {
            self.last_added = None;
        }
        Some(self.rules.remove(index))
    }

    /// Replaces the failure message of the rule titled `title`.
    pub fn set_message(&mut self, title: &str, message: FailureMessage) -> bool {
        match self.rules.iter_mut().find(|r| r.title() == title) {
            Some(rule) => {
                rule.set_message(message);
                true
            }
            None => false,
        }
    }

    /// Title of the most recently added rule, if it is still present.
    pub fn last_added(&self) -> Option<&str> {
        self.last_added.as_deref()
    }

    /// Runs the rule pipeline. Error keys are relative to this node.
    pub fn run(&self, value: Value) -> Evaluation {
        let mut current = value;
        let mut errors = Vec::new();

        for phase in [RuleKind::Transform, RuleKind::Check] {
            for rule in self.rules.iter().filter(|r| r.kind() == phase) {
                let outcome = rule.apply(&current);
                if !outcome.ok {
                    trace!(rule = rule.title(), kind = %self.kind, "rule failed");
                    errors.extend(outcome.issues.iter().cloned());
                    errors.extend(rule.failures(&current, &outcome));
                }
                if let Some(next) = outcome.value {
                    current = next;
                }
            }
        }

        Evaluation {
            value: current,
            errors,
        }
    }

    /// Runs the pipeline and addresses errors under the context's prefix.
    pub fn validate(&self, value: Value, ctx: &ValidateContext) -> ValidateResult<'_> {
        self.run(value).finish(self, ctx)
    }
}

// ============================================================================
// CONTEXT
// ============================================================================

/// A path segment appended after the context key.
#[derive(Clone)]
pub enum PathPrefix {
    Static(String),
    /// Computed from the final value.
    Computed(fn(&Value) -> String),
}

impl fmt::Debug for PathPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(prefix) => f.debug_tuple("Static").field(prefix).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Per-call options supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct ValidateContext {
    /// External name of the field, e.g. the query parameter.
    pub key: Option<String>,
    pub path_prefix: Option<PathPrefix>,
    /// Stamped onto every error that does not carry a source yet.
    pub from: Option<Source>,
}

impl ValidateContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = Some(PathPrefix::Static(prefix.into()));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_computed_prefix(mut self, prefix: fn(&Value) -> String) -> Self {
        self.path_prefix = Some(PathPrefix::Computed(prefix));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_source(mut self, from: Source) -> Self {
        self.from = Some(from);
        self
    }

    /// The key prefix every error of this call is placed under.
    pub fn prefix(&self, value: &Value) -> String {
        let key = self.key.as_deref().unwrap_or("");
        match &self.path_prefix {
            Some(PathPrefix::Static(prefix)) => join_path(key, prefix),
            Some(PathPrefix::Computed(f)) => join_path(key, &f(value)),
            None => key.to_owned(),
        }
    }
}

/// Joins two path segments.
///
/// Empty segments vanish, bracketed segments (`[3]`) attach directly and
/// anything else is separated by a dot.
///
/// ```rust
/// use tessera_validator::foundation::join_path;
///
/// assert_eq!(join_path("user", "name"), "user.name");
/// assert_eq!(join_path("tags", "[2]"), "tags[2]");
/// assert_eq!(join_path("", "name"), "name");
/// assert_eq!(join_path("user", ""), "user");
/// ```
pub fn join_path(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_owned()
    } else if child.is_empty() {
        parent.to_owned()
    } else if child.starts_with('[') {
        format!("{parent}{child}")
    } else {
        format!("{parent}.{child}")
    }
}

// ============================================================================
// RESULTS
// ============================================================================

/// Pipeline output before it is addressed for a caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub value: Value,
    /// Errors with keys relative to the evaluated node.
    pub errors: Vec<ValidationError>,
}

impl Evaluation {
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Addresses every error under the context prefix and stamps the source.
    pub fn finish<'a>(self, source: &'a ValidationNode, ctx: &ValidateContext) -> ValidateResult<'a> {
        let prefix = ctx.prefix(&self.value);
        let errors: Vec<_> = self
            .errors
            .into_iter()
            .map(|mut error| {
                if !prefix.is_empty() {
                    error.key = Cow::Owned(join_path(&prefix, &error.key));
                }
                if error.from.is_none() {
                    error.from = ctx.from;
                }
                error
            })
            .collect();

        ValidateResult {
            ok: errors.is_empty(),
            value: self.value,
            errors,
            source,
        }
    }
}

/// Result of validating one value.
#[derive(Debug, Clone)]
pub struct ValidateResult<'a> {
    pub ok: bool,
    /// The value after every transformer ran. Use this, not the raw input.
    pub value: Value,
    pub errors: Vec<ValidationError>,
    /// The node that produced this result.
    pub source: &'a ValidationNode,
}

impl ValidateResult<'_> {
    pub const fn is_ok(&self) -> bool {
        self.ok
    }

    /// Messages addressed to exactly `key`.
    pub fn messages_for(&self, key: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.key == key)
            .map(|e| e.message.as_ref())
            .collect()
    }

    /// The transformed value, or every error.
    pub fn into_result(self) -> Result<Value, ValidationErrors> {
        if self.ok {
            Ok(self.value)
        } else {
            Err(self.errors.into())
        }
    }

    /// Deserializes the transformed value into `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::to_value(&self.value).and_then(serde_json::from_value)
    }
}

// ============================================================================
// TESTS
// ============================================================================
