//! Error types for validation failures
//!
//! Data problems are reported as [`ValidationError`] values inside a
//! validation result; the engine never panics or returns `Err` because an
//! input was wrong. Schema-construction misuse that cannot be prevented by
//! the type system is reported once, up front, as a [`SchemaError`].
//!
//! All string fields use `Cow<'static, str>` for zero-allocation in the
//! common case of static rule titles and messages.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ============================================================================
// ERROR SOURCE / KIND
// ============================================================================

/// Where the collaborator extracted the raw value from.
///
/// The engine never fills this in on its own; it only carries it from the
/// validation context onto every error it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Source {
    Query,
    Body,
    FormData,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Query => "query",
            Self::Body => "body",
            Self::FormData => "formData",
        })
    }
}

/// Classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The value was absent and the schema requires it.
    MissingRequired,
    /// The value is present but of the wrong shape.
    TypeMismatch,
    /// A refinement (length, range, format, enum, mime, size, ...) failed.
    #[default]
    ConstraintViolation,
    /// A transformer could not produce a value.
    TransformFailure,
    /// A child of an object or array failed; the key carries the full path.
    NestedFieldFailure,
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

type Params = SmallVec<[(Cow<'static, str>, Cow<'static, str>); 2]>;

/// A single failed rule, addressed by its path key.
///
/// # Examples
///
/// ```rust
/// use tessera_validator::foundation::{ErrorKind, ValidationError};
///
/// let error = ValidationError::new("min", "String must be at least 3 characters long")
///     .with_key("user.name")
///     .with_param("min", "3");
///
/// assert_eq!(error.key, "user.name");
/// assert_eq!(error.param("min"), Some("3"));
/// assert_eq!(error.kind, ErrorKind::ConstraintViolation);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Human-readable message.
    pub message: Cow<'static, str>,

    /// Dot/bracket-joined path (`user.tags[2]`); empty for the root value.
    pub key: Cow<'static, str>,

    /// Transport location, set by the collaborator's context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Source>,

    /// Title of the rule that produced the error (`required`, `min`, `email`).
    pub code: Cow<'static, str>,

    pub kind: ErrorKind,

    /// Rule parameters, typically 0-2 entries.
    #[serde(skip_serializing_if = "SmallVec::is_empty")]
    pub params: Params,
}

impl ValidationError {
    /// Creates a root-level error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            key: Cow::Borrowed(""),
            from: None,
            code: code.into(),
            kind: ErrorKind::ConstraintViolation,
            params: SmallVec::new(),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_key(mut self, key: impl Into<Cow<'static, str>>) -> Self {
        self.key = key.into();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_source(mut self, from: Source) -> Self {
        self.from = Some(from);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Returns true if the error refers to the validated value itself.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.key.is_empty()
    }

    /// Re-addresses the error under `prefix` and marks it as coming from a
    /// nested schema.
    #[must_use]
    pub fn nested_under(mut self, prefix: &str) -> Self {
        self.key = Cow::Owned(crate::foundation::node::join_path(prefix, &self.key));
        self.kind = ErrorKind::NestedFieldFailure;
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.key.is_empty() {
            write!(f, "{}: {}", self.code, self.message)?;
        } else {
            write!(f, "[{}] {}: {}", self.key, self.code, self.message)?;
        }

        if let Some(from) = self.from {
            write!(f, " (from {from})")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

/// An ordered collection of validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = ValidationError>) {
        self.errors.extend(errors);
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Errors addressed to exactly `key`.
    pub fn by_key<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors.iter().filter(move |e| e.key == key)
    }

    /// Messages addressed to exactly `key`, in order.
    #[must_use]
    pub fn messages_for(&self, key: &str) -> Vec<&str> {
        self.by_key(key).map(|e| e.message.as_ref()).collect()
    }

    /// Converts to a Result.
    #[must_use = "result must be used"]
    pub fn into_result<T>(self, ok_value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(ok_value)
        } else {
            Err(self)
        }
    }

    /// Groups messages by key: `{"errors": {"user.name": ["..."]}}`.
    ///
    /// This is the payload shape HTTP layers usually return with a 400.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let mut grouped = serde_json::Map::new();
        for error in &self.errors {
            let entry = grouped
                .entry(error.key.to_string())
                .or_insert_with(|| serde_json::Value::Array(Vec::new()));
            if let serde_json::Value::Array(messages) = entry {
                messages.push(serde_json::Value::String(error.message.to_string()));
            }
        }
        serde_json::json!({ "errors": grouped })
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// SCHEMA ERROR
// ============================================================================

/// Invalid schema definitions caught while building a validator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("unknown timezone `{0}`")]
    UnknownTimezone(String),

    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("cannot interpret `{0}` as a date")]
    InvalidDateBound(String),

    #[error("invalid range: min ({min}) is greater than max ({max})")]
    InvalidRange { min: f64, max: f64 },
}

impl SchemaError {
    pub(crate) fn pattern(pattern: &str, err: &regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: err.to_string(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
