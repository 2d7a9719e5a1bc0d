//! File validator
//!
//! A [`FileValidator<Single>`] accepts one [`FileValue`].
//! [`multiple_files`](FileValidator::multiple_files) switches to
//! [`FileValidator<Multiple>`], which reads a list and gains the count rules.

use crate::foundation::{
    FailureMessage, FileValue, Infer, ReadMode, Refine, Rule, RuleConfig, RuleOutcome, SchemaKind,
    Value,
};
use crate::validators::join_display;

// ============================================================================
// MODES
// ============================================================================

/// How many files a [`FileValidator`] reads.
pub trait FileMode: std::fmt::Debug + Clone + Copy + Send + Sync + 'static {
    const READ_MODE: ReadMode;

    /// Whether a present value has the shape this mode reads.
    fn accepts(value: &Value) -> bool;
}

/// One file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Single;

/// A list of files. A lone file counts as a list of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multiple;

impl FileMode for Single {
    const READ_MODE: ReadMode = ReadMode::Single;

    fn accepts(value: &Value) -> bool {
        matches!(value, Value::File(_))
    }
}

impl FileMode for Multiple {
    const READ_MODE: ReadMode = ReadMode::Multi;

    fn accepts(value: &Value) -> bool {
        files(value).is_some()
    }
}

/// The files in `value`, or `None` if anything in it is not a file.
fn files(value: &Value) -> Option<Vec<&FileValue>> {
    match value {
        Value::File(file) => Some(vec![file]),
        Value::Array(items) => items.iter().map(Value::as_file).collect(),
        _ => None,
    }
}

fn file_count(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.len(),
        v if v.is_absent() => 0,
        _ => 1,
    }
}

/// A check over every file in the value. Absent passes; malformed values fail.
fn each_file<F>(title: &'static str, f: F) -> Rule
where
    F: Fn(&FileValue) -> bool + Send + Sync + 'static,
{
    Rule::check(title, move |v: &Value| {
        if v.is_absent() {
            return RuleOutcome::pass();
        }
        RuleOutcome::from_bool(files(v).is_some_and(|list| list.into_iter().all(&f)))
    })
}

/// Renders a per-file field for messages: `120` or `120, invalid`.
fn describe(value: &Value, field: impl Fn(&FileValue) -> String) -> String {
    match value {
        Value::File(file) => field(file),
        Value::Array(items) => {
            let shown: Vec<String> = items
                .iter()
                .map(|item| item.as_file().map_or_else(|| "invalid".to_owned(), &field))
                .collect();
            join_display(&shown, ", ")
        }
        _ => "invalid".to_owned(),
    }
}

// ============================================================================
// VALIDATOR
// ============================================================================

crate::schema_type! {
    /// Validates uploaded files.
    ///
    /// ```rust
    /// use tessera_validator::prelude::*;
    ///
    /// let avatar = inp().file().max_size(1024).mime_type(["image/png", "image/jpeg"]);
    ///
    /// assert!(avatar.validate(FileValue::new("me.png", 512, "image/png")).ok);
    /// assert!(!avatar.validate(FileValue::new("me.gif", 512, "image/gif")).ok);
    /// assert!(!avatar.validate("me.png").ok);
    /// ```
    pub FileValidator<M: FileMode> => SchemaKind::File;
    required: "This field is required.";
}

impl Default for FileValidator<Single> {
    fn default() -> Self {
        Self::new()
    }
}

impl FileValidator<Single> {
    pub fn new() -> Self {
        Self::empty().required().is_valid_type()
    }

    /// A list-mode copy of this validator with the same rules. `self` is
    /// left untouched.
    pub fn multiple_files(&self) -> FileValidator<Multiple> {
        let mut node = self.node.clone();
        node.set_read_mode(Multiple::READ_MODE);
        FileValidator::<Multiple>::from_node(node).is_valid_type()
    }
}

impl<M: FileMode> FileValidator<M> {
    /// Requires a file (or, in list mode, files). Installed by default.
    #[must_use = "builder methods must be chained or built"]
    pub fn is_valid_type(self) -> Self {
        self.with_rule(
            Rule::check("isValidType", |v: &Value| {
                RuleOutcome::from_bool(v.is_absent() || M::accepts(v))
            })
            .with_message("Value must be a file or an array of files"),
        )
    }

    /// Upper bound on each file's size in bytes.
    #[must_use = "builder methods must be chained or built"]
    pub fn max_size(self, bytes: u64) -> Self {
        self.with_rule(
            each_file("maxSize", move |f| f.size <= bytes)
                .with_config(RuleConfig::Count(usize::try_from(bytes).unwrap_or(usize::MAX)))
                .with_message(FailureMessage::from_fn(move |ctx| {
                    let sizes = describe(ctx.value, |f| f.size.to_string());
                    format!("File size must not exceed {bytes} bytes. Got {sizes}")
                })),
        )
    }

    /// Lower bound on each file's size in bytes.
    #[must_use = "builder methods must be chained or built"]
    pub fn min_size(self, bytes: u64) -> Self {
        self.with_rule(
            each_file("minSize", move |f| f.size >= bytes)
                .with_config(RuleConfig::Count(usize::try_from(bytes).unwrap_or(usize::MAX)))
                .with_message(format!("File must be at least {bytes} bytes")),
        )
    }

    /// Allow-list for each file's MIME type, compared exactly.
    #[must_use = "builder methods must be chained or built"]
    pub fn mime_type<I, S>(self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let types: Vec<String> = types.into_iter().map(Into::into).collect();
        let expected = join_display(&types, " or ");
        let allowed = types.clone();
        self.with_rule(
            each_file("mimeType", move |f| allowed.contains(&f.mime_type))
                .with_config(RuleConfig::Texts(types))
                .with_message(FailureMessage::from_fn(move |ctx| {
                    let got = describe(ctx.value, |f| f.mime_type.clone());
                    format!("File must be of type {expected}. Got {got}")
                })),
        )
    }
}

impl FileValidator<Multiple> {
    #[must_use = "builder methods must be chained or built"]
    pub fn min_files_count(self, count: usize) -> Self {
        self.with_rule(
            Rule::check("minFilesCount", move |v: &Value| {
                RuleOutcome::from_bool(v.is_absent() || file_count(v) >= count)
            })
            .with_config(RuleConfig::Count(count))
            .with_message(FailureMessage::from_fn(move |ctx| {
                format!("Minimum number of files is {count}. Got {}", file_count(ctx.value))
            })),
        )
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn max_files_count(self, count: usize) -> Self {
        self.with_rule(
            Rule::check("maxFilesCount", move |v: &Value| {
                RuleOutcome::from_bool(v.is_absent() || file_count(v) <= count)
            })
            .with_config(RuleConfig::Count(count))
            .with_message(FailureMessage::from_fn(move |ctx| {
                format!("Maximum number of files is {count}. Got {}", file_count(ctx.value))
            })),
        )
    }
}

impl Infer for FileValidator<Single> {
    type Output = FileValue;

    fn extract(value: Value) -> Option<FileValue> {
        match value {
            Value::File(file) => Some(file),
            _ => None,
        }
    }
}

impl Infer for FileValidator<Multiple> {
    type Output = Vec<FileValue>;

    fn extract(value: Value) -> Option<Vec<FileValue>> {
        match value {
            Value::File(file) => Some(vec![file]),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::File(file) => Some(file),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
