//! String validator
//!
//! Lengths count characters, not bytes. `trim` and `to_lower_case` are
//! transformers, so they run before every check no matter where they appear
//! in the chain. `to_upper_case` normalizes in declaration order.

use std::net::IpAddr;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::foundation::{
    FailureMessage, Infer, Refine, Rule, RuleConfig, RuleOutcome, SchemaError, SchemaKind,
    Value,
};
use crate::validators::{NumberValidator, join_display, type_check};

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static DATETIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[-+]\d{2}:?\d{2})?$").unwrap()
});

static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

static TIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[01]\d|2[0-3]):[0-5]\d:[0-5]\d(?:\.\d+)?$").unwrap());

static BASE64_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+/]*={0,2}$").unwrap());

/// Plain decimal notation: optional minus, digits, optional fraction.
static NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(\d+(\.\d*)?|\.\d+)$").unwrap());

crate::schema_type! {
    /// Validates strings.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tessera_validator::prelude::*;
    ///
    /// let username = inp().string().trim().min(3).max(20);
    ///
    /// assert!(username.validate(" alice ").ok);
    /// assert!(!username.validate("al").ok);
    /// assert!(!username.validate(Value::Null).ok);
    /// ```
    pub StringValidator => SchemaKind::String;
    required: "This field must be a string and is required.";
}

/// A check over string values: absent passes, non-strings fail.
fn text_rule<F>(title: &'static str, f: F) -> Rule
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    Rule::check(title, move |v: &Value| match v {
        Value::String(s) => RuleOutcome::from_bool(f(s)),
        other => RuleOutcome::from_bool(other.is_absent()),
    })
}

/// A rewrite of string values: absent passes untouched, non-strings fail.
fn text_rewrite<F>(title: &'static str, f: F) -> Rule
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    Rule::transform(title, move |v: &Value| match v {
        Value::String(s) => RuleOutcome::pass().with_value(Value::String(f(s))),
        other => RuleOutcome::from_bool(other.is_absent()),
    })
}

/// Parses `s` if it is written in plain decimal notation.
///
/// Rejects a leading `+`, exponents, separators, `NaN`/`Infinity` and
/// surrounding whitespace.
pub(crate) fn parse_strict_number(s: &str) -> Option<f64> {
    if NUMBER_REGEX.is_match(s) {
        s.parse().ok()
    } else {
        None
    }
}

impl Default for StringValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl StringValidator {
    pub fn new() -> Self {
        Self::empty().required().is_valid_type()
    }

    /// Requires the value, when present, to be a string. Installed by default.
    #[must_use = "builder methods must be chained or built"]
    pub fn is_valid_type(self) -> Self {
        self.with_rule(type_check(
            |v| matches!(v, Value::String(_)),
            "Value must be a string",
        ))
    }

    // ------------------------------------------------------------------------
    // Transformers
    // ------------------------------------------------------------------------

    /// Strips leading and trailing whitespace.
    #[must_use = "builder methods must be chained or built"]
    pub fn trim(self) -> Self {
        self.with_rule(
            text_rewrite("trim", |s| s.trim().to_owned()).with_message("This field is not a string."),
        )
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn to_lower_case(self) -> Self {
        self.with_rule(text_rewrite("toLowerCase", str::to_lowercase).with_message("Value must be a string"))
    }

    /// Upper-cases the value. Unlike `to_lower_case` this runs with the checks,
    /// so checks declared before it see the original casing.
    #[must_use = "builder methods must be chained or built"]
    pub fn to_upper_case(self) -> Self {
        self.with_rule(
            Rule::check("toUpperCase", |v: &Value| match v {
                Value::String(s) => RuleOutcome::pass().with_value(Value::String(s.to_uppercase())),
                other => RuleOutcome::from_bool(other.is_absent()),
            })
            .with_message("Value must be a string"),
        )
    }

    // ------------------------------------------------------------------------
    // Length
    // ------------------------------------------------------------------------

    #[must_use = "builder methods must be chained or built"]
    pub fn min(self, min: usize) -> Self {
        self.with_rule(
            text_rule("min", move |s| s.chars().count() >= min)
                .with_config(RuleConfig::Count(min))
                .with_message(format!("String must be at least {min} characters long")),
        )
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn max(self, max: usize) -> Self {
        self.with_rule(
            text_rule("max", move |s| s.chars().count() <= max)
                .with_config(RuleConfig::Count(max))
                .with_message(format!("String must be at most {max} characters long")),
        )
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn length(self, length: usize) -> Self {
        self.with_rule(
            text_rule("length", move |s| s.chars().count() == length)
                .with_config(RuleConfig::Count(length))
                .with_message(format!("String must be exactly {length} characters long")),
        )
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn not_empty(self) -> Self {
        self.with_rule(text_rule("notEmpty", |s| !s.is_empty()).with_message("String must not be empty"))
    }

    // ------------------------------------------------------------------------
    // Formats
    // ------------------------------------------------------------------------

    #[must_use = "builder methods must be chained or built"]
    pub fn email(self) -> Self {
        self.with_rule(text_rule("email", |s| EMAIL_REGEX.is_match(s)).with_message("Invalid email address"))
    }

    /// Any absolute URL the WHATWG parser accepts (`ftp://` included).
    #[must_use = "builder methods must be chained or built"]
    pub fn url(self) -> Self {
        self.with_rule(text_rule("url", |s| url::Url::parse(s).is_ok()).with_message("Invalid URL"))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn regex(self, pattern: Regex) -> Self {
        let re = pattern.clone();
        self.with_rule(
            text_rule("regex", move |s| re.is_match(s))
                .with_config(RuleConfig::Pattern(pattern))
                .with_message("String does not match pattern"),
        )
    }

    /// Like [`regex`](Self::regex), compiling `pattern` first.
    pub fn try_regex(self, pattern: &str) -> Result<Self, SchemaError> {
        let re = Regex::new(pattern).map_err(|err| SchemaError::pattern(pattern, &err))?;
        Ok(self.regex(re))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn includes(self, needle: impl Into<String>) -> Self {
        let needle = needle.into();
        let message = format!("String must include \"{needle}\"");
        let n = needle.clone();
        self.with_rule(
            text_rule("includes", move |s| s.contains(n.as_str()))
                .with_config(RuleConfig::Text(needle))
                .with_message(message),
        )
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn starts_with(self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let message = format!("String must start with \"{prefix}\"");
        let p = prefix.clone();
        self.with_rule(
            text_rule("startsWith", move |s| s.starts_with(p.as_str()))
                .with_config(RuleConfig::Text(prefix))
                .with_message(message),
        )
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn ends_with(self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        let message = format!("String must end with \"{suffix}\"");
        let p = suffix.clone();
        self.with_rule(
            text_rule("endsWith", move |s| s.ends_with(p.as_str()))
                .with_config(RuleConfig::Text(suffix))
                .with_message(message),
        )
    }

    /// ISO 8601 datetime with optional fraction and offset.
    #[must_use = "builder methods must be chained or built"]
    pub fn datetime(self) -> Self {
        self.with_rule(
            text_rule("datetime", |s| DATETIME_REGEX.is_match(s))
                .with_message("Invalid ISO 8601 datetime"),
        )
    }

    /// IPv4 or IPv6 address.
    #[must_use = "builder methods must be chained or built"]
    pub fn ip(self) -> Self {
        self.with_rule(text_rule("ip", |s| s.parse::<IpAddr>().is_ok()).with_message("Invalid IP address"))
    }

    /// `YYYY-MM-DD`. Shape only; use a date validator for calendar checks.
    #[must_use = "builder methods must be chained or built"]
    pub fn date(self) -> Self {
        self.with_rule(
            text_rule("date", |s| DATE_REGEX.is_match(s))
                .with_message("Invalid ISO date format (YYYY-MM-DD)"),
        )
    }

    /// `HH:mm:ss` with an optional fraction.
    #[must_use = "builder methods must be chained or built"]
    pub fn time(self) -> Self {
        self.with_rule(
            text_rule("time", |s| TIME_REGEX.is_match(s))
                .with_message("Invalid ISO time format (HH:mm:ss[.SSSSSS])"),
        )
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn base64(self) -> Self {
        self.with_rule(text_rule("base64", |s| BASE64_REGEX.is_match(s)).with_message("Invalid base64 string"))
    }

    /// Restricts the value to `values`.
    #[must_use = "builder methods must be chained or built"]
    pub fn one_of<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        let message = format!("Value must be one of: {}", join_display(&values, ", "));
        let allowed = values.clone();
        self.with_rule(
            text_rule("enum", move |s| allowed.iter().any(|a| a == s))
                .with_config(RuleConfig::Texts(values))
                .with_message(message),
        )
    }

    // ------------------------------------------------------------------------
    // Coercion
    // ------------------------------------------------------------------------

    /// Converts into a number validator.
    ///
    /// The returned validator first runs this string validator (so `trim`
    /// and friends still apply), then parses the resulting string in plain
    /// decimal notation. Later number rules see the parsed `f64`. `self` is
    /// left untouched; an optional string yields an optional number.
    ///
    /// `toNumber` stands in for the number type check, so an unparsable input
    /// is reported once. Numeric refinements chained afterwards still run
    /// against the unconverted value and add their own failures.
    ///
    /// ```rust
    /// use tessera_validator::prelude::*;
    ///
    /// let age = inp().string().to_number().integer().min(0.0);
    ///
    /// assert_eq!(age.validate("42").value, Value::from(42));
    /// assert!(!age.validate("1e5").ok);
    /// assert!(!age.validate(" 42").ok);
    /// ```
    pub fn to_number(&self) -> NumberValidator {
        let source = self.clone();
        let describe = self.clone();

        let rule = Rule::transform("toNumber", move |v: &Value| {
            if v.is_absent() {
                return RuleOutcome::pass();
            }
            let checked = source.node.run(v.clone());
            if !checked.ok() {
                return RuleOutcome::fail();
            }
            match checked.value.as_str().and_then(parse_strict_number) {
                Some(n) => RuleOutcome::pass().with_value(Value::Number(n)),
                None => RuleOutcome::fail(),
            }
        })
        .with_config(RuleConfig::Schema(Arc::new(self.clone())))
        .with_message(FailureMessage::from_fn_many(move |ctx| {
            let checked = describe.node.run(ctx.value.clone());
            if checked.ok() {
                vec!["Value must be a valid number".to_owned()]
            } else {
                checked
                    .errors
                    .into_iter()
                    .map(|e| e.message.into_owned())
                    .collect()
            }
        }));

        let number = NumberValidator::new();
        let mut number = if self.node.has_rule("required") {
            number
        } else {
            number.optional()
        };
        let node = number.node_mut();
        node.remove_rule("isValidType");
        node.insert_rule_first(rule);
        number
    }
}

impl Infer for StringValidator {
    type Output = String;

    fn extract(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
