//! Boolean validator

use crate::foundation::{Infer, Refine, Rule, RuleConfig, RuleOutcome, SchemaKind, Value};
use crate::validators::type_check;

crate::schema_type! {
    /// Validates booleans, optionally coercing common string and numeric
    /// spellings with [`transform`](BooleanValidator::transform).
    ///
    /// ```rust
    /// use tessera_validator::prelude::*;
    ///
    /// let accepted = inp().boolean().transform().is_true();
    ///
    /// assert_eq!(accepted.validate(" TRUE ").value, Value::Bool(true));
    /// assert!(!accepted.validate("0").ok);
    /// assert!(!accepted.validate("yes").ok);
    /// ```
    pub BooleanValidator => SchemaKind::Boolean;
    required: "This field must be a boolean and is required.";
}

/// Reads `"true"`/`"false"` (trimmed, any case) and exactly `1`/`"1"` or
/// `0`/`"0"`. Digits are not trimmed.
fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) if *n == 1.0 => Some(true),
        Value::Number(n) if *n == 0.0 => Some(false),
        Value::String(s) if s == "1" => Some(true),
        Value::String(s) if s == "0" => Some(false),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn equality_rule(title: &'static str, expected: bool, equal: bool, message: String) -> Rule {
    Rule::check(title, move |v: &Value| match v {
        Value::Bool(b) => RuleOutcome::from_bool((*b == expected) == equal),
        other => RuleOutcome::from_bool(other.is_absent()),
    })
    .with_config(RuleConfig::Flag(expected))
    .with_message(message)
}

impl Default for BooleanValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl BooleanValidator {
    pub fn new() -> Self {
        Self::empty().required().is_valid_type()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_valid_type(self) -> Self {
        self.with_rule(type_check(
            |v| matches!(v, Value::Bool(_)),
            "Value must be a boolean",
        ))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_true(self) -> Self {
        self.with_rule(equality_rule("true", true, true, "Value must be true".to_owned()))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_false(self) -> Self {
        self.with_rule(equality_rule("false", false, true, "Value must be false".to_owned()))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn equals(self, expected: bool) -> Self {
        self.with_rule(equality_rule(
            "equals",
            expected,
            true,
            format!("Value must be equal to {expected}"),
        ))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn not_equals(self, expected: bool) -> Self {
        self.with_rule(equality_rule(
            "notEquals",
            expected,
            false,
            format!("Value must not be equal to {expected}"),
        ))
    }

    /// Coerces `"true"`/`"false"` (trimmed, case-insensitive), `1`/`"1"` and
    /// `0`/`"0"` into booleans before any check runs. Other values are left
    /// as they are and fail this rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn transform(self) -> Self {
        self.with_rule(
            Rule::transform("transform", |v: &Value| {
                if v.is_absent() {
                    return RuleOutcome::pass();
                }
                match coerce_bool(v) {
                    Some(b) => RuleOutcome::pass().with_value(Value::Bool(b)),
                    None => RuleOutcome::fail(),
                }
            })
            .with_message("Cannot transform value to boolean"),
        )
    }
}

impl Infer for BooleanValidator {
    type Output = bool;

    fn extract(value: Value) -> Option<bool> {
        value.as_bool()
    }
}

// ============================================================================
// TESTS
// ============================================================================
