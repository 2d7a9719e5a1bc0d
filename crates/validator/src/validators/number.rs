//! Number validator

use crate::foundation::value::display_number;
use crate::foundation::{Infer, Refine, Rule, RuleConfig, RuleOutcome, SchemaError, SchemaKind, Value};
use crate::validators::{join_display, type_check};

/// Largest integer `f64` represents exactly (2^53 − 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

crate::schema_type! {
    /// Validates numbers.
    ///
    /// All refinements pass for absent values.
    ///
    /// ```rust
    /// use tessera_validator::prelude::*;
    ///
    /// let score = inp().number().range(0.0, 100.0).integer();
    ///
    /// assert!(score.validate(100).ok);
    /// assert!(!score.validate(99.5).ok);
    /// assert!(!score.validate("42").ok);
    /// ```
    pub NumberValidator => SchemaKind::Number;
    required: "This field is required.";
}

fn numeric_rule<F>(title: &'static str, f: F) -> Rule
where
    F: Fn(f64) -> bool + Send + Sync + 'static,
{
    Rule::check(title, move |v: &Value| match v {
        Value::Number(n) => RuleOutcome::from_bool(f(*n)),
        other => RuleOutcome::from_bool(other.is_absent()),
    })
}

impl Default for NumberValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl NumberValidator {
    pub fn new() -> Self {
        Self::empty().required().is_valid_type()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_valid_type(self) -> Self {
        self.with_rule(type_check(
            |v| matches!(v, Value::Number(_)),
            "Value must be a number",
        ))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn min(self, min: f64) -> Self {
        self.with_rule(
            numeric_rule("min", move |n| n >= min)
                .with_config(RuleConfig::Number(min))
                .with_message(format!(
                    "Number must be greater than or equal to {}",
                    display_number(min)
                )),
        )
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn max(self, max: f64) -> Self {
        self.with_rule(
            numeric_rule("max", move |n| n <= max)
                .with_config(RuleConfig::Number(max))
                .with_message(format!(
                    "Number must be less than or equal to {}",
                    display_number(max)
                )),
        )
    }

    /// Inclusive on both ends.
    #[must_use = "builder methods must be chained or built"]
    pub fn range(self, min: f64, max: f64) -> Self {
        self.with_rule(
            numeric_rule("range", move |n| (min..=max).contains(&n))
                .with_config(RuleConfig::Range(min, max))
                .with_message(format!(
                    "Number must be between {} and {}",
                    display_number(min),
                    display_number(max)
                )),
        )
    }

    /// Like [`range`](Self::range), rejecting `min > max` and NaN bounds.
    pub fn try_range(self, min: f64, max: f64) -> Result<Self, SchemaError> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(SchemaError::InvalidRange { min, max });
        }
        Ok(self.range(min, max))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn integer(self) -> Self {
        self.with_rule(
            numeric_rule("integer", |n| n.is_finite() && n.fract() == 0.0)
                .with_message("Number must be an integer"),
        )
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn positive(self) -> Self {
        self.with_rule(numeric_rule("positive", |n| n > 0.0).with_message("Number must be positive"))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn negative(self) -> Self {
        self.with_rule(numeric_rule("negative", |n| n < 0.0).with_message("Number must be negative"))
    }

    /// Floating remainder, so `0.3` is not a multiple of `0.1`.
    #[must_use = "builder methods must be chained or built"]
    pub fn multiple_of(self, step: f64) -> Self {
        self.with_rule(
            numeric_rule("multipleOf", move |n| n % step == 0.0)
                .with_config(RuleConfig::Number(step))
                .with_message(format!("Number must be a multiple of {}", display_number(step))),
        )
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn finite(self) -> Self {
        self.with_rule(numeric_rule("finite", f64::is_finite).with_message("Number must be finite"))
    }

    /// Integer within ±(2^53 − 1).
    #[must_use = "builder methods must be chained or built"]
    pub fn safe(self) -> Self {
        self.with_rule(
            numeric_rule("safe", |n| n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER)
                .with_message("Number must be a safe integer"),
        )
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn one_of(self, values: impl IntoIterator<Item = f64>) -> Self {
        let values: Vec<f64> = values.into_iter().collect();
        let shown: Vec<String> = values.iter().copied().map(display_number).collect();
        let message = format!("Value must be one of: {}", join_display(&shown, ", "));
        let config = values.iter().copied().map(Value::Number).collect();
        self.with_rule(
            numeric_rule("enum", move |n| values.contains(&n))
                .with_config(RuleConfig::Values(config))
                .with_message(message),
        )
    }
}

impl Infer for NumberValidator {
    type Output = f64;

    fn extract(value: Value) -> Option<f64> {
        value.as_f64()
    }
}

// ============================================================================
// TESTS
// ============================================================================
