//! Array validator
//!
//! Length rules look at the array itself. `every` and `some` run an element
//! schema over each item and report element errors under `[index]` keys.

use std::collections::HashSet;

use tracing::debug;

use crate::foundation::{
    Evaluation, Infer, IntoSchemaRef, ReadMode, Refine, Rule, RuleConfig, RuleOutcome, SchemaKind,
    SchemaRef, ValidationError, Value,
};
use crate::validators::type_check;

crate::schema_type! {
    /// Validates arrays.
    ///
    /// ```rust
    /// use tessera_validator::prelude::*;
    ///
    /// let scores = inp().array().min(1).every(inp().number().min(0.0));
    ///
    /// let result = scores.validate(Value::from(vec![Value::from(1), Value::from(-1)]));
    /// assert!(!result.ok);
    /// assert_eq!(result.errors[0].key, "[1]");
    /// ```
    pub ArrayValidator => SchemaKind::Array;
    required: "This field is required.";
    fields { element: Option<SchemaRef> }
}

fn items_rule<F>(title: &'static str, f: F) -> Rule
where
    F: Fn(&[Value]) -> bool + Send + Sync + 'static,
{
    Rule::check(title, move |v: &Value| match v {
        Value::Array(items) => RuleOutcome::from_bool(f(items)),
        other => RuleOutcome::from_bool(other.is_absent()),
    })
}

/// Hashable form of a primitive under SameValueZero: `-0` folds into `0` and
/// every NaN is one key.
#[derive(PartialEq, Eq, Hash)]
enum PrimitiveKey<'a> {
    Undefined,
    Null,
    Bool(bool),
    Number(u64),
    String(&'a str),
}

impl<'a> PrimitiveKey<'a> {
    fn of(value: &'a Value) -> Option<Self> {
        Some(match value {
            Value::Undefined => Self::Undefined,
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) if n.is_nan() => Self::Number(f64::NAN.to_bits()),
            Value::Number(n) if *n == 0.0 => Self::Number(0.0f64.to_bits()),
            Value::Number(n) => Self::Number(n.to_bits()),
            Value::String(s) => Self::String(s),
            _ => return None,
        })
    }
}

fn all_unique(items: &[Value]) -> bool {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter_map(PrimitiveKey::of)
        .all(|key| seen.insert(key))
}

/// Evaluates every item, returning each item's evaluation in order.
fn evaluate_items(schema: &SchemaRef, items: &[Value]) -> Vec<Evaluation> {
    items.iter().map(|item| schema.evaluate(item.clone())).collect()
}

/// Element errors re-addressed under their index.
fn indexed_issues(evaluations: &[Evaluation]) -> Vec<ValidationError> {
    evaluations
        .iter()
        .enumerate()
        .flat_map(|(i, eval)| {
            let segment = format!("[{i}]");
            eval.errors
                .iter()
                .cloned()
                .map(move |e| e.nested_under(&segment))
        })
        .collect()
}

impl Default for ArrayValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ArrayValidator {
    pub fn new() -> Self {
        let mut validator = Self::empty();
        validator.node.set_read_mode(ReadMode::Multi);
        validator.required().is_valid_type()
    }

    /// The schema given to the latest `every` or `some`.
    pub const fn element(&self) -> Option<&SchemaRef> {
        self.element.as_ref()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_valid_type(self) -> Self {
        self.with_rule(type_check(
            |v| matches!(v, Value::Array(_)),
            "Value must be an array",
        ))
    }

    // ------------------------------------------------------------------------
    // Length
    // ------------------------------------------------------------------------

    #[must_use = "builder methods must be chained or built"]
    pub fn min(self, min: usize) -> Self {
        self.with_rule(
            items_rule("min", move |items| items.len() >= min)
                .with_config(RuleConfig::Count(min))
                .with_message(format!("Array must have at least {min} items")),
        )
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn max(self, max: usize) -> Self {
        self.with_rule(
            items_rule("max", move |items| items.len() <= max)
                .with_config(RuleConfig::Count(max))
                .with_message(format!("Array must have at most {max} items")),
        )
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn length(self, length: usize) -> Self {
        self.with_rule(
            items_rule("length", move |items| items.len() == length)
                .with_config(RuleConfig::Count(length))
                .with_message(format!("Array must have exactly {length} items")),
        )
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn not_empty(self) -> Self {
        self.with_rule(items_rule("notEmpty", |items| !items.is_empty()).with_message("Array must not be empty"))
    }

    // ------------------------------------------------------------------------
    // Membership
    // ------------------------------------------------------------------------

    /// No two primitive items may be equal under SameValueZero. Nested
    /// arrays, objects, dates and files are compared by identity, so they
    /// never collide. Runs in linear time.
    #[must_use = "builder methods must be chained or built"]
    pub fn unique(self) -> Self {
        self.with_rule(
            items_rule("unique", all_unique)
            .with_message("Array must contain unique items"),
        )
    }

    /// Requires a primitive item equal to `item`.
    #[must_use = "builder methods must be chained or built"]
    pub fn includes(self, item: impl Into<Value>) -> Self {
        let item = item.into();
        let message = format!("Array must include {item}");
        let needle = item.clone();
        self.with_rule(
            items_rule("includes", move |items| items.iter().any(|v| v.same_value_zero(&needle)))
                .with_config(RuleConfig::Value(item))
                .with_message(message),
        )
    }

    // ------------------------------------------------------------------------
    // Elements
    // ------------------------------------------------------------------------

    /// Validates every item against `schema`.
    ///
    /// Item errors are reported under `[index]` ahead of the rule's own
    /// message, and the array is replaced with the transformed items.
    #[must_use = "builder methods must be chained or built"]
    pub fn every(mut self, schema: impl IntoSchemaRef) -> Self {
        let schema = schema.into_schema_ref();
        self.element = Some(schema.clone());
        let inner = schema.clone();
        self.with_rule(
            Rule::check("every", move |v: &Value| {
                let Value::Array(items) = v else {
                    return RuleOutcome::from_bool(v.is_absent());
                };
                let evaluations = evaluate_items(&inner, items);
                let issues = indexed_issues(&evaluations);
                if !issues.is_empty() {
                    debug!(items = items.len(), errors = issues.len(), "array items failed");
                }
                let values = evaluations.into_iter().map(|e| e.value).collect();
                RuleOutcome::from_bool(issues.is_empty())
                    .with_value(Value::Array(values))
                    .with_issues(issues)
            })
            .with_config(RuleConfig::Schema(schema))
            .with_message("All items must pass validation"),
        )
    }

    /// Requires at least one item to pass `schema`. An empty array fails.
    ///
    /// On failure every item's errors are reported under `[index]`.
    #[must_use = "builder methods must be chained or built"]
    pub fn some(mut self, schema: impl IntoSchemaRef) -> Self {
        let schema = schema.into_schema_ref();
        self.element = Some(schema.clone());
        let inner = schema.clone();
        self.with_rule(
            Rule::check("some", move |v: &Value| {
                let Value::Array(items) = v else {
                    return RuleOutcome::from_bool(v.is_absent());
                };
                let evaluations = evaluate_items(&inner, items);
                if evaluations.iter().any(Evaluation::ok) {
                    return RuleOutcome::pass();
                }
                let issues = indexed_issues(&evaluations);
                debug!(items = items.len(), errors = issues.len(), "no array item passed");
                RuleOutcome::fail().with_issues(issues)
            })
            .with_config(RuleConfig::Schema(schema))
            .with_message("At least one item must pass validation"),
        )
    }
}

impl Infer for ArrayValidator {
    type Output = Vec<Value>;

    fn extract(value: Value) -> Option<Vec<Value>> {
        match value {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
