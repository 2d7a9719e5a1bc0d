//! Object validator
//!
//! Runs its own rules first. Declared fields are only visited when those
//! pass and the value is present; each field's errors are placed under the
//! field name (`address.city`) and its transformed value is written back.

use indexmap::IndexMap;
use tracing::debug;

use crate::foundation::{
    Evaluation, Infer, IntoSchemaRef, Map, Refine, Rule, RuleConfig, RuleOutcome, Schema,
    SchemaKind, SchemaRef, ValidationNode, Value,
};
use crate::validators::{join_display, type_check};

/// Validates objects and, recursively, their declared fields.
///
/// ```rust
/// use tessera_validator::prelude::*;
///
/// let user = inp().object().field(
///     "address",
///     inp().object().field("city", inp().string().min(3)),
/// );
///
/// let value: Value = serde_json::json!({ "address": { "city": "X" } }).into();
/// let result = user.validate(value);
/// assert_eq!(result.errors[0].key, "address.city");
/// ```
#[derive(Debug, Clone)]
pub struct ObjectValidator {
    node: ValidationNode,
    fields: IndexMap<String, SchemaRef>,
}

fn map_rule<F>(title: &'static str, f: F) -> Rule
where
    F: Fn(&Map) -> bool + Send + Sync + 'static,
{
    Rule::check(title, move |v: &Value| match v {
        Value::Object(map) => RuleOutcome::from_bool(f(map)),
        other => RuleOutcome::from_bool(other.is_absent()),
    })
}

impl Default for ObjectValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectValidator {
    pub fn new() -> Self {
        Self {
            node: ValidationNode::new(SchemaKind::Object),
            fields: IndexMap::new(),
        }
        .required()
        .is_valid_type()
    }

    /// Accepts only objects: arrays, dates and files are rejected. Installed
    /// by default.
    #[must_use = "builder methods must be chained or built"]
    pub fn is_valid_type(self) -> Self {
        self.with_rule(type_check(
            |v| matches!(v, Value::Object(_)),
            "Value must be an object, not an array",
        ))
    }

    /// Declares (or replaces) the schema of field `key`.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, key: impl Into<String>, schema: impl IntoSchemaRef) -> Self {
        self.fields.insert(key.into(), schema.into_schema_ref());
        self
    }

    /// Declared fields, in declaration order.
    pub const fn fields(&self) -> &IndexMap<String, SchemaRef> {
        &self.fields
    }

    // ------------------------------------------------------------------------
    // Keys
    // ------------------------------------------------------------------------

    #[must_use = "builder methods must be chained or built"]
    pub fn has_key(self, key: impl Into<String>) -> Self {
        let key = key.into();
        let message = format!("Object must have key \"{key}\"");
        let needle = key.clone();
        self.with_rule(
            map_rule("hasKey", move |map| map.contains_key(&needle))
                .with_config(RuleConfig::Text(key))
                .with_message(message),
        )
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn min_keys(self, count: usize) -> Self {
        self.with_rule(
            map_rule("minKeys", move |map| map.len() >= count)
                .with_config(RuleConfig::Count(count))
                .with_message(format!("Object must have at least {count} keys")),
        )
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn max_keys(self, count: usize) -> Self {
        self.with_rule(
            map_rule("maxKeys", move |map| map.len() <= count)
                .with_config(RuleConfig::Count(count))
                .with_message(format!("Object must have at most {count} keys")),
        )
    }

    /// Requires the key set to be exactly `keys`, in any order.
    #[must_use = "builder methods must be chained or built"]
    pub fn exact_keys<I, S>(self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        let message = format!("Object must have exactly these keys: {}", join_display(&keys, ", "));
        let expected = keys.clone();
        self.with_rule(
            map_rule("exactKeys", move |map| {
                map.len() == expected.len() && expected.iter().all(|k| map.contains_key(k))
            })
            .with_config(RuleConfig::Texts(keys))
            .with_message(message),
        )
    }
}

impl Schema for ObjectValidator {
    fn node(&self) -> &ValidationNode {
        &self.node
    }

    fn evaluate(&self, value: Value) -> Evaluation {
        let mut eval = self.node.run(value);
        if !eval.ok() {
            return eval;
        }
        let Value::Object(map) = &mut eval.value else {
            return eval;
        };

        let mut merged = 0;
        for (key, schema) in &self.fields {
            let child = schema.evaluate(map.get(key).cloned().unwrap_or_default());
            merged += child.errors.len();
            eval.errors
                .extend(child.errors.into_iter().map(|e| e.nested_under(key)));
            if map.contains_key(key) || !child.value.is_absent() {
                map.insert(key.clone(), child.value);
            }
        }

        if merged > 0 {
            debug!(fields = self.fields.len(), errors = merged, "object fields failed");
        }
        eval
    }
}

impl Refine for ObjectValidator {
    const REQUIRED_MESSAGE: &'static str = "This field is required.";

    fn node_mut(&mut self) -> &mut ValidationNode {
        &mut self.node
    }
}

impl Infer for ObjectValidator {
    type Output = Map;

    fn extract(value: Value) -> Option<Map> {
        match value {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
