//! Core traits for the validation system
//!
//! - [`Schema`] is the object-safe surface every validator exposes. Composite
//!   validators store their children as [`SchemaRef`].
//! - [`Refine`] is the shared fluent surface (`required`, `optional`,
//!   `with_message`, ad-hoc rules). It consumes and returns `Self`, so chains
//!   keep their concrete type.
//! - [`Infer`] extracts a typed value after validation.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use tracing::trace_span;

use crate::foundation::{
    Evaluation, FailureMessage, ReadMode, Rule, RuleOutcome, SchemaKind, ValidateContext,
    ValidateResult, ValidationErrors, ValidationNode, Value,
};

/// A shared, type-erased schema.
pub type SchemaRef = Arc<dyn Schema>;

// ============================================================================
// SCHEMA
// ============================================================================

/// A validator that can be run against a [`Value`].
///
/// Implementors only need [`node`](Schema::node). Composite validators also
/// override [`evaluate`](Schema::evaluate) to recurse into their children.
pub trait Schema: fmt::Debug + Send + Sync {
    /// The node holding this validator's own rules.
    fn node(&self) -> &ValidationNode;

    /// Runs the validator with keys relative to this schema.
    fn evaluate(&self, value: Value) -> Evaluation {
        self.node().run(value)
    }

    /// Validates `value`, placing errors under the context's prefix.
    fn validate_with(&self, value: Value, ctx: &ValidateContext) -> ValidateResult<'_> {
        let node = self.node();
        let _span = trace_span!(
            "validate",
            kind = %node.kind(),
            key = ctx.key.as_deref().unwrap_or(""),
        )
        .entered();
        self.evaluate(value).finish(node, ctx)
    }

    /// Validates `value` as the root of the path.
    fn validate(&self, value: impl Into<Value>) -> ValidateResult<'_>
    where
        Self: Sized,
    {
        self.validate_with(value.into(), &ValidateContext::default())
    }

    fn kind(&self) -> SchemaKind {
        self.node().kind()
    }

    fn read_mode(&self) -> ReadMode {
        self.node().read_mode()
    }

    fn has_rule(&self, title: &str) -> bool {
        self.node().has_rule(title)
    }
}

/// Conversion into a [`SchemaRef`], for storing validators as children.
pub trait IntoSchemaRef {
    fn into_schema_ref(self) -> SchemaRef;
}

impl<S: Schema + 'static> IntoSchemaRef for S {
    fn into_schema_ref(self) -> SchemaRef {
        Arc::new(self)
    }
}

impl IntoSchemaRef for SchemaRef {
    fn into_schema_ref(self) -> SchemaRef {
        self
    }
}

// ============================================================================
// REFINE
// ============================================================================

/// Fluent methods shared by every validator.
pub trait Refine: Schema + Sized {
    /// Message of the `required` rule installed at construction.
    const REQUIRED_MESSAGE: &'static str;

    fn node_mut(&mut self) -> &mut ValidationNode;

    /// Adds a prebuilt rule (replacing any rule with the same title).
    #[must_use = "builder methods must be chained or built"]
    fn with_rule(mut self, rule: Rule) -> Self {
        self.node_mut().add_rule(rule);
        self
    }

    /// Rejects `null` and `undefined`. Installed by default.
    #[must_use = "builder methods must be chained or built"]
    fn required(mut self) -> Self {
        self.node_mut().insert_rule_first(
            Rule::check("required", |v: &Value| RuleOutcome::from_bool(!v.is_absent()))
                .with_message(Self::REQUIRED_MESSAGE),
        );
        self
    }

    /// Accepts `null` and `undefined`.
    #[must_use = "builder methods must be chained or built"]
    fn optional(mut self) -> Self {
        self.node_mut().remove_rule("required");
        self
    }

    /// Overrides the failure message of the most recently added rule.
    #[must_use = "builder methods must be chained or built"]
    fn with_message(mut self, message: impl Into<FailureMessage>) -> Self {
        let node = self.node_mut();
        if let Some(title) = node.last_added().map(str::to_owned) {
            node.set_message(&title, message.into());
        }
        self
    }

    /// Overrides the failure message of the rule titled `title`.
    #[must_use = "builder methods must be chained or built"]
    fn message_for(mut self, title: &str, message: impl Into<FailureMessage>) -> Self {
        self.node_mut().set_message(title, message.into());
        self
    }

    /// Appends a check rule built from a closure.
    #[must_use = "builder methods must be chained or built"]
    fn rule<F>(
        self,
        title: impl Into<Cow<'static, str>>,
        predicate: F,
        message: impl Into<FailureMessage>,
    ) -> Self
    where
        F: Fn(&Value) -> RuleOutcome + Send + Sync + 'static,
    {
        self.with_rule(Rule::check(title, predicate).with_message(message))
    }

    /// Appends a transform rule built from a closure.
    #[must_use = "builder methods must be chained or built"]
    fn transform_with<F>(
        self,
        title: impl Into<Cow<'static, str>>,
        transform: F,
        message: impl Into<FailureMessage>,
    ) -> Self
    where
        F: Fn(&Value) -> RuleOutcome + Send + Sync + 'static,
    {
        self.with_rule(Rule::transform(title, transform).with_message(message))
    }

    /// Appends a boolean check that passes vacuously for absent values.
    #[must_use = "builder methods must be chained or built"]
    fn custom_rule<F>(
        self,
        title: impl Into<Cow<'static, str>>,
        predicate: F,
        message: impl Into<FailureMessage>,
    ) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.rule(
            title,
            move |v: &Value| RuleOutcome::from_bool(v.is_absent() || predicate(v)),
            message,
        )
    }

    /// Removes the rule titled `title`.
    #[must_use = "builder methods must be chained or built"]
    fn without_rule(mut self, title: &str) -> Self {
        self.node_mut().remove_rule(title);
        self
    }
}

// ============================================================================
// INFER
// ============================================================================

/// Typed extraction: validate, then convert the transformed value.
pub trait Infer: Schema {
    /// The Rust type a valid, present value converts to.
    type Output;

    /// Converts a value that already passed validation.
    fn extract(value: Value) -> Option<Self::Output>;

    /// Validates `value` and returns the typed result. Absent values that
    /// passed validation (optional schemas) yield `Ok(None)`.
    fn parse(&self, value: impl Into<Value>) -> Result<Option<Self::Output>, ValidationErrors>
    where
        Self: Sized,
    {
        let value = self.validate(value).into_result()?;
        Ok(Self::extract(value))
    }
}

// ============================================================================
// TESTS
// ============================================================================
