//! Any validator: presence only.

use crate::foundation::{Infer, Refine, SchemaKind, Value};

crate::schema_type! {
    /// Accepts any present value. Extra rules can be attached with
    /// [`Refine::rule`] or [`Refine::custom_rule`].
    ///
    /// ```rust
    /// use tessera_validator::prelude::*;
    ///
    /// let even = inp()
    ///     .any()
    ///     .custom_rule("even", |v| v.as_f64().is_some_and(|n| n % 2.0 == 0.0), "Must be even");
    ///
    /// assert!(even.validate(4).ok);
    /// assert_eq!(even.validate(3).errors[0].message, "Must be even");
    /// assert!(!even.validate(Value::Null).ok);
    /// ```
    pub AnyValidator => SchemaKind::Any;
    required: "This field is required.";
}

impl Default for AnyValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl AnyValidator {
    pub fn new() -> Self {
        Self::empty().required()
    }
}

impl Infer for AnyValidator {
    type Output = Value;

    fn extract(value: Value) -> Option<Value> {
        (!value.is_absent()).then_some(value)
    }
}
