//! Prelude module for convenient imports.
//!
//! Provides a single `use tessera_validator::prelude::*;` import that brings
//! in the builder, every validator, and the traits their methods live on.
//!
//! # Examples
//!
//! ```rust
//! use tessera_validator::prelude::*;
//!
//! let name = inp().string().trim().min(1);
//! let result = name.validate_with("  ".into(), &ValidateContext::new().with_key("name"));
//! assert_eq!(result.errors[0].key, "name");
//! ```

// ============================================================================
// FOUNDATION: Core traits, values, errors
// ============================================================================

pub use crate::foundation::{
    ErrorKind, FailureMessage, FileValue, Infer, IntoSchemaRef, Map, ReadMode, Refine, Rule,
    RuleConfig, RuleOutcome, Schema, SchemaError, SchemaKind, SchemaRef, Source, ValidateContext,
    ValidateResult, ValidationError, ValidationErrors, ValidationNode, Value,
};

// ============================================================================
// BUILDER & CONFIG
// ============================================================================

pub use crate::builder::{Input, inp};
pub use crate::config::{DateConfig, DateFormat};

// ============================================================================
// VALIDATORS
// ============================================================================

pub use crate::validators::{
    AnyValidator, ArrayValidator, BooleanValidator, DateValidator, FileMode, FileValidator,
    Multiple, NumberValidator, ObjectValidator, Single, StringValidator,
};
