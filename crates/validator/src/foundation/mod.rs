//! Core validation types and traits
//!
//! This module contains the building blocks every validator is made of:
//!
//! - **Values**: [`Value`], [`FileValue`]
//! - **Rules**: [`Rule`], [`RuleOutcome`], [`RuleConfig`], [`FailureMessage`]
//! - **Nodes**: [`ValidationNode`] and its transform-then-check pipeline
//! - **Traits**: [`Schema`], [`Refine`], [`Infer`]
//! - **Errors**: [`ValidationError`], [`ValidationErrors`], [`SchemaError`]
//!
//! # Pipeline
//!
//! A node runs every transform rule in insertion order, then every check rule
//! in insertion order. A rule's replacement value is observed by all later
//! rules, failed or not, and every failure is collected:
//!
//! ```rust
//! use tessera_validator::prelude::*;
//!
//! let name = inp().string().trim().min(2);
//!
//! let result = name.validate("  a  ");
//! assert!(!result.ok);
//! assert_eq!(result.value, Value::from("a"));
//! assert_eq!(result.errors[0].message, "String must be at least 2 characters long");
//! ```

pub mod error;
pub mod node;
pub mod rule;
pub mod traits;
pub mod value;

pub use error::{ErrorKind, SchemaError, Source, ValidationError, ValidationErrors};
pub use node::{
    Evaluation, PathPrefix, ReadMode, SchemaKind, ValidateContext, ValidateResult,
    ValidationNode, join_path,
};
pub use rule::{
    FailureMessage, MessageContext, MessageFn, Predicate, Rule, RuleConfig, RuleKind, RuleOutcome,
};
pub use traits::{Infer, IntoSchemaRef, Refine, Schema, SchemaRef};
pub use value::{FileValue, Map, Value};
