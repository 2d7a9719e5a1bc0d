//! # tessera-validator
//!
//! Runtime schema validation for already-decoded input values.
//!
//! ## Quick Start
//!
//! ```rust
//! use tessera_validator::prelude::*;
//!
//! let signup = inp()
//!     .object()
//!     .field("email", inp().string().trim().email())
//!     .field("age", inp().string().to_number().integer().min(18.0))
//!     .field("tags", inp().array().optional().every(inp().string().min(2)));
//!
//! let raw: Value = serde_json::json!({
//!     "email": "  ada@example.com ",
//!     "age": "36",
//! })
//! .into();
//!
//! let result = signup.validate_with(raw, &ValidateContext::new().with_source(Source::Body));
//! assert!(result.ok);
//! assert_eq!(result.value.get("email"), &Value::from("ada@example.com"));
//! assert_eq!(result.value.get("age"), &Value::from(36));
//! ```
//!
//! ## How a validation runs
//!
//! Every validator owns a [`ValidationNode`](foundation::ValidationNode): an
//! ordered list of named rules. Transform rules (`trim`, `to_lower_case`,
//! `to_number`, boolean `transform`) run first, then every check rule, each
//! seeing the value left by the rules before it. Nothing short-circuits, so
//! a result lists every violation. Errors never panic and are never returned
//! as `Err`; they are [`ValidationError`](foundation::ValidationError)s with
//! a path key such as `address.city` or `tags[2]`.
//!
//! ## Built-in Validators
//!
//! - **Leaf**: [`StringValidator`](validators::StringValidator),
//!   [`NumberValidator`](validators::NumberValidator),
//!   [`BooleanValidator`](validators::BooleanValidator),
//!   [`DateValidator`](validators::DateValidator),
//!   [`FileValidator`](validators::FileValidator),
//!   [`AnyValidator`](validators::AnyValidator)
//! - **Composite**: [`ObjectValidator`](validators::ObjectValidator),
//!   [`ArrayValidator`](validators::ArrayValidator)
//!
//! Custom validator types can be declared with [`schema_type!`].

// `Infer::parse` returns ValidationErrors unboxed.
#![allow(clippy::result_large_err)]

pub mod builder;
pub mod config;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod validators;
