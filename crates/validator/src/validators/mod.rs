//! Built-in validators
//!
//! Leaf validators check a single value:
//!
//! - [`StringValidator`], [`NumberValidator`], [`BooleanValidator`]
//! - [`DateValidator`], [`FileValidator`], [`AnyValidator`]
//!
//! Composite validators recurse into children and merge their errors under
//! composed path keys:
//!
//! - [`ObjectValidator`] (`user.name`)
//! - [`ArrayValidator`] (`tags[2]`)
//!
//! Every validator starts with a `required` rule and (except `any`) an
//! `isValidType` rule. Refinements added afterwards pass vacuously for absent
//! values, so `optional()` alone decides whether `null`/`undefined` is valid.

mod any;
mod array;
mod boolean;
mod date;
mod file;
mod number;
mod object;
mod string;

pub use any::AnyValidator;
pub use array::ArrayValidator;
pub use boolean::BooleanValidator;
pub use date::DateValidator;
pub use file::{FileMode, FileValidator, Multiple, Single};
pub use number::NumberValidator;
pub use object::ObjectValidator;
pub use string::StringValidator;

use std::borrow::Cow;

use crate::foundation::{Rule, RuleOutcome, Value};

// ============================================================================
// RULE HELPERS
// ============================================================================

/// A check that passes for absent values and otherwise defers to `f`.
pub(crate) fn present<F>(title: impl Into<Cow<'static, str>>, f: F) -> Rule
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Rule::check(title, move |v: &Value| {
        RuleOutcome::from_bool(v.is_absent() || f(v))
    })
}

/// The `isValidType` rule: absent values pass, present ones must satisfy `f`.
pub(crate) fn type_check<F>(f: F, message: &'static str) -> Rule
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    present("isValidType", f).with_message(message)
}

/// Joins display forms with `sep`: `a, b` or `image/png or image/jpeg`.
pub(crate) fn join_display<T: ToString>(items: &[T], sep: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}
