//! Macros for declaring validator types with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`schema_type!`]: struct + `Schema` + `Refine` wiring for a validator
//!
//! # Examples
//!
//! ```rust
//! use tessera_validator::prelude::*;
//! use tessera_validator::schema_type;
//!
//! schema_type! {
//!     /// Accepts any UUID-looking string.
//!     pub UuidValidator => SchemaKind::String;
//!     required: "A UUID is required.";
//! }
//!
//! impl UuidValidator {
//!     pub fn new() -> Self {
//!         Self::empty().required()
//!     }
//! }
//!
//! let id = UuidValidator::new();
//! assert_eq!(id.validate(Value::Null).errors[0].message, "A UUID is required.");
//! ```

// ============================================================================
// SCHEMA TYPE MACRO
// ============================================================================

/// Declares a validator struct around a [`ValidationNode`] and implements
/// [`Schema`] and [`Refine`] for it.
///
/// `#[derive(Debug, Clone)]` is always applied. Extra fields follow the
/// required message and are initialized with `Default` by `from_node`.
/// `empty()` builds a validator of the declared kind with no rules; the
/// type's own constructor installs its defaults on top of it.
///
/// # Variants
///
/// **Plain validator**:
/// ```rust,ignore
/// schema_type! {
///     pub StringValidator => SchemaKind::String;
///     required: "This field must be a string and is required.";
/// }
/// ```
///
/// **With extra fields**:
/// ```rust,ignore
/// schema_type! {
///     pub DateValidator => SchemaKind::Date;
///     required: "This field is required.";
///     fields { config: DateConfig }
/// }
/// ```
///
/// **Generic over a marker type**:
/// ```rust,ignore
/// schema_type! {
///     pub FileValidator<M: FileMode> => SchemaKind::File;
///     required: "This field is required.";
/// }
/// ```
///
/// [`ValidationNode`]: crate::foundation::ValidationNode
/// [`Schema`]: crate::foundation::Schema
/// [`Refine`]: crate::foundation::Refine
#[macro_export]
macro_rules! schema_type {
    // ── Variant 1: Plain validator, optional extra fields ───────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident => $kind:expr;
        required: $required:literal;
        $(fields { $($field:ident : $fty:ty),* $(,)? })?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            node: $crate::foundation::ValidationNode,
            $($($field: $fty,)*)?
        }

        impl $name {
            /// Wraps an existing node. No rules are installed.
            #[allow(dead_code)]
            pub(crate) fn from_node(node: $crate::foundation::ValidationNode) -> Self {
                Self {
                    node,
                    $($($field: ::core::default::Default::default(),)*)?
                }
            }

            /// A validator of this kind with no rules.
            #[allow(dead_code)]
            pub(crate) fn empty() -> Self {
                Self::from_node($crate::foundation::ValidationNode::new($kind))
            }
        }

        impl $crate::foundation::Schema for $name {
            fn node(&self) -> &$crate::foundation::ValidationNode {
                &self.node
            }
        }

        impl $crate::foundation::Refine for $name {
            const REQUIRED_MESSAGE: &'static str = $required;

            fn node_mut(&mut self) -> &mut $crate::foundation::ValidationNode {
                &mut self.node
            }
        }
    };

    // ── Variant 2: Generic over a single marker type ────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident<$marker:ident: $bound:path> => $kind:expr;
        required: $required:literal;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name<$marker: $bound> {
            node: $crate::foundation::ValidationNode,
            mode: ::core::marker::PhantomData<$marker>,
        }

        impl<$marker: $bound> $name<$marker> {
            /// Wraps an existing node. No rules are installed.
            #[allow(dead_code)]
            pub(crate) fn from_node(node: $crate::foundation::ValidationNode) -> Self {
                Self {
                    node,
                    mode: ::core::marker::PhantomData,
                }
            }

            /// A validator of this kind with no rules.
            #[allow(dead_code)]
            pub(crate) fn empty() -> Self {
                Self::from_node($crate::foundation::ValidationNode::new($kind))
            }
        }

        impl<$marker: $bound> $crate::foundation::Schema for $name<$marker> {
            fn node(&self) -> &$crate::foundation::ValidationNode {
                &self.node
            }
        }

        impl<$marker: $bound> $crate::foundation::Refine for $name<$marker> {
            const REQUIRED_MESSAGE: &'static str = $required;

            fn node_mut(&mut self) -> &mut $crate::foundation::ValidationNode {
                &mut self.node
            }
        }
    };
}
