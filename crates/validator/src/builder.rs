//! Schema builder: the entry point for declaring an input's validator.
//!
//! [`inp`] returns an [`Input`], which is consumed by the first type
//! selection. Choosing a second type for the same input does not compile:
//!
//! ```rust,compile_fail
//! use tessera_validator::builder::inp;
//!
//! let input = inp();
//! let name = input.string();
//! let age = input.number();
//! ```

use crate::config::DateConfig;
use crate::validators::{
    AnyValidator, ArrayValidator, BooleanValidator, DateValidator, FileValidator, NumberValidator,
    ObjectValidator, Single, StringValidator,
};

/// Starts a schema declaration.
///
/// ```rust
/// use tessera_validator::prelude::*;
///
/// let email = inp().string().email();
/// assert!(email.validate("ada@example.com").ok);
/// ```
pub fn inp() -> Input {
    Input { _private: () }
}

/// An input slot that has not been given a type yet.
#[derive(Debug)]
#[must_use = "an input does nothing until a type is selected"]
pub struct Input {
    _private: (),
}

impl Input {
    pub fn string(self) -> StringValidator {
        StringValidator::new()
    }

    pub fn number(self) -> NumberValidator {
        NumberValidator::new()
    }

    pub fn boolean(self) -> BooleanValidator {
        BooleanValidator::new()
    }

    pub fn date(self) -> DateValidator {
        DateValidator::new()
    }

    /// A date validator that reads strings according to `config`.
    pub fn date_with(self, config: DateConfig) -> DateValidator {
        DateValidator::with_config(config)
    }

    /// A single-file validator; call
    /// [`multiple_files`](FileValidator::multiple_files) for lists.
    pub fn file(self) -> FileValidator<Single> {
        FileValidator::<Single>::new()
    }

    pub fn array(self) -> ArrayValidator {
        ArrayValidator::new()
    }

    pub fn object(self) -> ObjectValidator {
        ObjectValidator::new()
    }

    pub fn any(self) -> AnyValidator {
        AnyValidator::new()
    }
}
