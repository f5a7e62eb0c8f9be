//! Schema errors.

use crate::expr::Primitive;

/// Error raised when a generic type string, a runtime value, or a language
/// binding is invalid.
///
/// The engine never aborts a batch on a `SchemaError`; callers record the
/// failing question and continue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The generic type string does not follow the grammar.
    #[error("malformed type string: {0}")]
    Malformed(String),

    /// A leaf type is not supported by the target language.
    #[error("leaf type `{primitive}` is not supported by {language}")]
    UnsupportedPrimitive {
        language: &'static str,
        primitive: Primitive,
    },

    /// A container shape cannot be expressed in the target language.
    #[error("{language} cannot express {what}")]
    UnsupportedShape {
        language: &'static str,
        what: String,
    },

    /// A runtime value does not match its declared type.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}
