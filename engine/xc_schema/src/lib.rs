//! Type algebra for Crosscheck.
//!
//! Every question declares its parameter and return types in a small
//! language-independent grammar (`list<integer>`, `map<string;double>`,
//! `tuple<integer|string>`, `integer[]`). This crate owns that algebra:
//!
//! - [`TypeExpr`]: the parsed representation, one node per type constructor.
//! - [`TypeExpr::parse`] / [`TypeExpr::to_generic`]: round-tripping the
//!   generic string form.
//! - [`validate_value`]: coercing untyped JSON test-case values into the
//!   declared shape.
//! - [`reconcile`] / [`generic_equal`]: merging independently inferred types.
//! - [`LangTypeSpec`]: per-target-language rendering of type names, plus the
//!   process-wide spec registry.
//!
//! Everything here is pure and deterministic; errors are reported as
//! [`SchemaError`] and callers attach question/test-case context.

mod bound;
mod error;
mod expr;
mod langs;
mod parse;
mod reconcile;
mod spec;
mod validate;

pub use bound::BoundSchema;
pub use error::SchemaError;
pub use expr::{generic_equal, Primitive, TypeExpr, TypeKind};
pub use reconcile::reconcile;
pub use spec::{list_spec_languages, lookup_spec, render_schema_type, LangTypeSpec};
pub use validate::validate_value;
