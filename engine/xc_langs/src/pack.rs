//! The [`LanguagePack`] value object.

use std::path::Path;

use serde_json::Value;
use xc_data::Command;
use xc_schema::{Primitive, TypeExpr};

use crate::naming::NamingConvention;

/// Extra escaping applied to string/char literals after generic escaping
/// (e.g. `$` in languages with string interpolation).
pub type EscapeFn = fn(&str) -> String;

/// A primitive literal formatter. Receives the validated value and the
/// pack's escape function (used only by string-ish formatters).
pub type PrimitiveFn = fn(&Value, Option<EscapeFn>) -> String;

/// Container literal formatters. They receive the (language-bound) type of
/// the container so targets that need type names in literals can use them.
pub type SequenceFormat = fn(&TypeExpr, &[String]) -> String;
pub type MapFormat = fn(&TypeExpr, &TypeExpr, &[String]) -> String;
pub type MapEntryFormat = fn(&str, &str) -> String;

/// Inputs to a pack's signature renderer.
pub struct SignatureCtx<'a> {
    pub entry_fn_name: &'a str,
    pub entry_cls_name: &'a str,
    /// The joined argument signature (`a: int, b: int`).
    pub signature: &'a str,
    pub return_type: &'a str,
    /// Translated parameter names, in order.
    pub params: &'a [String],
    pub docstring: Option<&'a str>,
}

/// Everything the engine knows about one target language.
///
/// Packs are plain data: a table of formatter functions plus a few flags.
/// One module per language under [`crate::packs`] builds its pack; the
/// registry owns the instances.
pub struct LanguagePack {
    pub name: &'static str,
    pub file_ext: &'static str,
    pub naming: NamingConvention,
    /// Whether annotations appear in signatures by default. Dynamically
    /// typed targets suppress them unless the question opts in.
    pub requires_type_annotations: bool,

    pub(crate) prim_overrides: &'static [(Primitive, PrimitiveFn)],
    pub(crate) escape: Option<EscapeFn>,
    pub(crate) format_list: SequenceFormat,
    pub(crate) format_set: SequenceFormat,
    pub(crate) format_map: MapFormat,
    pub(crate) format_map_entry: MapEntryFormat,

    pub(crate) commands: fn(&Path) -> Vec<Command>,
    pub(crate) signature: fn(&SignatureCtx<'_>) -> String,
    pub(crate) clean_docstring: fn(&str) -> String,
    pub(crate) format_docstring: fn(&str) -> String,
    pub(crate) sig_arg: fn(&str, &TypeExpr, bool) -> String,
    pub(crate) sig_return: fn(&TypeExpr, bool) -> String,
    pub(crate) join_signature: fn(&[String]) -> String,
    pub(crate) arg_name: fn(&str) -> String,

    /// `(replacement, words-it-replaces)` pairs for prompt translation.
    pub(crate) word_replacements: &'static [(&'static str, &'static [&'static str])],
}

impl LanguagePack {
    /// The compile/run command sequence for a driver file.
    pub fn commands(&self, file_path: &Path) -> Vec<Command> {
        (self.commands)(file_path)
    }

    /// Render the opening declaration of the entry function.
    pub fn render_signature(&self, ctx: &SignatureCtx<'_>) -> String {
        (self.signature)(ctx)
    }

    /// Escape comment terminators that would break this language's comments.
    pub fn clean_docstring(&self, text: &str) -> String {
        (self.clean_docstring)(text)
    }

    /// Wrap plain text in this language's comment style.
    pub fn format_docstring(&self, text: &str) -> String {
        (self.format_docstring)(text)
    }

    /// One argument of the signature (`x: int`, `int x`, or just `x`).
    pub fn signature_argument(&self, name: &str, ty: &TypeExpr, annotate: bool) -> String {
        (self.sig_arg)(name, ty, annotate)
    }

    /// The rendered return-type part of the signature.
    pub fn signature_return(&self, ty: &TypeExpr, annotate: bool) -> String {
        (self.sig_return)(ty, annotate)
    }

    /// Join signature arguments (`", "` everywhere except Haskell).
    pub fn join_signature(&self, args: &[String]) -> String {
        (self.join_signature)(args)
    }

    /// Translate a parameter name for use in code (`$x` in PHP, snake case
    /// in Haskell, unchanged elsewhere).
    pub fn argument_name(&self, name: &str) -> String {
        (self.arg_name)(name)
    }

    pub(crate) fn escape_fn(&self) -> Option<EscapeFn> {
        self.escape
    }

    pub(crate) fn word_replacements(
        &self,
    ) -> &'static [(&'static str, &'static [&'static str])] {
        self.word_replacements
    }

    pub(crate) fn primitive_override(&self, p: Primitive) -> Option<PrimitiveFn> {
        self.prim_overrides
            .iter()
            .find(|(prim, _)| *prim == p)
            .map(|(_, f)| *f)
    }
}

/// The default argument joiner.
pub(crate) fn join_comma(args: &[String]) -> String {
    args.join(", ")
}

/// The default argument-name translation (identity).
pub(crate) fn arg_identity(name: &str) -> String {
    name.to_string()
}
