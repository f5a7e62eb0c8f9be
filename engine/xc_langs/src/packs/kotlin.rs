//! Kotlin (script mode).

use std::path::Path;

use xc_data::Command;
use xc_schema::{Primitive, TypeExpr};

use crate::literal::float_text;
use crate::naming::NamingConvention;
use crate::pack::{arg_identity, join_comma, LanguagePack, SignatureCtx};
use crate::text;

fn commands(file_path: &Path) -> Vec<Command> {
    let file_name = file_path.file_name().unwrap_or_default().to_string_lossy();
    // kotlinc cold starts are slow; the compile+run script step gets a much
    // larger budget than interpreted targets.
    vec![Command::with_timeout(
        ["kotlinc", "-script", file_name.as_ref(), "-no-reflect", "-nowarn"],
        30,
    )]
}

fn signature(ctx: &SignatureCtx<'_>) -> String {
    let mut out = String::new();
    if let Some(doc) = ctx.docstring {
        out.push_str(doc);
        out.push('\n');
    }
    out.push_str(&format!(
        "fun {}({}): {} {{",
        ctx.entry_fn_name, ctx.signature, ctx.return_type
    ));
    out
}

fn escape_dollar(s: &str) -> String {
    s.replace('$', "\\$")
}

pub(crate) fn pack() -> LanguagePack {
    LanguagePack {
        name: "Kotlin",
        file_ext: "kts",
        naming: NamingConvention::CamelCase,
        requires_type_annotations: true,
        prim_overrides: &[(Primitive::Float, |v, _| float_text(v, "f"))],
        escape: Some(escape_dollar),
        format_list: |_, items| format!("arrayListOf({})", items.join(", ")),
        format_set: |_, items| format!("hashSetOf({})", items.join(", ")),
        format_map: |_, _, entries| format!("mapOf({})", entries.join(", ")),
        format_map_entry: |k, v| format!("{k} to {v}"),
        commands,
        signature,
        clean_docstring: text::escape_cpp_like_comment_chars,
        format_docstring: |doc| text::format_cpp_like_docstring(doc, "\n"),
        sig_arg: |name, ty, _| format!("{name}: {}", ty.lang_type()),
        sig_return: |ty: &TypeExpr, _| ty.lang_type().to_string(),
        join_signature: join_comma,
        arg_name: arg_identity,
        word_replacements: &[
            ("array", &["vector", "list"]),
            ("map", &["dict", "dictionary", "dictionaries"]),
        ],
    }
}
