//! Go.

use std::path::Path;

use xc_data::Command;
use xc_schema::{TypeExpr, TypeKind};

use crate::naming::NamingConvention;
use crate::pack::{arg_identity, join_comma, LanguagePack, SignatureCtx};
use crate::text;

fn commands(file_path: &Path) -> Vec<Command> {
    let file_name = file_path.file_name().unwrap_or_default().to_string_lossy();
    vec![
        Command::new(["go", "build", "-o", "main.exe", file_name.as_ref()]),
        Command::new(["./main.exe"]),
    ]
}

fn signature(ctx: &SignatureCtx<'_>) -> String {
    let mut out = String::new();
    if let Some(doc) = ctx.docstring {
        out.push_str(doc);
        out.push('\n');
    }
    out.push_str(&format!(
        "func {}({}) {} {{",
        ctx.entry_fn_name, ctx.signature, ctx.return_type
    ));
    out
}

fn map_literal(key: &TypeExpr, value: &TypeExpr, entries: &[String]) -> String {
    format!(
        "map[{}]{}{{{}}}",
        key.lang_type(),
        value.lang_type(),
        entries.join(", ")
    )
}

fn set_literal(ty: &TypeExpr, items: &[String]) -> String {
    let members: Vec<String> = items.iter().map(|v| format!("{v}: true")).collect();
    format!("{}{{{}}}", ty.lang_type(), members.join(", "))
}

fn list_literal(ty: &TypeExpr, items: &[String]) -> String {
    // Nested slice literals repeat the type name; Go accepts the inner
    // repetitions and requires the outer one.
    debug_assert!(matches!(ty.kind, TypeKind::List(_)));
    format!("{}{{{}}}", ty.lang_type(), items.join(", "))
}

pub(crate) fn pack() -> LanguagePack {
    LanguagePack {
        name: "Go",
        file_ext: "go",
        naming: NamingConvention::CamelCase,
        requires_type_annotations: true,
        prim_overrides: &[],
        escape: None,
        format_list: list_literal,
        format_set: set_literal,
        format_map: map_literal,
        format_map_entry: |k, v| format!("{k}: {v}"),
        commands,
        signature,
        clean_docstring: |doc| text::escape_line_comment(doc, "//"),
        format_docstring: |doc| text::format_line_comment_docstring(doc, "//"),
        sig_arg: |name, ty, _| format!("{name} {}", ty.lang_type()),
        sig_return: |ty: &TypeExpr, _| ty.lang_type().to_string(),
        join_signature: join_comma,
        arg_name: arg_identity,
        word_replacements: &[
            ("array", &["vector", "list"]),
            ("map", &["dict", "dictionary", "dictionaries"]),
        ],
    }
}
