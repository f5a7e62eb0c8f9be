//! C++.

use std::path::Path;

use xc_data::Command;
use xc_schema::TypeExpr;

use crate::naming::NamingConvention;
use crate::pack::{arg_identity, join_comma, LanguagePack, SignatureCtx};
use crate::text;

fn commands(file_path: &Path) -> Vec<Command> {
    let file_name = file_path.file_name().unwrap_or_default().to_string_lossy();
    vec![
        Command::new(["g++", file_name.as_ref(), "-o", "main.exe"]),
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
        "{} {}({}) {{",
        ctx.return_type, ctx.entry_fn_name, ctx.signature
    ));
    out
}

pub(crate) fn pack() -> LanguagePack {
    LanguagePack {
        name: "C++",
        file_ext: "cpp",
        naming: NamingConvention::CamelCase,
        requires_type_annotations: true,
        prim_overrides: &[],
        escape: None,
        format_list: |_, items| format!("{{{}}}", items.join(", ")),
        format_set: |_, items| format!("{{{}}}", items.join(", ")),
        format_map: |_, _, entries| format!("{{{}}}", entries.join(", ")),
        format_map_entry: |k, v| format!("{{{k}, {v}}}"),
        commands,
        signature,
        clean_docstring: text::escape_cpp_like_comment_chars,
        format_docstring: |doc| text::format_cpp_like_docstring(doc, "\n"),
        sig_arg: |name, ty, _| format!("{} {name}", ty.lang_type()),
        sig_return: |ty: &TypeExpr, _| ty.lang_type().to_string(),
        join_signature: join_comma,
        arg_name: arg_identity,
        word_replacements: &[
            ("vector", &["array", "list"]),
            ("map", &["dict", "dictionary", "dictionaries"]),
        ],
    }
}
