//! Lua.

use std::path::Path;

use xc_data::Command;
use xc_schema::TypeExpr;

use crate::naming::NamingConvention;
use crate::pack::{arg_identity, join_comma, LanguagePack, SignatureCtx};
use crate::text;

fn commands(file_path: &Path) -> Vec<Command> {
    let file_name = file_path.file_name().unwrap_or_default().to_string_lossy();
    vec![Command::new(["lua", file_name.as_ref()])]
}

fn signature(ctx: &SignatureCtx<'_>) -> String {
    let mut out = String::new();
    if let Some(doc) = ctx.docstring {
        out.push_str(doc);
        out.push('\n');
    }
    out.push_str(&format!(
        "function {}({})",
        ctx.entry_fn_name, ctx.signature
    ));
    out
}

fn set_literal(_: &TypeExpr, items: &[String]) -> String {
    let members: Vec<String> = items.iter().map(|v| format!("[{v}]=true")).collect();
    format!("{{{}}}", members.join(", "))
}

pub(crate) fn pack() -> LanguagePack {
    LanguagePack {
        name: "Lua",
        file_ext: "lua",
        naming: NamingConvention::SnakeCase,
        requires_type_annotations: false,
        prim_overrides: &[],
        escape: None,
        format_list: |_, items| format!("{{{}}}", items.join(", ")),
        format_set: set_literal,
        format_map: |_, _, entries| format!("{{{}}}", entries.join(", ")),
        format_map_entry: |k, v| format!("[{k}]={v}"),
        commands,
        signature,
        clean_docstring: |doc| text::escape_line_comment(doc, "--"),
        format_docstring: |doc| text::format_line_comment_docstring(doc, "--"),
        sig_arg: |name, _, _| name.to_string(),
        sig_return: |ty: &TypeExpr, _| ty.lang_type().to_string(),
        join_signature: join_comma,
        arg_name: arg_identity,
        word_replacements: &[
            ("array", &["vector", "list"]),
            ("table", &["map", "dict", "dictionary", "dictionaries"]),
        ],
    }
}
