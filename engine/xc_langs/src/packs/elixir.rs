//! Elixir (script mode).

use std::path::Path;

use xc_data::Command;
use xc_schema::TypeExpr;

use crate::naming::NamingConvention;
use crate::pack::{arg_identity, join_comma, LanguagePack, SignatureCtx};
use crate::text;

fn commands(file_path: &Path) -> Vec<Command> {
    let file_name = file_path.file_name().unwrap_or_default().to_string_lossy();
    vec![Command::new(["elixir", file_name.as_ref()])]
}

fn signature(ctx: &SignatureCtx<'_>) -> String {
    let mut out = format!("defmodule {} do\n", ctx.entry_cls_name);
    if let Some(doc) = ctx.docstring {
        out.push_str(doc);
        out.push('\n');
    }
    out.push_str(&format!(
        "  def {}({}) do",
        ctx.entry_fn_name, ctx.signature
    ));
    out
}

pub(crate) fn pack() -> LanguagePack {
    LanguagePack {
        name: "Elixir",
        file_ext: "exs",
        naming: NamingConvention::SnakeCase,
        requires_type_annotations: false,
        prim_overrides: &[],
        escape: None,
        format_list: |_, items| format!("[{}]", items.join(", ")),
        format_set: |_, items| format!("MapSet.new([{}])", items.join(", ")),
        format_map: |_, _, entries| format!("%{{{}}}", entries.join(", ")),
        format_map_entry: |k, v| format!("{k} => {v}"),
        commands,
        signature,
        clean_docstring: text::escape_triple_quotes,
        format_docstring: |doc| format!("\"\"\"\n{doc}\n\"\"\""),
        sig_arg: |name, _, _| name.to_string(),
        sig_return: |_: &TypeExpr, _| String::new(),
        join_signature: join_comma,
        arg_name: arg_identity,
        word_replacements: &[
            ("list", &["vector", "array"]),
            ("map", &["dict", "dictionary", "dictionaries"]),
        ],
    }
}
