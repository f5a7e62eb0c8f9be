//! Julia.

use std::path::Path;

use xc_data::Command;
use xc_schema::TypeExpr;

use crate::naming::NamingConvention;
use crate::pack::{arg_identity, join_comma, LanguagePack, SignatureCtx};
use crate::text;

fn commands(file_path: &Path) -> Vec<Command> {
    let file_name = file_path.file_name().unwrap_or_default().to_string_lossy();
    vec![Command::new(["julia", file_name.as_ref()])]
}

fn signature(ctx: &SignatureCtx<'_>) -> String {
    let mut out = String::new();
    if let Some(doc) = ctx.docstring {
        out.push_str(doc);
        out.push('\n');
    }
    out.push_str(&format!(
        "function {}({}){}",
        ctx.entry_fn_name, ctx.signature, ctx.return_type
    ));
    out
}

fn list_literal(ty: &TypeExpr, items: &[String]) -> String {
    if items.is_empty() {
        // `[]` would infer Vector{Any}; spell out the element type instead.
        return format!("{}(undef,0)", ty.lang_type());
    }
    format!("[{}]", items.join(", "))
}

fn set_literal(ty: &TypeExpr, items: &[String]) -> String {
    if items.is_empty() {
        return format!("{}()", ty.lang_type());
    }
    format!("Set([{}])", items.join(", "))
}

fn map_literal(key: &TypeExpr, value: &TypeExpr, entries: &[String]) -> String {
    if entries.is_empty() {
        return format!("Dict{{{},{}}}()", key.lang_type(), value.lang_type());
    }
    format!("Dict({})", entries.join(","))
}

fn escape_dollar(s: &str) -> String {
    s.replace('$', "\\$")
}

pub(crate) fn pack() -> LanguagePack {
    LanguagePack {
        name: "Julia",
        file_ext: "jl",
        naming: NamingConvention::SnakeCase,
        requires_type_annotations: false,
        prim_overrides: &[],
        escape: Some(escape_dollar),
        format_list: list_literal,
        format_set: set_literal,
        format_map: map_literal,
        format_map_entry: |k, v| format!("{k} => {v}"),
        commands,
        signature,
        clean_docstring: text::escape_triple_quotes,
        format_docstring: |doc| format!("\"\"\"\n{doc}\n\"\"\""),
        sig_arg: |name, ty, annotate| {
            if annotate {
                format!("{name}::{}", ty.lang_type())
            } else {
                name.to_string()
            }
        },
        sig_return: |ty: &TypeExpr, annotate| {
            if annotate {
                format!("::{}", ty.lang_type())
            } else {
                String::new()
            }
        },
        join_signature: join_comma,
        arg_name: arg_identity,
        word_replacements: &[
            ("vector", &["array", "list"]),
            ("dictionary", &["map"]),
        ],
    }
}
