//! PHP.

use std::path::Path;

use xc_data::Command;
use xc_schema::TypeExpr;

use crate::naming::NamingConvention;
use crate::pack::{join_comma, LanguagePack, SignatureCtx};
use crate::text;

fn commands(file_path: &Path) -> Vec<Command> {
    let file_name = file_path.file_name().unwrap_or_default().to_string_lossy();
    vec![Command::new(["php", file_name.as_ref()])]
}

fn signature(ctx: &SignatureCtx<'_>) -> String {
    let mut out = String::new();
    if let Some(doc) = ctx.docstring {
        out.push_str(doc);
        out.push('\n');
    }
    out.push_str(&format!(
        "function {}({}) {{",
        ctx.entry_fn_name, ctx.signature
    ));
    out
}

fn set_literal(_: &TypeExpr, items: &[String]) -> String {
    let members: Vec<String> = items.iter().map(|v| format!("{v} => true")).collect();
    format!("array({})", members.join(", "))
}

fn format_docstring(doc: &str) -> String {
    let mut lines = vec!["/**".to_string()];
    for line in doc.lines() {
        lines.push(format!("* {line}"));
    }
    lines.push("*/".to_string());
    lines.join("\n")
}

fn escape_dollar(s: &str) -> String {
    s.replace('$', "\\$")
}

pub(crate) fn pack() -> LanguagePack {
    LanguagePack {
        name: "PHP",
        file_ext: "php",
        naming: NamingConvention::CamelCase,
        requires_type_annotations: false,
        prim_overrides: &[],
        escape: Some(escape_dollar),
        format_list: |_, items| format!("array({})", items.join(", ")),
        format_set: set_literal,
        format_map: |_, _, entries| format!("array({})", entries.join(", ")),
        format_map_entry: |k, v| format!("{k} => {v}"),
        commands,
        signature,
        clean_docstring: text::escape_cpp_like_comment_chars,
        format_docstring,
        sig_arg: |name, _, _| format!("${name}"),
        sig_return: |ty: &TypeExpr, _| ty.lang_type().to_string(),
        join_signature: join_comma,
        arg_name: |name| format!("${name}"),
        word_replacements: &[("array", &["vector", "list", "map", "dict", "dictionary", "dictionaries"])],
    }
}
