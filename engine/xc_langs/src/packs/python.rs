//! Python 3.

use std::path::Path;

use xc_data::Command;
use xc_schema::{Primitive, TypeExpr};

use crate::naming::NamingConvention;
use crate::pack::{arg_identity, join_comma, LanguagePack, SignatureCtx};
use crate::text;

fn commands(file_path: &Path) -> Vec<Command> {
    let file_name = file_path.file_name().unwrap_or_default().to_string_lossy();
    vec![Command::new(["python", file_name.as_ref()])]
}

fn signature(ctx: &SignatureCtx<'_>) -> String {
    let mut out = format!(
        "def {}({}){}:",
        ctx.entry_fn_name, ctx.signature, ctx.return_type
    );
    if let Some(doc) = ctx.docstring {
        out.push('\n');
        out.push_str(doc);
    }
    out
}

fn format_docstring(doc: &str) -> String {
    let mut lines = Vec::new();
    for (i, line) in doc.lines().enumerate() {
        if i == 0 {
            lines.push(format!("    \"\"\"{line}"));
        } else {
            lines.push(format!("    {line}"));
        }
    }
    lines.push("    \"\"\"".to_string());
    lines.join("\n")
}

pub(crate) fn pack() -> LanguagePack {
    LanguagePack {
        name: "Python",
        file_ext: "py",
        naming: NamingConvention::SnakeCase,
        requires_type_annotations: false,
        prim_overrides: &[(Primitive::Boolean, |v, _| {
            if v.as_bool().unwrap_or_default() {
                "True".to_string()
            } else {
                "False".to_string()
            }
        })],
        escape: None,
        format_list: |_, items| format!("[{}]", items.join(", ")),
        format_set: |_, items| format!("set([{}])", items.join(", ")),
        format_map: |_, _, entries| format!("{{{}}}", entries.join(", ")),
        format_map_entry: |k, v| format!("{k}: {v}"),
        commands,
        signature,
        clean_docstring: text::escape_triple_quotes,
        format_docstring,
        sig_arg: |name, ty, annotate| {
            if annotate {
                format!("{name}: {}", ty.lang_type())
            } else {
                name.to_string()
            }
        },
        sig_return: |ty: &TypeExpr, annotate| {
            if annotate {
                format!(" -> {}", ty.lang_type())
            } else {
                String::new()
            }
        },
        join_signature: join_comma,
        arg_name: arg_identity,
        word_replacements: &[
            ("list", &["array", "vector"]),
            ("dictionary", &["map"]),
        ],
    }
}
