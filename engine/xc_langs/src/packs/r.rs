//! R.

use std::path::Path;

use xc_data::Command;
use xc_schema::{Primitive, TypeExpr};

use crate::literal::integer_text;
use crate::naming::NamingConvention;
use crate::pack::{arg_identity, join_comma, LanguagePack, SignatureCtx};
use crate::text;

fn commands(file_path: &Path) -> Vec<Command> {
    let file_name = file_path.file_name().unwrap_or_default().to_string_lossy();
    vec![Command::new(["Rscript", file_name.as_ref()])]
}

fn signature(ctx: &SignatureCtx<'_>) -> String {
    let mut out = String::new();
    if let Some(doc) = ctx.docstring {
        out.push_str(doc);
        out.push('\n');
    }
    out.push_str(&format!(
        "{} <- function({}) {{",
        ctx.entry_fn_name, ctx.signature
    ));
    out
}

pub(crate) fn pack() -> LanguagePack {
    LanguagePack {
        name: "R",
        file_ext: "r",
        naming: NamingConvention::SnakeCase,
        requires_type_annotations: false,
        prim_overrides: &[
            (Primitive::Boolean, |v, _| {
                if v.as_bool().unwrap_or_default() {
                    "TRUE".to_string()
                } else {
                    "FALSE".to_string()
                }
            }),
            (Primitive::Integer, |v, _| format!("{}L", integer_text(v))),
            (Primitive::Long, |v, _| format!("{}L", integer_text(v))),
        ],
        escape: None,
        format_list: |_, items| format!("list({})", items.join(", ")),
        format_set: |_, items| format!("list({})", items.join(", ")),
        format_map: |_, _, entries| format!("list({})", entries.join(", ")),
        format_map_entry: |k, v| format!("{k} = {v}"),
        commands,
        signature,
        clean_docstring: |doc| doc.to_string(),
        format_docstring: |doc| text::format_line_comment_docstring(doc, "#"),
        sig_arg: |name, _, _| name.to_string(),
        sig_return: |_: &TypeExpr, _| String::new(),
        join_signature: join_comma,
        arg_name: arg_identity,
        word_replacements: &[("list", &["array"])],
    }
}
