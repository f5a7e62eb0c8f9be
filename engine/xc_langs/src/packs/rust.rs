//! Rust.

use std::path::Path;

use xc_data::Command;
use xc_schema::{Primitive, TypeExpr};

use crate::literal::string_literal;
use crate::naming::NamingConvention;
use crate::pack::{arg_identity, join_comma, LanguagePack, SignatureCtx};
use crate::text;

fn commands(file_path: &Path) -> Vec<Command> {
    let file_name = file_path.file_name().unwrap_or_default().to_string_lossy();
    let stem = file_path.file_stem().unwrap_or_default().to_string_lossy();
    let exe = format!("./{stem}.exe");
    vec![
        Command::new([
            "rustc".to_string(),
            file_name.to_string(),
            "-o".to_string(),
            exe.clone(),
        ]),
        Command::new([exe]),
    ]
}

fn signature(ctx: &SignatureCtx<'_>) -> String {
    let mut out = String::new();
    if let Some(doc) = ctx.docstring {
        out.push_str(doc);
        out.push('\n');
    }
    out.push_str(&format!(
        "pub fn {}({}) -> {} {{",
        ctx.entry_fn_name, ctx.signature, ctx.return_type
    ));
    out
}

fn map_literal(_: &TypeExpr, _: &TypeExpr, entries: &[String]) -> String {
    format!("HashMap::from([{}])", entries.join(", "))
}

pub(crate) fn pack() -> LanguagePack {
    LanguagePack {
        name: "Rust",
        file_ext: "rs",
        naming: NamingConvention::SnakeCase,
        requires_type_annotations: true,
        prim_overrides: &[(Primitive::String, |v, escape| {
            format!("{}.to_string()", string_literal(v, '"', escape))
        })],
        escape: None,
        format_list: |_, items| format!("Vec::from([{}])", items.join(", ")),
        format_set: |_, items| {
            format!("Vec::from([{}]).into_iter().collect()", items.join(", "))
        },
        format_map: map_literal,
        format_map_entry: |k, v| format!("({k}, {v})"),
        commands,
        signature,
        clean_docstring: |doc| text::escape_line_comment(doc, "///"),
        format_docstring: |doc| text::format_line_comment_docstring(doc, "///"),
        sig_arg: |name, ty, _| format!("{name}: {}", ty.lang_type()),
        sig_return: |ty: &TypeExpr, _| ty.lang_type().to_string(),
        join_signature: join_comma,
        arg_name: arg_identity,
        word_replacements: &[
            ("vector", &["vec", "list"]),
            ("map", &["dict", "dictionary", "dictionaries"]),
        ],
    }
}
