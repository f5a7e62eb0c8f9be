//! Haskell.

use std::path::Path;

use xc_data::Command;
use xc_schema::{Primitive, TypeExpr};

use crate::naming::NamingConvention;
use crate::pack::{LanguagePack, SignatureCtx};

fn commands(file_path: &Path) -> Vec<Command> {
    let file_name = file_path.file_name().unwrap_or_default().to_string_lossy();
    vec![
        Command::new(["ghc", "-o", "main.exe", file_name.as_ref()]),
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
        "{fn_name} :: {sig} -> {ret}\n{fn_name} {params} = ",
        fn_name = ctx.entry_fn_name,
        sig = ctx.signature,
        ret = ctx.return_type,
        params = ctx.params.join(" "),
    ));
    out
}

fn format_docstring(doc: &str) -> String {
    doc.lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!("-- | {line}")
            } else {
                format!("-- {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn pack() -> LanguagePack {
    LanguagePack {
        name: "Haskell",
        file_ext: "hs",
        naming: NamingConvention::CamelCase,
        requires_type_annotations: true,
        prim_overrides: &[(Primitive::Boolean, |v, _| {
            if v.as_bool().unwrap_or_default() {
                "True".to_string()
            } else {
                "False".to_string()
            }
        })],
        escape: None,
        format_list: |_, items| format!("[{}]", items.join(", ")),
        format_set: |_, items| format!("Set.fromList [{}]", items.join(", ")),
        format_map: |_, _, entries| format!("Map.fromList [{}]", entries.join(", ")),
        format_map_entry: |k, v| format!("({k}, {v})"),
        commands,
        signature,
        clean_docstring: |doc| crate::text::escape_line_comment(doc, "--"),
        format_docstring,
        // Haskell signatures list types only; names appear on the binding
        // line via `params`.
        sig_arg: |_, ty, _| ty.lang_type().to_string(),
        sig_return: |ty: &TypeExpr, _| ty.lang_type().to_string(),
        join_signature: |args| args.join(" -> "),
        arg_name: |name| NamingConvention::SnakeCase.format(name),
        word_replacements: &[
            ("list", &["vector", "array"]),
            ("map", &["dict", "dictionary", "dictionaries"]),
        ],
    }
}
