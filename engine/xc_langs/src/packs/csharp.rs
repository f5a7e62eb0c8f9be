//! C#.

use std::path::Path;

use xc_data::Command;
use xc_schema::{Primitive, TypeExpr};

use crate::literal::float_text;
use crate::naming::NamingConvention;
use crate::pack::{arg_identity, join_comma, LanguagePack, SignatureCtx};
use crate::packs::element_lang_type;
use crate::text;

fn commands(file_path: &Path) -> Vec<Command> {
    let file_name = file_path.file_name().unwrap_or_default().to_string_lossy();
    vec![
        Command::new([
            "mono-csc",
            "-r:System.Web.dll",
            "-r:System.Web.Extensions.dll",
            file_name.as_ref(),
            "-o",
            "main.exe",
        ]),
        Command::new(["mono", "main.exe"]),
    ]
}

fn signature(ctx: &SignatureCtx<'_>) -> String {
    let mut out = format!("class {} {{\n", ctx.entry_cls_name);
    if let Some(doc) = ctx.docstring {
        out.push_str(doc);
    }
    out.push('\n');
    out.push_str(&format!(
        "    public {} {}({}) {{",
        ctx.return_type, ctx.entry_fn_name, ctx.signature
    ));
    out
}

fn map_literal(key: &TypeExpr, value: &TypeExpr, entries: &[String]) -> String {
    format!(
        "new Dictionary<{}, {}>{{{}}}",
        key.lang_type(),
        value.lang_type(),
        entries.join(", ")
    )
}

pub(crate) fn pack() -> LanguagePack {
    LanguagePack {
        name: "CSharp",
        file_ext: "cs",
        naming: NamingConvention::PascalCase,
        requires_type_annotations: true,
        prim_overrides: &[
            (Primitive::Float, |v, _| float_text(v, "f")),
            (Primitive::Double, |v, _| float_text(v, "m")),
        ],
        escape: None,
        format_list: |ty, items| {
            format!("new List<{}>{{{}}}", element_lang_type(ty), items.join(", "))
        },
        format_set: |ty, items| {
            format!(
                "new HashSet<{}>{{{}}}",
                element_lang_type(ty),
                items.join(", ")
            )
        },
        format_map: map_literal,
        format_map_entry: |k, v| format!("{{{k}, {v}}}"),
        commands,
        signature,
        clean_docstring: text::escape_cpp_like_comment_chars,
        format_docstring: |doc| {
            format!("    {}", text::format_cpp_like_docstring(doc, "\n    "))
        },
        sig_arg: |name, ty, _| format!("{} {name}", ty.lang_type()),
        sig_return: |ty: &TypeExpr, _| ty.lang_type().to_string(),
        join_signature: join_comma,
        arg_name: arg_identity,
        word_replacements: &[
            ("list", &["array", "vector"]),
            ("dictionary", &["map"]),
        ],
    }
}
