//! Java.

use std::path::Path;

use xc_data::Command;
use xc_schema::{Primitive, TypeExpr};

use crate::literal::{float_text, integer_text};
use crate::naming::NamingConvention;
use crate::pack::{arg_identity, join_comma, LanguagePack, SignatureCtx};
use crate::text;

fn commands(file_path: &Path) -> Vec<Command> {
    let file_name = file_path.file_name().unwrap_or_default().to_string_lossy();
    vec![Command::with_timeout(["java", file_name.as_ref()], 15)]
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

pub(crate) fn pack() -> LanguagePack {
    LanguagePack {
        name: "Java",
        file_ext: "java",
        naming: NamingConvention::CamelCase,
        requires_type_annotations: true,
        prim_overrides: &[
            (Primitive::Float, |v, _| float_text(v, "f")),
            (Primitive::Long, |v, _| format!("{}L", integer_text(v))),
        ],
        escape: None,
        format_list: |_, items| format!("new ArrayList<>(Arrays.asList({}))", items.join(", ")),
        format_set: |_, items| format!("new HashSet<>(Arrays.asList({}))", items.join(", ")),
        format_map: |_, _, entries| format!("Map.ofEntries({})", entries.join(", ")),
        format_map_entry: |k, v| format!("entry({k}, {v})"),
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
            ("array", &["vector", "list"]),
            ("map", &["dict", "dictionary", "dictionaries"]),
        ],
    }
}
