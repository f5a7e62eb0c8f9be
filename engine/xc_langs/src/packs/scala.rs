//! Scala.

use std::path::Path;

use xc_data::Command;
use xc_schema::{Primitive, TypeExpr};

use crate::literal::{float_text, integer_text};
use crate::naming::NamingConvention;
use crate::pack::{arg_identity, join_comma, LanguagePack, SignatureCtx};
use crate::text;

fn commands(file_path: &Path) -> Vec<Command> {
    let file_name = file_path.file_name().unwrap_or_default().to_string_lossy();
    vec![
        Command::with_timeout(
            ["scalac", "-d", "evaluation.jar", file_name.as_ref()],
            15,
        ),
        Command::new(["scala", "-d", "evaluation.jar", "QuestionEvaluator"]),
    ]
}

fn signature(ctx: &SignatureCtx<'_>) -> String {
    let mut out = String::new();
    if let Some(doc) = ctx.docstring {
        out.push_str(doc);
        out.push('\n');
    }
    out.push_str(&format!(
        "def {}({}){} = {{",
        ctx.entry_fn_name, ctx.signature, ctx.return_type
    ));
    out
}

pub(crate) fn pack() -> LanguagePack {
    LanguagePack {
        name: "Scala",
        file_ext: "scala",
        naming: NamingConvention::CamelCase,
        requires_type_annotations: true,
        prim_overrides: &[
            (Primitive::Float, |v, _| float_text(v, "F")),
            (Primitive::Long, |v, _| format!("{}L", integer_text(v))),
        ],
        escape: None,
        format_list: |_, items| format!("List({})", items.join(", ")),
        format_set: |_, items| format!("HashSet({})", items.join(", ")),
        format_map: |_, _, entries| format!("HashMap({})", entries.join(", ")),
        format_map_entry: |k, v| format!("{k} -> {v}"),
        commands,
        signature,
        clean_docstring: text::escape_cpp_like_comment_chars,
        format_docstring: |doc| text::format_cpp_like_docstring(doc, "\n"),
        sig_arg: |name, ty, _| format!("{name}: {}", ty.lang_type()),
        sig_return: |ty: &TypeExpr, annotate| {
            if annotate {
                format!(": {}", ty.lang_type())
            } else {
                String::new()
            }
        },
        join_signature: join_comma,
        arg_name: arg_identity,
        word_replacements: &[
            ("array", &["vector"]),
            ("map", &["dict", "dictionary", "dictionaries"]),
        ],
    }
}
