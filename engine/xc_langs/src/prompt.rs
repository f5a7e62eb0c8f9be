//! Prompt and signature translation.
//!
//! Produces the human-facing view of a question in a target language: the
//! entry-function signature (optionally with the description as a docstring)
//! and the description itself with idiom words swapped (`list` ↔ `vector` ↔
//! `array`), preserving case, pluralization, and the `a`/`an` article.

use regex::Regex;
use tracing::debug;
use xc_schema::BoundSchema;

use crate::pack::{LanguagePack, SignatureCtx};

/// Format the entry function name in the pack's naming convention.
pub fn translate_entry_function_name(pack: &LanguagePack, entry_fn_name: &str) -> String {
    pack.naming.format(entry_fn_name)
}

/// Translate the argument signature, parameter names, and return type.
///
/// Returns `(signature, params, return_type)` where `signature` is the joined
/// argument list and `params` are the translated bare names.
pub fn translate_type_signature(
    pack: &LanguagePack,
    schema: &BoundSchema,
    use_type_annotation: bool,
) -> (String, Vec<String>, String) {
    let annotate = use_type_annotation || pack.requires_type_annotations;
    let mut signature_args = Vec::with_capacity(schema.params.len());
    let mut params = Vec::with_capacity(schema.params.len());
    for (name, ty) in &schema.params {
        let translated = pack.argument_name(name);
        signature_args.push(pack.signature_argument(&translated, ty, annotate));
        params.push(translated);
    }
    let return_type = pack.signature_return(&schema.return_type, annotate);
    (pack.join_signature(&signature_args), params, return_type)
}

/// Render the full opening declaration of the entry function.
pub fn translate_signature(
    pack: &LanguagePack,
    entry_fn_name: &str,
    entry_cls_name: &str,
    schema: &BoundSchema,
    use_type_annotation: bool,
    docstring: Option<&str>,
) -> String {
    let entry_fn = translate_entry_function_name(pack, entry_fn_name);
    let (signature, params, return_type) =
        translate_type_signature(pack, schema, use_type_annotation);
    pack.render_signature(&SignatureCtx {
        entry_fn_name: &entry_fn,
        entry_cls_name,
        signature: &signature,
        return_type: &return_type,
        params: &params,
        docstring,
    })
}

/// Render the signature with the (translated) description as its docstring.
pub fn translate_signature_with_docstring(
    pack: &LanguagePack,
    source_language: &str,
    text: &str,
    entry_fn_name: &str,
    entry_cls_name: &str,
    schema: &BoundSchema,
    use_type_annotation: bool,
) -> String {
    let mut docstring = translate_prompt(pack, source_language, text, entry_fn_name);
    docstring = docstring.replace('\\', "\\\\");
    if let Some(escape) = pack.escape_fn() {
        docstring = escape(&docstring);
    }
    let docstring = pack.format_docstring(&docstring);
    translate_signature(
        pack,
        entry_fn_name,
        entry_cls_name,
        schema,
        use_type_annotation,
        Some(&docstring),
    )
}

/// Translate a natural-language prompt to the target language's idiom.
///
/// Replaces mentions of the source language with the target, re-spells the
/// entry function name in the target convention, swaps idiom words per the
/// pack's replacement map, and escapes comment terminators.
pub fn translate_prompt(
    pack: &LanguagePack,
    source_language: &str,
    prompt: &str,
    entry_fn_name: &str,
) -> String {
    let mut prompt = prompt.replace(
        entry_fn_name,
        &translate_entry_function_name(pack, entry_fn_name),
    );

    let casings: [fn(&str) -> String; 3] = [title_case, str::to_lowercase, str::to_uppercase];
    for transform in casings {
        prompt = prompt.replace(
            &transform(source_language),
            &transform(pack.name),
        );
    }

    for (replacement, originals) in pack.word_replacements() {
        prompt = replace_words(&prompt, replacement, originals);
    }
    debug!(lang = pack.name, "translated prompt");
    pack.clean_docstring(&prompt)
}

/// Swap whole-word mentions of `originals` for `replacement`, preserving
/// case (lower/Title/UPPER), a trailing plural `s`, and the `a`/`an`
/// article.
fn replace_words(prompt: &str, replacement: &str, originals: &[&str]) -> String {
    let alternatives = originals
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    // The trailing punctuation is captured and re-emitted because the regex
    // engine has no lookahead.
    let pattern = format!(
        r"(?P<lead>^|[\s(])(?P<article>[Aa]n? )?(?P<word>(?i:{alternatives}))(?P<plural>s?)(?P<trail>[\s,.;:)]|$)"
    );
    let Ok(re) = Regex::new(&pattern) else {
        return prompt.to_string();
    };

    let replaced = re.replace_all(prompt, |caps: &regex::Captures<'_>| {
        let word = &caps["word"];
        let cased = match_case(word, replacement);
        // A plural match is either the captured `s` or an alternative that
        // is itself plural ("dictionaries").
        let was_plural =
            !caps["plural"].is_empty() || word.to_lowercase().ends_with('s');
        let plural = if was_plural && !cased.ends_with('s') {
            "s"
        } else {
            ""
        };
        let article = caps.name("article").map_or(String::new(), |a| {
            adjust_article(a.as_str(), &cased)
        });
        format!(
            "{}{}{}{}{}",
            &caps["lead"], article, cased, plural, &caps["trail"]
        )
    });
    replaced.into_owned()
}

/// Re-case `replacement` to match the case pattern of `matched`.
fn match_case(matched: &str, replacement: &str) -> String {
    if matched.chars().all(|c| !c.is_lowercase()) && matched.chars().any(char::is_uppercase) {
        replacement.to_uppercase()
    } else if matched.chars().next().is_some_and(char::is_uppercase) {
        title_case(replacement)
    } else {
        replacement.to_lowercase()
    }
}

/// Fix `a`/`an` for the new word's initial sound, keeping capitalization.
fn adjust_article(article: &str, word: &str) -> String {
    let capital = article.starts_with('A');
    let needs_an = word
        .chars()
        .next()
        .is_some_and(|c| "aeiouAEIOU".contains(c));
    let base = if needs_an { "an" } else { "a" };
    if capital {
        format!("{} ", title_case(base))
    } else {
        format!("{base} ")
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::lookup_pack;
    use pretty_assertions::assert_eq;
    use xc_schema::lookup_spec;

    fn schema(lang: &str) -> BoundSchema {
        BoundSchema::parse(
            &[("values", "list<integer>"), ("target", "integer")],
            "boolean",
            lookup_spec(lang).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn cpp_signature() {
        let pack = lookup_pack("C++").unwrap();
        let sig = translate_signature(pack, "find_target", "Solution", &schema("C++"), false, None);
        assert_eq!(sig, "bool findTarget(vector<int> values, int target) {");
    }

    #[test]
    fn python_signature_without_annotations() {
        let pack = lookup_pack("Python").unwrap();
        let sig = translate_signature(pack, "findTarget", "Solution", &schema("Python"), false, None);
        assert_eq!(sig, "def find_target(values, target):");
    }

    #[test]
    fn python_signature_with_annotations() {
        let pack = lookup_pack("Python").unwrap();
        let sig = translate_signature(pack, "findTarget", "Solution", &schema("Python"), true, None);
        assert_eq!(
            sig,
            "def find_target(values: List[int], target: int) -> bool:"
        );
    }

    #[test]
    fn java_signature_includes_class() {
        let pack = lookup_pack("Java").unwrap();
        let sig = translate_signature(pack, "find_target", "Checker", &schema("Java"), false, None);
        assert_eq!(
            sig,
            "class Checker {\n\n    public Boolean findTarget(ArrayList<Integer> values, Integer target) {"
        );
    }

    #[test]
    fn haskell_signature_arrow_style() {
        let pack = lookup_pack("Haskell").unwrap();
        let sig = translate_signature(pack, "find_target", "Solution", &schema("Haskell"), false, None);
        assert_eq!(
            sig,
            "findTarget :: [Integer] -> Integer -> Bool\nfindTarget values target = "
        );
    }

    #[test]
    fn php_arguments_are_sigils() {
        let pack = lookup_pack("PHP").unwrap();
        let sig = translate_signature(pack, "find_target", "Solution", &schema("PHP"), false, None);
        assert_eq!(sig, "function findTarget($values, $target) {");
    }

    #[test]
    fn word_replacement_preserves_article_and_plural() {
        let pack = lookup_pack("C++").unwrap();
        let out = translate_prompt(pack, "Python", "Given a list of numbers, return lists.", "f");
        assert_eq!(out, "Given a vector of numbers, return vectors.");
    }

    #[test]
    fn word_replacement_fixes_articles() {
        // Java replaces "list" with "array": "a list" must become "an array".
        let pack = lookup_pack("Java").unwrap();
        let out = translate_prompt(pack, "Python", "Takes a list of values.", "f");
        assert_eq!(out, "Takes an array of values.");
    }

    #[test]
    fn word_replacement_preserves_case() {
        let pack = lookup_pack("C++").unwrap();
        let out = translate_prompt(pack, "Python", "List of items. The LIST is sorted.", "f");
        assert_eq!(out, "Vector of items. The VECTOR is sorted.");
    }

    #[test]
    fn source_language_mentions_are_replaced() {
        let pack = lookup_pack("Go").unwrap();
        let out = translate_prompt(pack, "Python", "Write a Python function.", "f");
        assert_eq!(out, "Write a Go function.");
    }

    #[test]
    fn entry_name_mentions_are_reconverted() {
        let pack = lookup_pack("C++").unwrap();
        let out = translate_prompt(pack, "Python", "Call my_func(x) twice.", "my_func");
        assert_eq!(out, "Call myFunc(x) twice.");
    }

    #[test]
    fn docstring_signature_wraps_comment() {
        let pack = lookup_pack("C++").unwrap();
        let sig = translate_signature_with_docstring(
            pack,
            "Python",
            "Checks the values.",
            "find_target",
            "Solution",
            &schema("C++"),
            false,
        );
        assert!(sig.starts_with("/**\n * Checks the values.\n */\n"), "{sig}");
        assert!(sig.ends_with("bool findTarget(vector<int> values, int target) {"));
    }
}
