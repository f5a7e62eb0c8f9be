//! Reserved-identifier handling.
//!
//! A parameter named `fn` or `val` is legal in one language and a syntax
//! error in another; the bundled blocklist is the union of keywords across
//! every supported target. Offending parameters are renamed `<name>_arg<i>`
//! consistently across the schema, the test inputs, and the rendered
//! signature.

use std::sync::OnceLock;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::info;
use xc_data::{Question, QuestionError};

const RESERVED_KEYWORDS: &str = include_str!("../data/reserved_keywords.txt");

fn keyword_set() -> &'static FxHashSet<&'static str> {
    static KEYWORDS: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    KEYWORDS.get_or_init(|| {
        RESERVED_KEYWORDS
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect()
    })
}

/// Whether `name` is reserved in at least one target language.
pub fn is_reserved(name: &str) -> bool {
    keyword_set().contains(name)
}

/// Rename reserved parameter names to `<name>_arg<i>`.
///
/// Returns the question unchanged when nothing needs renaming.
pub fn rename_reserved_params(question: &Question) -> Result<Question, QuestionError> {
    let mut renames: FxHashMap<String, String> = FxHashMap::default();
    for (i, param) in question.schema.params.iter().enumerate() {
        if is_reserved(&param.name) {
            renames.insert(param.name.clone(), format!("{}_arg{i}", param.name));
        }
    }
    if renames.is_empty() {
        return Ok(question.clone());
    }
    info!(qid = %question.qid, ?renames, "renaming reserved parameter names");
    question.change_var_names(&renames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn common_keywords_are_reserved() {
        for word in ["fn", "val", "return", "match", "end", "lambda", "type"] {
            assert!(is_reserved(word), "{word} should be reserved");
        }
        assert!(!is_reserved("values"));
        assert!(!is_reserved("target"));
    }

    #[test]
    fn renames_apply_to_schema_and_inputs() {
        let question = Question::from_value(&json!({
            "qid": "1",
            "title": "t",
            "schema": {
                "params": [
                    {"name": "input", "type": "integer"},
                    {"name": "fn", "type": "integer"}
                ],
                "return": {"type": "integer"}
            },
            "test_list": [
                {"idx": 0, "inputs": {"input": 1, "fn": 2}, "outputs": 3}
            ],
            "entry_fn_name": "add"
        }))
        .unwrap();

        let renamed = rename_reserved_params(&question).unwrap();
        assert_eq!(renamed.schema.params[0].name, "input_arg0");
        assert_eq!(renamed.schema.params[1].name, "fn_arg1");
        assert!(renamed.test_list[0].inputs.contains_key("fn_arg1"));
    }
}
