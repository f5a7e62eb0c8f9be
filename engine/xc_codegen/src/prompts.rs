//! Prompt-information generation.
//!
//! The prediction-producing side needs the question rendered for each target
//! language: the signature, the signature with the description as a
//! docstring, and the translated description. Obfuscation (variable
//! renaming) hooks in here, before translation.

use serde::{Deserialize, Serialize};
use xc_data::Question;
use xc_langs::{
    translate_entry_function_name, translate_prompt, translate_signature,
    translate_signature_with_docstring, LanguagePack,
};
use xc_schema::BoundSchema;

use crate::error::GenError;
use crate::templates::TemplateSet;

/// The language in which question descriptions are written.
const SOURCE_LANGUAGE: &str = "Python";

/// Per-language prompt material for one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptInfo {
    pub qid: String,
    pub signature: String,
    pub signature_with_docstring: Option<String>,
    pub text: Option<String>,
    pub header: String,
    pub entry_fn_name: String,
    pub entry_cls_name: String,
    pub arguments: Vec<String>,
}

/// Generate the prompt info for a question.
///
/// `obfuscate` maps the question to the variant shown to the candidate
/// producer (identity for un-obfuscated runs); `force_type_annotations`
/// overrides the question's own annotation preference.
pub fn generate_prompt_info(
    question: &Question,
    pack: &LanguagePack,
    schema: &BoundSchema,
    templates: &TemplateSet,
    force_type_annotations: bool,
) -> Result<PromptInfo, GenError> {
    let use_annotations = question.use_type_annotation || force_type_annotations;

    let signature = translate_signature(
        pack,
        &question.entry_fn_name,
        &question.entry_cls_name,
        schema,
        use_annotations,
        None,
    );

    let (signature_with_docstring, text) = match question.text.as_deref() {
        Some(text) => {
            let with_doc = translate_signature_with_docstring(
                pack,
                SOURCE_LANGUAGE,
                text,
                &question.entry_fn_name,
                &question.entry_cls_name,
                schema,
                use_annotations,
            );
            let description =
                translate_prompt(pack, SOURCE_LANGUAGE, text, &question.entry_fn_name);
            (Some(with_doc), Some(description))
        }
        None => (None, None),
    };

    Ok(PromptInfo {
        qid: question.qid.clone(),
        signature,
        signature_with_docstring,
        text,
        header: templates.render_header()?,
        entry_fn_name: translate_entry_function_name(pack, &question.entry_fn_name),
        entry_cls_name: question.entry_cls_name.clone(),
        arguments: schema.input_order().iter().map(ToString::to_string).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use xc_langs::lookup_pack;
    use xc_schema::lookup_spec;

    #[test]
    fn prompt_info_for_a_described_question() {
        let question = Question::from_value(&json!({
            "qid": "9",
            "title": "Sum list",
            "schema": {
                "params": [{"name": "values", "type": "list<integer>"}],
                "return": {"type": "integer"}
            },
            "test_list": [
                {"idx": 0, "inputs": {"values": [1, 2]}, "outputs": 3}
            ],
            "entry_fn_name": "sum_list",
            "text": "Return the sum of a list of numbers."
        }))
        .unwrap();

        let pack = lookup_pack("C++").unwrap();
        let spec = lookup_spec("C++").unwrap();
        let schema = BoundSchema::parse(&[("values", "list<integer>")], "integer", spec).unwrap();
        let templates = TemplateSet::for_language("C++").unwrap();

        let info =
            generate_prompt_info(&question, pack, &schema, &templates, false).unwrap();
        assert_eq!(info.entry_fn_name, "sumList");
        assert!(info.signature.contains("int sumList(vector<int> values)"));
        let text = info.text.unwrap();
        assert!(text.contains("vector of numbers"), "{text}");
        assert!(info.signature_with_docstring.unwrap().contains("/**"));
    }
}
