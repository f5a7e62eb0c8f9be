//! Driver generation for one question in one target language.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;
use xc_data::Question;
use xc_langs::{
    test_case_literals, translate_entry_function_name, translate_type_signature, value_literal,
    LanguagePack, TestCaseLiterals,
};
use xc_schema::{BoundSchema, Primitive, TypeExpr, TypeKind};

use crate::error::GenError;
use crate::templates::{MainContext, TemplateSet};

/// Tunables of driver generation.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    /// Comparison tolerance when the return type is `float`.
    pub float_precision: f64,
    /// Comparison tolerance when the return type is `double`.
    pub double_precision: f64,
    /// Emit extra diagnostics from the generated drivers.
    pub debug: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            float_precision: 1e-6,
            double_precision: 1e-9,
            debug: false,
        }
    }
}

/// The generated test code for one question, as written to
/// `testing_code.jsonl` and consumed by prediction binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub language: String,
    pub qid: String,
    pub title: String,
    pub test_code: String,
    pub entry_fn_name: String,
    pub entry_cls_name: String,
    pub test_case_ids: Vec<String>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// Generate the complete driver source for `question`, sentinels included.
pub fn generate_driver(
    question: &Question,
    pack: &LanguagePack,
    schema: &BoundSchema,
    templates: &TemplateSet,
    config: &GeneratorConfig,
) -> Result<String, GenError> {
    let (method, precision) = equality_mode(&schema.return_type, pack, config);
    debug!(qid = %question.qid, lang = pack.name, method, "generating driver");

    let mut cases: Vec<TestCaseLiterals> = Vec::with_capacity(question.test_list.len());
    for tc in &question.test_list {
        cases.push(test_case_literals(pack, tc, schema)?);
    }

    let (signature, params, _) = translate_type_signature(pack, schema, false);
    let evaluation = templates.render_evaluation(method, &precision)?;
    let header = templates.render_header()?;

    templates.render_main(&MainContext {
        params: &params,
        signature: &signature,
        test_cases: &cases,
        return_type: schema.return_type.lang_type(),
        debug: config.debug,
        text: question.text.as_deref(),
        evaluation_function: &evaluation,
        header: &header,
    })
}

/// Pick the equality mode and render its precision literal.
///
/// Only a scalar `float`/`double` return selects tolerance comparison;
/// floats nested inside containers compare exactly.
fn equality_mode(
    return_type: &TypeExpr,
    pack: &LanguagePack,
    config: &GeneratorConfig,
) -> (&'static str, String) {
    let (method, primitive, precision) = match return_type.kind {
        TypeKind::Primitive(Primitive::Float) => {
            ("float", Primitive::Float, config.float_precision)
        }
        TypeKind::Primitive(Primitive::Double) => {
            ("float", Primitive::Double, config.double_precision)
        }
        _ => ("default", Primitive::Float, config.float_precision),
    };
    let literal = value_literal(pack, &TypeExpr::primitive(primitive), &json!(precision))
        .unwrap_or_else(|_| precision.to_string());
    (method, literal)
}

/// Build the full `GeneratedQuestion` record for one question.
pub fn generated_question(
    question: &Question,
    pack: &LanguagePack,
    schema: &BoundSchema,
    templates: &TemplateSet,
    config: &GeneratorConfig,
) -> Result<GeneratedQuestion, GenError> {
    let test_code = generate_driver(question, pack, schema, templates, config)?;
    Ok(GeneratedQuestion {
        language: pack.name.to_string(),
        qid: question.qid.clone(),
        title: question.title.clone(),
        test_code,
        entry_fn_name: translate_entry_function_name(pack, &question.entry_fn_name),
        entry_cls_name: question.entry_cls_name.clone(),
        test_case_ids: question.test_case_ids(),
        metadata: question.metadata.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use xc_langs::lookup_pack;
    use xc_schema::lookup_spec;

    fn question(return_type: &str, outputs: Value) -> Question {
        Question::from_value(&json!({
            "qid": "1",
            "title": "identity",
            "schema": {
                "params": [{"name": "n", "type": "integer"}],
                "return": {"type": return_type}
            },
            "test_list": [
                {"idx": 0, "inputs": {"n": 5}, "outputs": outputs}
            ],
            "entry_fn_name": "identity"
        }))
        .unwrap()
    }

    fn driver_for(lang: &str, return_type: &str, outputs: Value) -> String {
        let q = question(return_type, outputs);
        let pack = lookup_pack(lang).unwrap();
        let spec = lookup_spec(lang).unwrap();
        let schema = BoundSchema::parse(&[("n", "integer")], return_type, spec).unwrap();
        let templates = TemplateSet::for_language(lang).unwrap();
        generate_driver(&q, pack, &schema, &templates, &GeneratorConfig::default()).unwrap()
    }

    #[test]
    fn driver_contains_sentinels_and_markers() {
        let code = driver_for("Python", "integer", json!(5));
        assert!(code.contains("PLACEHOLDER_CODE_BODY"));
        assert!(code.contains("PLACEHOLDER_FN_NAME"));
        assert!(code.contains("TEST-0..."));
    }

    #[test]
    fn every_language_generates_for_a_simple_question() {
        for lang in xc_langs::list_languages() {
            let code = driver_for(lang, "integer", json!(5));
            assert!(
                code.contains("TEST-0"),
                "{lang} driver is missing the test marker:\n{code}"
            );
            assert!(code.contains("PLACEHOLDER_CODE_BODY"), "{lang}");
        }
    }

    #[test]
    fn float_return_selects_tolerance_mode() {
        let code = driver_for("Python", "float", json!(0.5));
        assert!(code.contains("1e-06") || code.contains("0.000001"), "{code}");
    }

    #[test]
    fn double_return_uses_double_precision() {
        let code = driver_for("Python", "double", json!(0.5));
        assert!(code.contains("1e-09") || code.contains("0.000000001"), "{code}");
    }

    #[test]
    fn generated_question_translates_entry_name() {
        let q = question("integer", json!(5));
        let pack = lookup_pack("C++").unwrap();
        let spec = lookup_spec("C++").unwrap();
        let schema = BoundSchema::parse(&[("n", "integer")], "integer", spec).unwrap();
        let templates = TemplateSet::for_language("C++").unwrap();
        let generated =
            generated_question(&q, pack, &schema, &templates, &GeneratorConfig::default())
                .unwrap();
        assert_eq!(generated.entry_fn_name, "identity");
        assert_eq!(generated.test_case_ids, vec!["0"]);
        assert_eq!(generated.language, "C++");
    }
}
