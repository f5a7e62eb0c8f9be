//! The question corpus: parsing, validation, and the rename operation.

use std::fmt;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::QuestionError;

/// Keys a question row must carry.
const REQUIRED_KEYS: [&str; 5] = ["qid", "title", "schema", "test_list", "entry_fn_name"];

/// One declared parameter of the entry function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub type_str: String,
}

/// The raw (generic-string) schema of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSchema {
    pub params: Vec<Param>,
    #[serde(rename = "return")]
    pub return_type: ReturnType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnType {
    #[serde(rename = "type")]
    pub type_str: String,
}

/// One input/output pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(deserialize_with = "string_or_int")]
    pub idx: String,
    pub inputs: Map<String, Value>,
    pub outputs: Value,
}

/// A programming question: typed signature plus ordered test cases.
///
/// Questions are immutable once read; [`Question::change_var_names`] returns
/// a new question rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(deserialize_with = "string_or_int")]
    pub qid: String,
    pub title: String,
    pub schema: QuestionSchema,
    pub test_list: Vec<TestCase>,
    pub entry_fn_name: String,
    #[serde(default = "default_cls_name")]
    pub entry_cls_name: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub allow_arbitrary_order: bool,
    #[serde(default)]
    pub use_type_annotation: bool,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(default)]
    pub challenge_test_list: Vec<TestCase>,
    #[serde(default)]
    pub solutions: FxHashMap<String, String>,
}

fn default_cls_name() -> String {
    "Solution".to_string()
}

/// Accept both `"qid": "3"` and `"qid": 3`.
fn string_or_int<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

impl Question {
    /// Parse a question from one decoded JSON Lines row.
    pub fn from_value(value: &Value) -> Result<Question, QuestionError> {
        let Some(obj) = value.as_object() else {
            return Err(QuestionError::Parsing(
                "question row is not a JSON object".to_string(),
            ));
        };
        let missing: Vec<&str> = REQUIRED_KEYS
            .iter()
            .filter(|k| !obj.contains_key(**k))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(QuestionError::Parsing(format!(
                "missing required keys: {missing:?}"
            )));
        }

        let question: Question = serde_json::from_value(value.clone())
            .map_err(|e| QuestionError::Parsing(e.to_string()))?;
        question.check_test_cases()?;
        Ok(question)
    }

    /// Every test case's input keys must be exactly the declared parameter
    /// set.
    fn check_test_cases(&self) -> Result<(), QuestionError> {
        let params: FxHashSet<&str> =
            self.schema.params.iter().map(|p| p.name.as_str()).collect();
        for tc in self.test_list.iter().chain(&self.challenge_test_list) {
            let inputs: FxHashSet<&str> = tc.inputs.keys().map(String::as_str).collect();
            if inputs != params {
                return Err(QuestionError::IoPair(format!(
                    "test case {} inputs {:?} do not match parameters {:?}",
                    tc.idx,
                    sorted(&inputs),
                    sorted(&params),
                )));
            }
        }
        Ok(())
    }

    /// The declared test-case ids, in order.
    pub fn test_case_ids(&self) -> Vec<String> {
        self.test_list.iter().map(|tc| tc.idx.clone()).collect()
    }

    /// Produce a new question with parameters renamed per `name_map`,
    /// updating the schema and every test case consistently.
    pub fn change_var_names(
        &self,
        name_map: &FxHashMap<String, String>,
    ) -> Result<Question, QuestionError> {
        let mut out = self.clone();
        let mut found: FxHashSet<&str> = FxHashSet::default();
        for param in &mut out.schema.params {
            if let Some((key, new_name)) = name_map.get_key_value(&param.name) {
                found.insert(key.as_str());
                param.name.clone_from(new_name);
            }
        }
        if found.len() != name_map.len() {
            let missing: Vec<&String> = name_map
                .keys()
                .filter(|k| !found.contains(k.as_str()))
                .collect();
            return Err(QuestionError::Validation(format!(
                "cannot rename: {missing:?} are not parameters of {}",
                self.qid
            )));
        }

        let rename_tc = |tc: &mut TestCase| -> Result<(), QuestionError> {
            for (old, new) in name_map {
                let Some(value) = tc.inputs.remove(old) else {
                    return Err(QuestionError::Validation(format!(
                        "test case {} of {} has no input {old}",
                        tc.idx, self.qid
                    )));
                };
                tc.inputs.insert(new.clone(), value);
            }
            Ok(())
        };
        for tc in &mut out.test_list {
            rename_tc(tc)?;
        }
        for tc in &mut out.challenge_test_list {
            rename_tc(tc)?;
        }
        debug!(qid = %self.qid, ?name_map, "renamed question variables");
        Ok(out)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.qid, self.title)
    }
}

fn sorted<'a>(set: &FxHashSet<&'a str>) -> Vec<&'a str> {
    let mut v: Vec<&str> = set.iter().copied().collect();
    v.sort_unstable();
    v
}

/// Read a JSON Lines question corpus.
///
/// Rows that fail to decode or parse are returned alongside their error so
/// the caller can record them; the batch is never aborted by a bad row.
pub fn read_questions(
    path: &Path,
) -> std::io::Result<(Vec<Question>, Vec<(Value, QuestionError)>)> {
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);

    let mut questions = Vec::new();
    let mut failures = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                warn!(line_number, error = %e, "question row is not valid JSON");
                failures.push((
                    Value::String(line),
                    QuestionError::Parsing(format!("invalid JSON: {e}")),
                ));
                continue;
            }
        };
        match Question::from_value(&value) {
            Ok(q) => questions.push(q),
            Err(e) => {
                warn!(line_number, error = %e, "question row failed to parse");
                failures.push((value, e));
            }
        }
    }
    Ok((questions, failures))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn question_value() -> Value {
        json!({
            "qid": 7,
            "title": "Add numbers",
            "schema": {
                "params": [
                    {"name": "left", "type": "integer"},
                    {"name": "right", "type": "integer"}
                ],
                "return": {"type": "integer"}
            },
            "test_list": [
                {"idx": 0, "inputs": {"left": 1, "right": 2}, "outputs": 3}
            ],
            "entry_fn_name": "add"
        })
    }

    #[test]
    fn parses_and_coerces_ids() {
        let q = Question::from_value(&question_value()).unwrap();
        assert_eq!(q.qid, "7");
        assert_eq!(q.entry_cls_name, "Solution");
        assert_eq!(q.test_list[0].idx, "0");
        assert_eq!(q.test_case_ids(), vec!["0"]);
    }

    #[test]
    fn missing_keys_are_reported() {
        let mut v = question_value();
        v.as_object_mut().unwrap().remove("entry_fn_name");
        let err = Question::from_value(&v).unwrap_err();
        assert!(err.to_string().contains("entry_fn_name"), "{err}");
    }

    #[test]
    fn mismatched_test_inputs_are_rejected() {
        let mut v = question_value();
        v["test_list"][0]["inputs"] = json!({"left": 1});
        assert!(matches!(
            Question::from_value(&v),
            Err(QuestionError::IoPair(_))
        ));
    }

    #[test]
    fn extra_test_inputs_are_rejected() {
        let mut v = question_value();
        v["test_list"][0]["inputs"]["bogus"] = json!(1);
        assert!(Question::from_value(&v).is_err());
    }

    #[test]
    fn rename_updates_schema_and_tests() {
        let q = Question::from_value(&question_value()).unwrap();
        let mut map = FxHashMap::default();
        map.insert("left".to_string(), "left_arg0".to_string());
        let renamed = q.change_var_names(&map).unwrap();
        assert_eq!(renamed.schema.params[0].name, "left_arg0");
        assert!(renamed.test_list[0].inputs.contains_key("left_arg0"));
        assert!(!renamed.test_list[0].inputs.contains_key("left"));
        // Original untouched.
        assert_eq!(q.schema.params[0].name, "left");
    }

    #[test]
    fn rename_of_unknown_variable_fails() {
        let q = Question::from_value(&question_value()).unwrap();
        let mut map = FxHashMap::default();
        map.insert("nope".to_string(), "nope2".to_string());
        assert!(q.change_var_names(&map).is_err());
    }

    #[test]
    fn read_questions_collects_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.jsonl");
        let good = serde_json::to_string(&question_value()).unwrap();
        std::fs::write(&path, format!("{good}\nnot json\n{{\"qid\": 1}}\n")).unwrap();

        let (questions, failures) = read_questions(&path).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(failures.len(), 2);
    }
}
