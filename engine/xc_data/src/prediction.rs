//! Candidate programs bound to their generated driver files.

use std::path::PathBuf;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One row of the predictions corpus, before it is bound to a driver file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRecord {
    #[serde(deserialize_with = "string_or_int")]
    pub qid: String,
    #[serde(deserialize_with = "string_or_int")]
    pub id: String,
    #[serde(default)]
    pub language: Option<String>,
    pub code: String,
    #[serde(default)]
    pub entry_fn_name: Option<String>,
    #[serde(default)]
    pub entry_cls_name: Option<String>,
}

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

/// A candidate program for a question, bound to the on-disk test driver that
/// embeds it. Immutable once created; the driver file must exist until
/// execution completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub qid: String,
    pub lang: String,
    pub code: String,
    pub file_path: PathBuf,
    #[serde(default)]
    pub entry_fn_name: Option<String>,
    #[serde(default)]
    pub entry_cls_name: Option<String>,
}

impl Prediction {
    /// Bind a corpus record to its driver file.
    pub fn from_record(
        record: PredictionRecord,
        file_path: PathBuf,
        default_language: &str,
    ) -> Prediction {
        Prediction {
            id: record.id,
            qid: record.qid,
            lang: record
                .language
                .unwrap_or_else(|| default_language.to_string()),
            code: record.code,
            file_path,
            entry_fn_name: record.entry_fn_name,
            entry_cls_name: record.entry_cls_name,
        }
    }

    /// The replay key used for journalling and resume.
    pub fn key(&self) -> String {
        format!("{}/{}", self.qid, self.id)
    }
}
