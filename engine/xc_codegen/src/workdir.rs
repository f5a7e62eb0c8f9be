//! Prediction work-directory setup: sentinel substitution and file layout.

use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::warn;
use xc_data::{Prediction, PredictionRecord};
use xc_langs::LanguagePack;

use crate::error::GenError;
use crate::generator::GeneratedQuestion;
use crate::{PLACEHOLDER_CLS_NAME, PLACEHOLDER_CODE_BODY, PLACEHOLDER_FN_NAME};

/// Substitute the three sentinels to produce the final driver source.
pub fn fill_driver(
    test_code: &str,
    candidate_code: &str,
    entry_fn_name: &str,
    entry_cls_name: &str,
) -> String {
    test_code
        .replace(PLACEHOLDER_CODE_BODY, candidate_code)
        .replace(PLACEHOLDER_FN_NAME, entry_fn_name)
        .replace(PLACEHOLDER_CLS_NAME, entry_cls_name)
}

/// Create one working directory per prediction, each containing the driver
/// file with the candidate substituted in.
///
/// Directory and file are both named `<qid>_<id>` (with the language's
/// extension on the file) so a failing run can be reproduced by hand.
/// Predictions for unknown questions are skipped with a warning; duplicate
/// `(qid, id)` keys are an error.
pub fn setup_prediction_dirs(
    out_dir: &Path,
    pack: &LanguagePack,
    records: Vec<PredictionRecord>,
    questions: &FxHashMap<String, GeneratedQuestion>,
    force_question_entry: bool,
) -> Result<FxHashMap<String, Prediction>, GenError> {
    let mut out: FxHashMap<String, Prediction> = FxHashMap::default();
    for mut record in records {
        let Some(question) = questions.get(&record.qid) else {
            warn!(qid = %record.qid, "no generated test code for prediction, skipping");
            continue;
        };

        if force_question_entry {
            record.entry_fn_name = Some(question.entry_fn_name.clone());
            if record.entry_cls_name.is_some() {
                record.entry_cls_name = Some(question.entry_cls_name.clone());
            }
        }

        let file_name = format!("{}_{}", record.qid, record.id);
        let dir = out_dir.join(&file_name);
        std::fs::create_dir_all(&dir)?;
        let code_path = dir.join(format!("{file_name}.{}", pack.file_ext));

        let prediction = Prediction::from_record(record, code_path.clone(), pack.name);
        let entry_fn = prediction
            .entry_fn_name
            .as_deref()
            .unwrap_or(&question.entry_fn_name);
        let entry_cls = prediction
            .entry_cls_name
            .as_deref()
            .unwrap_or(&question.entry_cls_name);
        let code = fill_driver(&question.test_code, &prediction.code, entry_fn, entry_cls);
        std::fs::write(&code_path, code)?;

        let key = prediction.key();
        if out.insert(key.clone(), prediction).is_some() {
            return Err(GenError::Question(xc_data::QuestionError::Validation(
                format!("duplicate prediction {key}"),
            )));
        }
    }
    Ok(out)
}
