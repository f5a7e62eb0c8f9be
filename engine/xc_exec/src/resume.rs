//! Resuming a batch from prior execution journals.
//!
//! The journal doubles as crash-recovery state: on startup the harness reads
//! every `*_execution_results.jsonl` in the output directory, drops lines
//! that fail to decode (a crash can leave a partial trailing line), rewrites
//! each file with only the well-formed entries, and returns the surviving
//! results keyed by language and `(qid, id)`. Running it twice over the same
//! directory yields the same contents.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::{info, warn};
use xc_data::ExecutionResult;

/// Results already present on disk: `language -> "qid/id" -> result`.
pub type PriorResults = FxHashMap<String, FxHashMap<String, ExecutionResult>>;

const JOURNAL_SUFFIX: &str = "_execution_results.jsonl";

/// Load, sanitize, and index every execution journal under `dir`.
pub fn load_prior_results(dir: &Path) -> std::io::Result<PriorResults> {
    let mut out: PriorResults = FxHashMap::default();
    if !dir.is_dir() {
        return Ok(out);
    }

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(JOURNAL_SUFFIX) {
            continue;
        }

        let file = std::fs::File::open(&path)?;
        let mut valid: Vec<(String, ExecutionResult)> = Vec::new();
        let mut dropped = 0_usize;
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<ExecutionResult>(&line) {
                Ok(result) => valid.push((line, result)),
                Err(_) => dropped += 1,
            }
        }

        if dropped > 0 {
            warn!(file = name, dropped, "dropping malformed journal lines");
            // Rewrite the journal with only the entries that survived.
            let mut writer = std::fs::File::create(&path)?;
            for (line, _) in &valid {
                writeln!(writer, "{line}")?;
            }
        }

        info!(file = name, results = valid.len(), "loaded prior results");
        for (_, result) in valid {
            out.entry(result.prediction.lang.clone())
                .or_default()
                .insert(result.prediction.key(), result);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use xc_data::{Command, Prediction};

    fn result(qid: &str, id: &str) -> ExecutionResult {
        ExecutionResult::new(
            Prediction {
                id: id.to_string(),
                qid: qid.to_string(),
                lang: "Python".to_string(),
                code: String::new(),
                file_path: PathBuf::from("x.py"),
                entry_fn_name: None,
                entry_cls_name: None,
            },
            vec![Command::new(["true"])],
            "TEST-0...PASSED\n".to_string(),
            String::new(),
            0,
            Some(5),
            0,
            vec![Some(5)],
            vec![None],
            false,
            false,
        )
    }

    #[test]
    fn loads_and_keys_by_language_and_id() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("Python_execution_results.jsonl");
        let lines = [
            serde_json::to_string(&result("q1", "0")).unwrap(),
            serde_json::to_string(&result("q1", "1")).unwrap(),
        ];
        std::fs::write(&path, lines.join("\n") + "\n").unwrap();

        let prior = load_prior_results(tmp.path()).unwrap();
        assert_eq!(prior["Python"].len(), 2);
        assert!(prior["Python"].contains_key("q1/0"));
    }

    #[test]
    fn truncated_trailing_line_is_dropped_and_rewritten() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("Python_execution_results.jsonl");
        let good = serde_json::to_string(&result("q1", "0")).unwrap();
        std::fs::write(&path, format!("{good}\n{{\"qid\": \"q1\", \"id\"")).unwrap();

        let prior = load_prior_results(tmp.path()).unwrap();
        assert_eq!(prior["Python"].len(), 1);

        // The file was rewritten with only the valid line.
        let rewritten = std::fs::read_to_string(&path).unwrap();
        assert_eq!(rewritten, format!("{good}\n"));
    }

    #[test]
    fn resume_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("Python_execution_results.jsonl");
        let good = serde_json::to_string(&result("q1", "0")).unwrap();
        std::fs::write(&path, format!("{good}\nbroken")).unwrap();

        load_prior_results(tmp.path()).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        load_prior_results(tmp.path()).unwrap();
        let second = std::fs::read_to_string(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_directory_is_empty() {
        let prior = load_prior_results(Path::new("/nonexistent-dir-xyz")).unwrap();
        assert!(prior.is_empty());
    }
}
