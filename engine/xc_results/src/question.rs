//! Per-question aggregation.

use rustc_hash::FxHashMap;
use serde::Serialize;
use serde_json::Value;
use xc_data::PredictionOutcome;

use crate::prediction::PredictionResult;
use crate::MISSING_TOKEN;

/// Aggregate results for a single question in a single language.
///
/// One boolean per prediction per outcome, plus per-test-case token
/// counters. The vectors are padded with `false` up to the configured
/// predictions-per-question before the external metrics module consumes
/// them, so short questions do not skew `pass@k`.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResult {
    pub qid: String,
    pub language: String,
    pub num_test_cases: usize,
    pub num_predictions: usize,
    /// Outcome name -> one flag per prediction, in update order.
    pub outcomes: FxHashMap<&'static str, Vec<bool>>,
    pub num_tc_passed: Vec<usize>,
    /// Test case id -> token -> count.
    pub test_case_tokens: FxHashMap<String, FxHashMap<String, usize>>,
}

impl QuestionResult {
    pub fn new(qid: &str, language: &str, num_test_cases: usize) -> QuestionResult {
        let outcomes = PredictionOutcome::ALL
            .iter()
            .map(|o| (o.as_str(), Vec::new()))
            .collect();
        QuestionResult {
            qid: qid.to_string(),
            language: language.to_string(),
            num_test_cases,
            num_predictions: 0,
            outcomes,
            num_tc_passed: Vec::new(),
            test_case_tokens: FxHashMap::default(),
        }
    }

    /// Fold one prediction result into the aggregate.
    pub fn update(&mut self, result: &PredictionResult) {
        self.num_predictions += 1;
        for outcome in PredictionOutcome::ALL {
            self.outcomes
                .entry(outcome.as_str())
                .or_default()
                .push(result.outcome == outcome);
        }
        self.num_tc_passed.push(result.num_tc_passed);

        for (tc_id, token) in &result.test_case_results {
            let token = token.as_str().unwrap_or(MISSING_TOKEN).to_string();
            *self
                .test_case_tokens
                .entry(tc_id.clone())
                .or_default()
                .entry(token)
                .or_default() += 1;
        }
    }

    /// Build the aggregate from a full list of results.
    pub fn from_results(
        qid: &str,
        language: &str,
        num_test_cases: usize,
        results: &[PredictionResult],
    ) -> QuestionResult {
        let mut out = QuestionResult::new(qid, language, num_test_cases);
        for result in results {
            out.update(result);
        }
        out
    }

    /// How many predictions landed on `outcome`.
    pub fn count(&self, outcome: PredictionOutcome) -> usize {
        self.outcomes
            .get(outcome.as_str())
            .map_or(0, |flags| flags.iter().filter(|b| **b).count())
    }

    /// Pad every outcome vector (and `num_tc_passed`) with falsy entries up
    /// to `len` predictions, so questions with fewer predictions than the
    /// configured samples-per-question do not skew downstream metrics.
    pub fn pad_to(&mut self, len: usize) {
        for flags in self.outcomes.values_mut() {
            while flags.len() < len {
                flags.push(false);
            }
        }
        while self.num_tc_passed.len() < len {
            self.num_tc_passed.push(0);
        }
    }

    /// The outcome vector padded with `false` to `len` entries.
    pub fn padded(&self, outcome: PredictionOutcome, len: usize) -> Vec<bool> {
        let mut flags = self
            .outcomes
            .get(outcome.as_str())
            .cloned()
            .unwrap_or_default();
        while flags.len() < len {
            flags.push(false);
        }
        flags
    }

    /// Serialized row for `question_results.jsonl`, with metadata merged in.
    pub fn to_record(&self, title: &str, metadata: &serde_json::Map<String, Value>) -> Value {
        let mut record = serde_json::to_value(self).unwrap_or(Value::Null);
        if let Value::Object(obj) = &mut record {
            obj.insert("title".to_string(), Value::String(title.to_string()));
            for (key, value) in metadata {
                // Metric fields win over metadata on name collisions.
                obj.entry(key.clone()).or_insert_with(|| value.clone());
            }
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Map;

    fn pred_result(outcome: PredictionOutcome, num_passed: usize) -> PredictionResult {
        let mut test_case_results = Map::new();
        test_case_results.insert("0".to_string(), Value::String("PASSED".to_string()));
        PredictionResult {
            qid: "q1".to_string(),
            id: "0".to_string(),
            language: "Python".to_string(),
            code: String::new(),
            outcome,
            test_case_results,
            num_tc_passed: num_passed,
            num_tc: 1,
            all_commands_ran: true,
            final_command_runtime_ms: Some(1),
            final_command_memory_bytes: None,
            net_runtime_ms: Some(1),
            command_runtimes_ms: vec![Some(1)],
            command_memory_bytes: vec![None],
            stderr: String::new(),
        }
    }

    #[test]
    fn counts_outcomes() {
        let results = vec![
            pred_result(PredictionOutcome::Passed, 1),
            pred_result(PredictionOutcome::FailedTest, 0),
            pred_result(PredictionOutcome::Passed, 1),
        ];
        let agg = QuestionResult::from_results("q1", "Python", 1, &results);
        assert_eq!(agg.num_predictions, 3);
        assert_eq!(agg.count(PredictionOutcome::Passed), 2);
        assert_eq!(agg.count(PredictionOutcome::FailedTest), 1);
        assert_eq!(agg.num_tc_passed, vec![1, 0, 1]);
    }

    #[test]
    fn pad_to_extends_every_vector() {
        let mut agg = QuestionResult::from_results(
            "q1",
            "Python",
            1,
            &[pred_result(PredictionOutcome::Passed, 1)],
        );
        agg.pad_to(3);
        assert_eq!(agg.outcomes["Passed"], vec![true, false, false]);
        assert_eq!(agg.outcomes["Timed Out"], vec![false, false, false]);
        assert_eq!(agg.num_tc_passed, vec![1, 0, 0]);
        // The prediction count reflects real predictions only.
        assert_eq!(agg.num_predictions, 1);
    }

    #[test]
    fn pads_with_false() {
        let agg = QuestionResult::from_results(
            "q1",
            "Python",
            1,
            &[pred_result(PredictionOutcome::Passed, 1)],
        );
        assert_eq!(
            agg.padded(PredictionOutcome::Passed, 4),
            vec![true, false, false, false]
        );
    }

    #[test]
    fn tracks_per_test_case_tokens() {
        let results = vec![
            pred_result(PredictionOutcome::Passed, 1),
            pred_result(PredictionOutcome::Passed, 1),
        ];
        let agg = QuestionResult::from_results("q1", "Python", 1, &results);
        assert_eq!(agg.test_case_tokens["0"]["PASSED"], 2);
    }

    #[test]
    fn record_merges_metadata_without_clobbering() {
        let agg = QuestionResult::from_results("q1", "Python", 1, &[]);
        let mut meta = Map::new();
        meta.insert("difficulty".to_string(), Value::String("easy".to_string()));
        meta.insert("qid".to_string(), Value::String("OVERRIDE".to_string()));
        let record = agg.to_record("Title", &meta);
        assert_eq!(record["title"], "Title");
        assert_eq!(record["difficulty"], "easy");
        assert_eq!(record["qid"], "q1");
    }
}
