//! Classifying one execution into an outcome.

use serde::{Deserialize, Serialize};
use serde_json::Map;
use serde_json::Value;
use xc_data::{ExecutionResult, PredictionOutcome};

use crate::markers::parse_test_markers;
use crate::{FAILED_TOKEN, MISSING_TOKEN, PASSED_TOKEN};

/// The parsed, classified result of one prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub qid: String,
    pub id: String,
    pub language: String,
    pub code: String,
    pub outcome: PredictionOutcome,
    /// `test_case_id -> PASSED | FAILED | MISSING | <runtime-error token>`.
    pub test_case_results: Map<String, Value>,
    pub num_tc_passed: usize,
    pub num_tc: usize,
    pub all_commands_ran: bool,
    pub final_command_runtime_ms: Option<u64>,
    pub final_command_memory_bytes: Option<u64>,
    pub net_runtime_ms: Option<u64>,
    pub command_runtimes_ms: Vec<Option<u64>>,
    pub command_memory_bytes: Vec<Option<u64>>,
    pub stderr: String,
}

impl PredictionResult {
    /// Classify an execution against the question's declared test-case ids.
    ///
    /// Priority: non-zero exit / `had_error` → `HadError`; timeout →
    /// `TimedOut`; empty stdout or a missing declared test → `HadError`; a
    /// token that is neither `PASSED` nor `FAILED` → `HadRuntimeError`; any
    /// `FAILED` → `FailedTest`; otherwise `Passed`.
    pub fn from_execution(execution: &ExecutionResult, test_case_ids: &[String]) -> Self {
        let mut results: Map<String, Value> = Map::new();
        for (id, token) in parse_test_markers(&execution.stdout) {
            if test_case_ids.contains(&id) {
                results.insert(id, Value::String(token));
            }
        }

        let mut missing = false;
        let mut failed = false;
        let mut runtime_error = false;
        let mut num_passed = 0_usize;
        for id in test_case_ids {
            match results.get(id).and_then(Value::as_str) {
                None => {
                    results.insert(id.clone(), Value::String(MISSING_TOKEN.to_string()));
                    missing = true;
                }
                Some(FAILED_TOKEN) => failed = true,
                Some(PASSED_TOKEN) => num_passed += 1,
                Some(_) => runtime_error = true,
            }
        }

        let outcome = if execution.return_code != 0 || execution.had_error {
            PredictionOutcome::HadError
        } else if execution.timed_out {
            PredictionOutcome::TimedOut
        } else if execution.stdout.is_empty() || missing {
            PredictionOutcome::HadError
        } else if runtime_error {
            PredictionOutcome::HadRuntimeError
        } else if failed {
            PredictionOutcome::FailedTest
        } else {
            PredictionOutcome::Passed
        };

        PredictionResult {
            qid: execution.prediction.qid.clone(),
            id: execution.prediction.id.clone(),
            language: execution.prediction.lang.clone(),
            code: execution.prediction.code.clone(),
            outcome,
            num_tc: results.len(),
            num_tc_passed: num_passed,
            test_case_results: results,
            all_commands_ran: execution.all_commands_ran,
            final_command_runtime_ms: execution.final_command_runtime_ms(),
            final_command_memory_bytes: execution.final_command_memory_bytes(),
            net_runtime_ms: execution.net_runtime_ms,
            command_runtimes_ms: execution.command_runtimes_ms.clone(),
            command_memory_bytes: execution.command_memory_bytes.clone(),
            stderr: execution.stderr.clone(),
        }
    }

    pub fn passed(&self) -> bool {
        self.outcome == PredictionOutcome::Passed
    }
}
