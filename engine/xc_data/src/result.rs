//! The journalled record of one prediction's execution.

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::prediction::Prediction;

/// Everything captured while running one prediction's command sequence.
///
/// Serialized to the per-language `*_execution_results.jsonl` journal
/// immediately on completion; the serialized form is sufficient to replay
/// (resume) a batch without re-executing.
///
/// Per-command arrays are positional: index = command index, `None` for
/// commands that never ran. Only the stdout/stderr of the last command that
/// ran are kept — earlier commands (compiles) report failure through their
/// exit status alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    #[serde(flatten)]
    pub prediction: Prediction,
    pub commands: Vec<Command>,
    pub stdout: String,
    pub stderr: String,
    pub return_code: i32,
    pub net_runtime_ms: Option<u64>,
    /// Index of the last command that was started, `-1` when none ran.
    pub last_ran_command_idx: i64,
    pub command_runtimes_ms: Vec<Option<u64>>,
    pub command_memory_bytes: Vec<Option<u64>>,
    pub had_error: bool,
    pub timed_out: bool,
    /// Derived: `last_ran_command_idx + 1 == commands.len()`.
    pub all_commands_ran: bool,
}

impl ExecutionResult {
    /// Build a result, deriving `all_commands_ran`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        prediction: Prediction,
        commands: Vec<Command>,
        stdout: String,
        stderr: String,
        return_code: i32,
        net_runtime_ms: Option<u64>,
        last_ran_command_idx: i64,
        command_runtimes_ms: Vec<Option<u64>>,
        command_memory_bytes: Vec<Option<u64>>,
        had_error: bool,
        timed_out: bool,
    ) -> ExecutionResult {
        debug_assert_eq!(command_runtimes_ms.len(), commands.len());
        debug_assert_eq!(command_memory_bytes.len(), commands.len());
        let all_commands_ran = last_ran_command_idx + 1 == commands.len() as i64;
        ExecutionResult {
            prediction,
            commands,
            stdout,
            stderr,
            return_code,
            net_runtime_ms,
            last_ran_command_idx,
            command_runtimes_ms,
            command_memory_bytes,
            had_error,
            timed_out,
            all_commands_ran,
        }
    }

    /// Runtime of the last command that ran, if any.
    pub fn final_command_runtime_ms(&self) -> Option<u64> {
        let idx = usize::try_from(self.last_ran_command_idx).ok()?;
        self.command_runtimes_ms.get(idx).copied().flatten()
    }

    /// Peak memory of the last command that ran, if any.
    pub fn final_command_memory_bytes(&self) -> Option<u64> {
        let idx = usize::try_from(self.last_ran_command_idx).ok()?;
        self.command_memory_bytes.get(idx).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn prediction() -> Prediction {
        Prediction {
            id: "0".to_string(),
            qid: "q1".to_string(),
            lang: "Python".to_string(),
            code: "pass".to_string(),
            file_path: PathBuf::from("q1_0/q1_0.py"),
            entry_fn_name: None,
            entry_cls_name: None,
        }
    }

    fn result(last_idx: i64, n_commands: usize) -> ExecutionResult {
        let commands: Vec<Command> = (0..n_commands)
            .map(|_| Command::new(["true"]))
            .collect();
        ExecutionResult::new(
            prediction(),
            commands,
            String::new(),
            String::new(),
            0,
            Some(12),
            last_idx,
            vec![Some(12); n_commands],
            vec![None; n_commands],
            false,
            false,
        )
    }

    #[test]
    fn all_commands_ran_is_derived() {
        assert!(result(1, 2).all_commands_ran);
        assert!(!result(0, 2).all_commands_ran);
        assert!(!result(-1, 2).all_commands_ran);
    }

    #[test]
    fn journal_round_trip() {
        let r = result(1, 2);
        let line = serde_json::to_string(&r).unwrap();
        let back: ExecutionResult = serde_json::from_str(&line).unwrap();
        assert_eq!(back, r);
        assert_eq!(back.prediction.key(), "q1/0");
    }

    #[test]
    fn final_command_accessors() {
        let r = result(1, 2);
        assert_eq!(r.final_command_runtime_ms(), Some(12));
        assert_eq!(r.final_command_memory_bytes(), None);
        assert_eq!(result(-1, 2).final_command_runtime_ms(), None);
    }
}
