//! The execution harness.
//!
//! Runs each prediction's compile/run command sequence in its own working
//! directory, under a wall-clock timeout and at the lowest scheduling
//! priority, capturing stdout/stderr/exit status/runtime/peak RSS. A rayon
//! worker pool drives predictions in parallel; completed results stream over
//! a channel through the coordinator to a dedicated writer thread that owns
//! the two append-only journal files.
//!
//! Nothing here executes unless `ALLOW_EXECUTION=true` is set in the
//! environment — the harness hard-fails otherwise.

mod error;
mod gate;
mod harness;
mod limits;
mod resume;
mod runner;
mod sys;
mod writer;

pub use error::ExecError;
pub use gate::ensure_execution_allowed;
pub use harness::{execute_predictions, ExecutionConfig, ExecutionStats};
pub use resume::load_prior_results;
pub use runner::{execute_prediction, run_command, CommandOutcome};

/// File name of the per-language execution journal.
pub fn execution_results_file(language: &str) -> String {
    format!("{language}_execution_results.jsonl")
}

/// File name of the per-language runtime-tracking file.
pub fn runtime_tracking_file(language: &str) -> String {
    format!("{language}_runtime_tracking.jsonl")
}
