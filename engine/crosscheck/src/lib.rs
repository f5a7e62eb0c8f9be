//! Crosscheck: evaluate machine-generated code against reference tests
//! across many target languages.
//!
//! The pipeline, end to end:
//!
//! ```text
//! questions.jsonl
//!     │  generate-tests
//!     ▼
//! testing_code.jsonl + prompt_info.jsonl      (one driver per question/language)
//!     │  evaluate-predictions
//!     ▼
//! <Lang>_execution_results.jsonl              (journal; doubles as resume state)
//!     │
//!     ▼
//! <Lang>_results.jsonl + <Lang>_question_results.jsonl
//! ```
//!
//! This crate is the thin shell: CLI parsing, logging setup, and the two
//! batch drivers. The engine lives in the `xc_*` crates.

pub mod drivers;
pub mod keywords;
pub mod tracing_setup;

mod error;

pub use drivers::{evaluate_predictions, generate_tests, EvaluateOptions, GenerateOptions};
pub use error::CliError;
