//! Test-driver generation.
//!
//! Takes a question's language-bound schema and test cases and produces a
//! complete driver source file for a target language. The driver carries
//! three sentinels — `PLACEHOLDER_CODE_BODY`, `PLACEHOLDER_FN_NAME`,
//! `PLACEHOLDER_CLS_NAME` — substituted when a prediction is bound to it
//! ([`setup_prediction_dirs`]).
//!
//! Each language ships three Tera templates (`HEADER`, `MAIN`,
//! `EVALUATION`), embedded from `templates/<Lang>/` at build time and
//! compiled once per language; referencing an undefined variable is a hard
//! error at render time.

mod error;
mod generator;
mod prompts;
mod templates;
mod workdir;

pub use error::GenError;
pub use generator::{generate_driver, generated_question, GeneratedQuestion, GeneratorConfig};
pub use prompts::{generate_prompt_info, PromptInfo};
pub use templates::TemplateSet;
pub use workdir::{fill_driver, setup_prediction_dirs};

/// Sentinel replaced by the candidate source text.
pub const PLACEHOLDER_CODE_BODY: &str = "PLACEHOLDER_CODE_BODY";
/// Sentinel replaced by the entry function name.
pub const PLACEHOLDER_FN_NAME: &str = "PLACEHOLDER_FN_NAME";
/// Sentinel replaced by the entry class name.
pub const PLACEHOLDER_CLS_NAME: &str = "PLACEHOLDER_CLS_NAME";
