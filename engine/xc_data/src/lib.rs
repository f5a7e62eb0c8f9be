//! Core data types for Crosscheck.
//!
//! The nouns of the pipeline: a [`Question`] (typed signature + test cases,
//! read from a JSON Lines corpus), a [`Prediction`] (a candidate program
//! bound to its generated driver file), the [`Command`]s used to compile and
//! run it, and the [`ExecutionResult`] journalled per attempt.
//!
//! Questions are consumed read-only; renaming variables produces a new
//! question. An `ExecutionResult` is persisted before any aggregation so a
//! crash loses at most one record.

mod command;
mod error;
mod outcome;
mod prediction;
mod question;
mod result;

pub use command::Command;
pub use error::QuestionError;
pub use outcome::PredictionOutcome;
pub use prediction::{Prediction, PredictionRecord};
pub use question::{read_questions, Param, Question, QuestionSchema, TestCase};
pub use result::ExecutionResult;
