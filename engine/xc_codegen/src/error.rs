//! Code-generation errors.

use xc_data::QuestionError;
use xc_schema::SchemaError;

/// Error raised while generating a driver for one question.
///
/// Like schema errors these are per-question: the caller records the
/// failure and moves on to the next question.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Question(#[from] QuestionError),

    #[error("template set for {0} is missing template {1}")]
    MissingTemplate(String, &'static str),

    #[error("template rendering failed: {0}")]
    Template(#[from] tera::Error),

    #[error("no language pack registered for {0}")]
    UnknownLanguage(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
