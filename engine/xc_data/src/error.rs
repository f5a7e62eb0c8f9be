//! Question-level error taxonomy.

/// Error attached to a question that could not be used.
///
/// None of these abort a batch: the failing question is recorded to a side
/// file and processing continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionError {
    /// The input row is malformed (missing keys, wrong JSON shape).
    #[error("question parsing failed: {0}")]
    Parsing(String),

    /// The question parsed but its contents are inconsistent.
    #[error("question validation failed: {0}")]
    Validation(String),

    /// A test case is structurally inconsistent with the schema.
    #[error("test case error: {0}")]
    IoPair(String),
}
