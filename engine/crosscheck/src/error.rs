//! Batch-level (fatal) errors.

/// Errors that abort a batch. Everything else — bad questions, failing
/// predictions — is recorded to side files and the batch continues.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("unknown language {0} (see `crosscheck list-languages`)")]
    UnknownLanguage(String),

    #[error("input file not found: {0}")]
    MissingInput(std::path::PathBuf),

    #[error(transparent)]
    Exec(#[from] xc_exec::ExecError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}
