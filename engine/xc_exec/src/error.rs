//! Harness errors.
//!
//! Everything here is a batch-level misconfiguration. Per-prediction
//! failures (non-zero exits, timeouts) are ordinary data and travel inside
//! `ExecutionResult`, never as errors.

#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// `ALLOW_EXECUTION=true` is not set.
    #[error(
        "execution is not allowed in this environment \
         (set ALLOW_EXECUTION=true to enable running untrusted code)"
    )]
    SafetyGate,

    /// The requested language has no registered pack.
    #[error("unknown language {0}")]
    UnknownLanguage(String),

    /// The worker pool could not be built.
    #[error("failed to build worker pool: {0}")]
    Pool(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}
