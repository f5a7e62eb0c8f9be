//! Subprocess command description.

use serde::{Deserialize, Serialize};

/// Default per-command timeout. Compile steps typically override this
/// upwards; run steps keep it.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// One command of a prediction's compile/run sequence, as an argv vector
/// plus the wall-clock timeout that applies to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub args: Vec<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Command {
    /// A command with the default timeout.
    pub fn new<I, S>(args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Command {
            args: args.into_iter().map(Into::into).collect(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// A command with an explicit timeout in seconds.
    pub fn with_timeout<I, S>(args: I, timeout_secs: u64) -> Command
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Command {
            args: args.into_iter().map(Into::into).collect(),
            timeout_secs,
        }
    }
}
