//! The five-way outcome of evaluating one prediction.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Final classification of a prediction's execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredictionOutcome {
    #[serde(rename = "Passed")]
    Passed,
    #[serde(rename = "Failed Tests")]
    FailedTest,
    #[serde(rename = "Had Error")]
    HadError,
    #[serde(rename = "Had Runtime Error")]
    HadRuntimeError,
    #[serde(rename = "Timed Out")]
    TimedOut,
}

impl PredictionOutcome {
    pub const ALL: [PredictionOutcome; 5] = [
        PredictionOutcome::Passed,
        PredictionOutcome::FailedTest,
        PredictionOutcome::HadError,
        PredictionOutcome::HadRuntimeError,
        PredictionOutcome::TimedOut,
    ];

    /// The spelling used in result files.
    pub fn as_str(self) -> &'static str {
        match self {
            PredictionOutcome::Passed => "Passed",
            PredictionOutcome::FailedTest => "Failed Tests",
            PredictionOutcome::HadError => "Had Error",
            PredictionOutcome::HadRuntimeError => "Had Runtime Error",
            PredictionOutcome::TimedOut => "Timed Out",
        }
    }
}

impl fmt::Display for PredictionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
