//! Error taxonomy for code execution runs
//!
//! Every failure a run can hit maps onto one variant here, and the `Display`
//! output of each variant is exactly the text shown to the user. Callers that
//! only render text never need to match on the variant; callers that care
//! about the outcome class (exit codes, metrics) can.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunnerError {
    #[error("This language ({0}) is not supported for execution.")]
    UnsupportedLanguage(String),
    #[error("Submission failed: {0}")]
    SubmissionFailed(String),
    #[error("The execution service did not return a submission token.")]
    MissingToken,
    #[error("Failed to fetch result: {0}")]
    FetchFailed(String),
    #[error("Execution timed out while waiting for the response.")]
    TimedOut,
    #[error("Execution failed: {}", display_or_unknown(.0))]
    Execution(String),
    #[error("Execution cancelled.")]
    Cancelled,
    #[error("Configuration error: {0}")]
    Config(String),
}

fn display_or_unknown(message: &str) -> &str {
    if message.trim().is_empty() {
        "Unknown execution error."
    } else {
        message
    }
}

impl From<reqwest::Error> for RunnerError {
    fn from(err: reqwest::Error) -> Self {
        RunnerError::Execution(err.to_string())
    }
}

impl From<serde_json::Error> for RunnerError {
    fn from(err: serde_json::Error) -> Self {
        RunnerError::Execution(err.to_string())
    }
}
