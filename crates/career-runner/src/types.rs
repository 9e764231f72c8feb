use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Status ids the service reports while a submission is still moving.
pub const STATUS_IN_QUEUE: u32 = 1;
pub const STATUS_PROCESSING: u32 = 2;

/// Body of a "create submission" call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub source_code: String,
    pub language_id: u32,
}

impl ExecutionRequest {
    pub fn new(source_code: impl Into<String>, language_id: u32) -> Self {
        Self {
            source_code: source_code.into(),
            language_id,
        }
    }
}

/// Opaque handle identifying one in-flight submission
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubmissionToken(String);

impl SubmissionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Response of a "create submission" call
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionResponse {
    /// Kept loose so a non-string token reads as missing rather than as a
    /// decode failure.
    #[serde(default)]
    pub token: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionStatus {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ExecutionStatus {
    pub fn new(id: u32, description: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            description: Some(description.into()),
        }
    }

    /// Anything other than "In Queue" or "Processing" is final, including a
    /// status the service forgot to number.
    pub fn is_terminal(&self) -> bool {
        !matches!(self.id, Some(STATUS_IN_QUEUE) | Some(STATUS_PROCESSING))
    }
}

/// Result of a "fetch submission" call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub compile_output: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "deserialize_status")]
    pub status: ExecutionStatus,
    #[serde(default, deserialize_with = "deserialize_time")]
    pub time: Option<String>,
    #[serde(default)]
    pub memory: Option<u64>,
}

impl ExecutionResult {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

fn deserialize_status<'de, D>(deserializer: D) -> Result<ExecutionStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ExecutionStatus>::deserialize(deserializer)?.unwrap_or_default())
}

// Judge0 sends time as a decimal string, some forks send a bare number.
fn deserialize_time<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(time)) => Ok(Some(time)),
        Some(Value::Number(time)) => Ok(Some(time.to_string())),
        _ => Ok(None),
    }
}

/// Formatted text shown to the user after a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReport(String);

impl ExecutionReport {
    pub fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ExecutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
