use serde_json::{json, Value};
use std::collections::VecDeque;

/// A canned HTTP answer: status code plus raw body
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedResponse {
    pub status: u16,
    pub body: String,
}

impl ScriptedResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn token(token: &str) -> Self {
        Self::json(201, json!({ "token": token }))
    }

    pub fn queued() -> Self {
        Self::with_status(1, "In Queue")
    }

    pub fn processing() -> Self {
        Self::with_status(2, "Processing")
    }

    pub fn accepted(stdout: &str, time: &str, memory: u64) -> Self {
        Self::json(
            200,
            json!({
                "stdout": stdout,
                "stderr": null,
                "compile_output": null,
                "message": null,
                "status": { "id": 3, "description": "Accepted" },
                "time": time,
                "memory": memory
            }),
        )
    }

    pub fn with_status(id: u32, description: &str) -> Self {
        Self::json(
            200,
            json!({
                "stdout": null,
                "stderr": null,
                "compile_output": null,
                "message": null,
                "status": { "id": id, "description": description },
                "time": null,
                "memory": null
            }),
        )
    }

    pub fn is_json(&self) -> bool {
        serde_json::from_str::<Value>(&self.body).is_ok()
    }
}

/// What the mock answers, in order.
///
/// Without a scripted submit response every submission gets a fresh token.
/// Once the poll queue runs dry, polls answer `Accepted` with the submitted
/// source echoed back as stdout.
#[derive(Debug, Clone, Default)]
pub struct JudgeScript {
    pub submit: Option<ScriptedResponse>,
    pub polls: VecDeque<ScriptedResponse>,
}

impl JudgeScript {
    pub fn echo() -> Self {
        Self::default()
    }

    pub fn with_submit(mut self, response: ScriptedResponse) -> Self {
        self.submit = Some(response);
        self
    }

    pub fn with_polls(mut self, responses: Vec<ScriptedResponse>) -> Self {
        self.polls.extend(responses);
        self
    }

    /// Poll answers that never reach a terminal status
    pub fn pending_for(mut self, polls: usize) -> Self {
        self.polls
            .extend(std::iter::repeat(ScriptedResponse::processing()).take(polls));
        self
    }
}
