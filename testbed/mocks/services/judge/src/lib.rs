//! Mock Judge0 API server for exercising the code runner
//!
//! Serves the two submission endpoints the runner talks to, answers from a
//! script of canned responses, and records every request so tests can assert
//! on call counts, query strings and headers without a real execution
//! service.

pub mod fixtures;
pub mod handlers;
pub mod server;

pub use fixtures::{JudgeScript, ScriptedResponse};
pub use server::{serve, MockJudgeServer, RecordedRequest};
