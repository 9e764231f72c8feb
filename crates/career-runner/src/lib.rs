//! Client for running code snippets on a Judge0-compatible execution service
//!
//! The code block viewer hands this crate a snippet and a language label and
//! gets back a single display string: either the program's formatted output
//! or a human-readable error. Execution is asynchronous on the service side,
//! so a run submits once and then polls for completion under a fixed attempt
//! budget.
//!
//! # Architecture Overview
//!
//! - **Language resolution**: label normalization and the language id table
//! - **Configuration**: defaults, YAML and `JUDGE0_*` environment layering
//! - **Transport**: the [`JudgeClient`] trait and its reqwest implementation
//! - **Orchestration**: [`CodeRunner`], the submit-and-poll loop
//! - **Formatting**: turning a terminal result into an execution report

pub mod config;
pub mod errors;
pub mod http_client;
pub mod languages;
pub mod report;
pub mod runner;
pub mod types;

pub use config::RunnerConfig;
pub use errors::RunnerError;
pub use http_client::{extract_error_message, HttpJudgeClient, JudgeClient};
pub use languages::{canonical_language, resolve_language, supported_languages};
pub use report::format_report;
pub use runner::{CodeRunner, Sleeper, TokioSleeper};
pub use types::*;
