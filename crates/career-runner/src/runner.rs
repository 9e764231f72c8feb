//! Submit-and-poll orchestration
//!
//! A run is one submission followed by a strictly sequential poll loop with a
//! fixed attempt budget. At most one request is in flight per run, and the
//! runner keeps no state between runs, so a single `CodeRunner` can serve any
//! number of concurrent callers.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::config::RunnerConfig;
use crate::errors::RunnerError;
use crate::http_client::{HttpJudgeClient, JudgeClient};
use crate::languages::resolve_language;
use crate::report::format_report;
use crate::types::{ExecutionReport, ExecutionRequest};

/// Delay primitive used between poll attempts
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

pub struct CodeRunner {
    client: Arc<dyn JudgeClient>,
    sleeper: Arc<dyn Sleeper>,
    poll_interval: Duration,
    max_poll_attempts: u32,
}

impl CodeRunner {
    /// Runner talking HTTP to the service described by `config`
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        config.validate()?;
        let poll_interval = config.poll_interval();
        let max_poll_attempts = config.max_poll_attempts;
        let client = HttpJudgeClient::new(config)?;

        Ok(Self {
            client: Arc::new(client),
            sleeper: Arc::new(TokioSleeper),
            poll_interval,
            max_poll_attempts,
        })
    }

    /// Runner over an arbitrary transport, polling with the budget in `config`.
    /// A zero attempt budget is raised to one poll.
    pub fn with_client(client: Arc<dyn JudgeClient>, config: &RunnerConfig) -> Self {
        Self {
            client,
            sleeper: Arc::new(TokioSleeper),
            poll_interval: config.poll_interval(),
            max_poll_attempts: config.max_poll_attempts.max(1),
        }
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Run `source_code` and return the text to display. Never fails: every
    /// error outcome is rendered as its message.
    pub async fn run(&self, source_code: &str, language: &str) -> String {
        self.run_cancellable(source_code, language, &CancellationToken::new())
            .await
    }

    pub async fn run_cancellable(
        &self,
        source_code: &str,
        language: &str,
        cancel: &CancellationToken,
    ) -> String {
        match self.execute_cancellable(source_code, language, cancel).await {
            Ok(report) => report.into_string(),
            Err(e) => e.to_string(),
        }
    }

    /// Same as [`CodeRunner::run`], keeping the outcome class.
    pub async fn execute(
        &self,
        source_code: &str,
        language: &str,
    ) -> Result<ExecutionReport, RunnerError> {
        self.execute_cancellable(source_code, language, &CancellationToken::new())
            .await
    }

    pub async fn execute_cancellable(
        &self,
        source_code: &str,
        language: &str,
        cancel: &CancellationToken,
    ) -> Result<ExecutionReport, RunnerError> {
        let language_id = resolve_language(language)
            .ok_or_else(|| RunnerError::UnsupportedLanguage(language.to_string()))?;
        let request = ExecutionRequest::new(source_code, language_id);

        if cancel.is_cancelled() {
            return Err(RunnerError::Cancelled);
        }
        let token = self.client.submit(&request).await?;
        log::debug!("Submission {} created for language id {}", token, language_id);

        for attempt in 1..=self.max_poll_attempts {
            if cancel.is_cancelled() {
                return Err(RunnerError::Cancelled);
            }

            let result = self.client.fetch(&token).await?;
            if result.is_terminal() {
                log::debug!(
                    "Submission {} finished after {} poll(s) with status {:?}",
                    token,
                    attempt,
                    result.status.description
                );
                return Ok(format_report(&result));
            }

            log::debug!(
                "Submission {} still pending ({:?}), attempt {}/{}",
                token,
                result.status.description,
                attempt,
                self.max_poll_attempts
            );

            if attempt < self.max_poll_attempts {
                tokio::select! {
                    _ = cancel.cancelled() => return Err(RunnerError::Cancelled),
                    _ = self.sleeper.sleep(self.poll_interval) => {}
                }
            }
        }

        log::warn!(
            "Submission {} did not finish within {} poll attempts",
            token,
            self.max_poll_attempts
        );
        Err(RunnerError::TimedOut)
    }
}
