use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;

use crate::config::{RunnerConfig, API_HOST_HEADER, API_KEY_HEADER};
use crate::errors::RunnerError;
use crate::types::{ExecutionRequest, ExecutionResult, SubmissionResponse, SubmissionToken};

/// Transport to a Judge0-compatible execution service
#[async_trait]
pub trait JudgeClient: Send + Sync {
    /// Create an asynchronous submission and return its token
    async fn submit(&self, request: &ExecutionRequest) -> Result<SubmissionToken, RunnerError>;

    /// Fetch the current state of a submission
    async fn fetch(&self, token: &SubmissionToken) -> Result<ExecutionResult, RunnerError>;
}

/// HTTP client for the Judge0 REST API
pub struct HttpJudgeClient {
    client: Client,
    config: RunnerConfig,
}

impl HttpJudgeClient {
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| RunnerError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.config.auth_headers() {
            Some((key, host)) => builder
                .header(API_KEY_HEADER, key)
                .header(API_HOST_HEADER, host),
            None => builder,
        }
    }
}

#[async_trait]
impl JudgeClient for HttpJudgeClient {
    async fn submit(&self, request: &ExecutionRequest) -> Result<SubmissionToken, RunnerError> {
        let url = format!(
            "{}/submissions?base64_encoded=false&wait=false",
            self.config.base_url
        );
        log::debug!(
            "Submitting {} bytes of language {} to {}",
            request.source_code.len(),
            request.language_id,
            url
        );

        let response = self
            .with_auth(self.client.post(&url))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let message = error_message_from_response(response).await;
            log::warn!("Submission rejected: {}", message);
            return Err(RunnerError::SubmissionFailed(message));
        }

        let body: SubmissionResponse = response.json().await?;
        match body.token {
            Some(Value::String(token)) if !token.trim().is_empty() => {
                Ok(SubmissionToken::new(token))
            }
            _ => {
                log::warn!("Submission accepted but no token was returned");
                Err(RunnerError::MissingToken)
            }
        }
    }

    async fn fetch(&self, token: &SubmissionToken) -> Result<ExecutionResult, RunnerError> {
        let url = format!(
            "{}/submissions/{}?base64_encoded=false",
            self.config.base_url,
            urlencoding::encode(token.as_str())
        );

        let response = self.with_auth(self.client.get(&url)).send().await?;

        if !response.status().is_success() {
            let message = error_message_from_response(response).await;
            log::warn!("Fetching submission {} failed: {}", token, message);
            return Err(RunnerError::FetchFailed(message));
        }

        let response_text = response.text().await?;
        Ok(serde_json::from_str(&response_text)?)
    }
}

async fn error_message_from_response(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.ok();
    extract_error_message(status, body.as_deref())
}

/// Best-effort message for a failed call: a JSON `message` or `error` field,
/// then the raw body, then a generic line naming the status code.
pub fn extract_error_message(status: StatusCode, body: Option<&str>) -> String {
    let body = body.map(str::trim).filter(|text| !text.is_empty());

    if let Some(text) = body {
        if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(text) {
            let field = ["message", "error"].iter().find_map(|key| {
                fields
                    .get(*key)
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
            });
            if let Some(message) = field {
                return message.to_string();
            }
        }
        return text.to_string();
    }

    format!("Request failed ({}).", status.as_u16())
}
