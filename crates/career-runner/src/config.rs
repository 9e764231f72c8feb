//! Execution service configuration
//!
//! Configuration is resolved once at startup and handed to the runner by
//! value. Sources layer in a fixed order: built-in defaults, an optional YAML
//! file, then `JUDGE0_*` environment variables. Command-line front ends apply
//! their own flags last.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::errors::RunnerError;

pub const DEFAULT_BASE_URL: &str = "https://ce.judge0.com";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1200;
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 12;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

pub const ENV_BASE_URL: &str = "JUDGE0_API_URL";
pub const ENV_API_KEY: &str = "JUDGE0_API_KEY";
pub const ENV_API_HOST: &str = "JUDGE0_API_HOST";
pub const ENV_POLL_INTERVAL_MS: &str = "JUDGE0_POLL_INTERVAL_MS";
pub const ENV_MAX_POLL_ATTEMPTS: &str = "JUDGE0_MAX_POLL_ATTEMPTS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "JUDGE0_REQUEST_TIMEOUT_SECS";

pub const API_KEY_HEADER: &str = "X-RapidAPI-Key";
pub const API_HOST_HEADER: &str = "X-RapidAPI-Host";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub api_host: Option<String>,
    pub poll_interval_ms: u64,
    pub max_poll_attempts: u32,
    /// Upper bound on each individual HTTP call, on top of the poll budget.
    pub request_timeout_secs: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            api_host: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_poll_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl RunnerConfig {
    /// Defaults overlaid with whatever `JUDGE0_*` variables are set.
    pub fn from_env() -> Result<Self, RunnerError> {
        Self::default().with_env_overrides()
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, RunnerError> {
        let config: RunnerConfig = serde_yaml::from_str(content)
            .map_err(|e| RunnerError::Config(format!("Invalid YAML configuration: {}", e)))?;
        Ok(config.normalized())
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, RunnerError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RunnerError::Config(format!(
                "Failed to read configuration file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn with_env_overrides(mut self) -> Result<Self, RunnerError> {
        if let Some(base_url) = env_value(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(api_key) = env_value(ENV_API_KEY) {
            self.api_key = Some(api_key);
        }
        if let Some(api_host) = env_value(ENV_API_HOST) {
            self.api_host = Some(api_host);
        }
        if let Some(interval) = env_number(ENV_POLL_INTERVAL_MS)? {
            self.poll_interval_ms = interval;
        }
        if let Some(attempts) = env_number(ENV_MAX_POLL_ATTEMPTS)? {
            self.max_poll_attempts = attempts;
        }
        if let Some(timeout) = env_number(ENV_REQUEST_TIMEOUT_SECS)? {
            self.request_timeout_secs = timeout;
        }
        Ok(self.normalized())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self.normalized()
    }

    pub fn with_auth(mut self, api_key: impl Into<String>, api_host: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self.api_host = Some(api_host.into());
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn with_max_poll_attempts(mut self, attempts: u32) -> Self {
        self.max_poll_attempts = attempts;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_secs = timeout.as_secs();
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The `(key, host)` header pair, only when both halves are configured.
    pub fn auth_headers(&self) -> Option<(&str, &str)> {
        let key = self.api_key.as_deref().filter(|k| !k.trim().is_empty())?;
        let host = self.api_host.as_deref().filter(|h| !h.trim().is_empty())?;
        Some((key, host))
    }

    pub fn validate(&self) -> Result<(), RunnerError> {
        if self.base_url.trim().is_empty() {
            return Err(RunnerError::Config("base_url must not be empty".to_string()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(RunnerError::Config(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.max_poll_attempts == 0 {
            return Err(RunnerError::Config(
                "max_poll_attempts must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(RunnerError::Config(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.api_key.is_some() != self.api_host.is_some() {
            log::warn!(
                "Only one of api_key/api_host is configured; requests will be sent without auth headers"
            );
        }
        Ok(())
    }

    fn normalized(mut self) -> Self {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        self
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_number<T: std::str::FromStr>(name: &str) -> Result<Option<T>, RunnerError> {
    match env_value(name) {
        Some(raw) => raw.parse::<T>().map(Some).map_err(|_| {
            RunnerError::Config(format!("{} must be a non-negative integer, got '{}'", name, raw))
        }),
        None => Ok(None),
    }
}
