use anyhow::{Context, Result};
use career_runner::RunnerConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncReadExt;

/// Settings given on the command line, applied on top of file and env config
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub base_url: Option<String>,
    pub max_poll_attempts: Option<u32>,
    pub poll_interval_ms: Option<u64>,
}

impl ConfigOverrides {
    /// Defaults < YAML file < `JUDGE0_*` env < flags
    pub fn resolve(&self) -> Result<RunnerConfig> {
        let base = match &self.config_file {
            Some(path) => {
                log::info!("Loading runner configuration from {}", path.display());
                RunnerConfig::from_yaml_file(path)?
            }
            None => RunnerConfig::default(),
        };

        let mut config = base.with_env_overrides()?;
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(attempts) = self.max_poll_attempts {
            config = config.with_max_poll_attempts(attempts);
        }
        if let Some(interval) = self.poll_interval_ms {
            config = config.with_poll_interval(Duration::from_millis(interval));
        }

        config.validate()?;
        Ok(config)
    }
}

/// Source code from `path`, or from stdin when no path is given
pub async fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read source file '{}'", path.display())),
        None => {
            let mut source = String::new();
            tokio::io::stdin()
                .read_to_string(&mut source)
                .await
                .context("Failed to read source from stdin")?;
            Ok(source)
        }
    }
}
