use figment::{Figment, providers::{Format, Json, Toml, Env, Serialized}};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use crate::core::error::LogError;
use crate::loggers::builder::{LoggerConfig, DEFAULT_BUFFER_SIZE, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY};
use crate::loggers::core::LogLevel;

/// Environment prefix: `QUELOG_BUFFER_SIZE=256`, `QUELOG_LEVEL=warn`, ...
pub const ENV_PREFIX: &str = "QUELOG_";

/// Serializable logger settings, as read from a file and the environment.
///
/// Holds everything in [`LoggerConfig`] except the sink, which is code, not data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    pub buffer_size: usize,
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
    pub level: LogLevel,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY.as_millis() as u64,
            level: LogLevel::Debug,
        }
    }
}

impl LoggerSettings {
    /// ENV ONLY: defaults overridden by `QUELOG_` variables.
    pub fn from_env() -> Result<Self, LogError> {
        Self::figment(None)?
            .extract()
            .map_err(|e| LogError::ConfigError(e.to_string()))
    }

    /// FILE + ENV: defaults, then the file (JSON, or TOML by extension), then `QUELOG_`
    /// variables. Fails if the file is missing.
    pub fn load(path: &str) -> Result<Self, LogError> {
        Self::figment(Some(path))?
            .extract()
            .map_err(|e| LogError::ConfigError(e.to_string()))
    }

    fn figment(path: Option<&str>) -> Result<Figment, LogError> {
        let mut figment = Figment::from(Serialized::defaults(LoggerSettings::default()));

        if let Some(path) = path {
            if !Path::new(path).exists() {
                return Err(LogError::ConfigError(format!("Local file not found: {}", path)));
            }
            figment = match Path::new(path).extension().and_then(|e| e.to_str()) {
                Some("toml") => figment.merge(Toml::file(path)),
                _ => figment.merge(Json::file(path)),
            };
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Config without a sink; the logger's default sink applies.
    pub fn into_config(self) -> LoggerConfig {
        LoggerConfig {
            buffer_size: self.buffer_size,
            sink: None,
            level: self.level,
            max_attempts: self.max_attempts,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}
