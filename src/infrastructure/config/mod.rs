//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::application::errors::ConfigError;
use crate::application::services::FetchPolicy;
use crate::domain::entities::Session;

/// Client configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub server: ServerConfig,
    pub sync: SyncConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct ServerConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Retry settings for chat list loads
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct SyncConfig {
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct SessionConfig {
    pub user_id: Option<String>,
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                base_url: "http://localhost:8080".to_string(),
                timeout_secs: 10,
            },
            sync: SyncConfig {
                max_attempts: 3,
                retry_delay_ms: 2000,
            },
            session: SessionConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn load_env() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Override fields from `WUPHF_*` environment variables
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("WUPHF_BASE_URL") {
            self.server.base_url = url;
        }
        if let Ok(user_id) = std::env::var("WUPHF_USER_ID") {
            self.session.user_id = Some(user_id);
        }
        if let Ok(token) = std::env::var("WUPHF_TOKEN") {
            self.session.token = Some(token);
        }
        if let Ok(attempts) = std::env::var("WUPHF_MAX_ATTEMPTS") {
            match attempts.parse() {
                Ok(n) => self.sync.max_attempts = n,
                Err(_) => tracing::warn!("Ignoring invalid WUPHF_MAX_ATTEMPTS: {}", attempts),
            }
        }
        if let Ok(delay) = std::env::var("WUPHF_RETRY_DELAY_MS") {
            match delay.parse() {
                Ok(ms) => self.sync.retry_delay_ms = ms,
                Err(_) => tracing::warn!("Ignoring invalid WUPHF_RETRY_DELAY_MS: {}", delay),
            }
        }
    }

    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy::new(self.sync.max_attempts, Duration::from_millis(self.sync.retry_delay_ms))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.server.timeout_secs)
    }

    /// Session for the signed-in user; both identity and credential are required
    pub fn session(&self) -> Result<Session, ConfigError> {
        let user_id = self
            .session
            .user_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingField("session.user-id".to_string()))?;
        let token = self
            .session
            .token
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingField("session.token".to_string()))?;

        Ok(Session::new(user_id, token))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.server.base_url.starts_with("http://") && !self.server.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue(format!(
                "server.base-url must be an http(s) URL: {}",
                self.server.base_url
            )));
        }
        Ok(())
    }
}
