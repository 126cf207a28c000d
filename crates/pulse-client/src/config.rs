//! Application configuration.

use crate::error::{AppError, AppResult};
use pulse_api::QueryConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend base URL without a trailing slash.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Path of the server-push event endpoint, joined onto the base URL.
    #[serde(default = "default_events_path")]
    pub events_path: String,
    /// Poll timer period (seconds). Default: 30.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Fixed reconnect delay for the push channel (ms). Default: 5000.
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
    /// Query sizes for the view queries.
    #[serde(default)]
    pub query: QueryConfig,
}

fn default_api_base_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_events_path() -> String {
    "/api/events".to_string()
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_reconnect_delay_ms() -> u64 {
    5_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            events_path: default_events_path(),
            poll_interval_secs: default_poll_interval_secs(),
            reconnect_delay_ms: default_reconnect_delay_ms(),
            query: QueryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Path precedence: explicit override, then the `PULSE_CONFIG` env
    /// var, then `config/default.toml`. A missing file falls back to the
    /// built-in defaults; a present but invalid file is an error.
    pub fn load(path_override: Option<&str>) -> AppResult<Self> {
        let config_path = path_override
            .map(str::to_string)
            .or_else(|| std::env::var("PULSE_CONFIG").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if Path::new(&config_path).exists() {
            Self::from_file(&config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Absolute URL of the push event endpoint.
    pub fn events_url(&self) -> String {
        format!("{}{}", self.api_base_url, self.events_path)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}
