//! Configuration structures
//!
//! Loaded by `vocawik-infra::config` from environment variables or a
//! JSON/TOML file.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_LOG_LEVEL, DEFAULT_REFRESH_PATH, DEFAULT_TIMEOUT_SECONDS,
};
use crate::impl_domain_enum_conversions;

/// Top-level client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Prefix prepended to every request path (e.g. `https://api.vocawik.com`)
    pub base_url: String,
    /// Default transport timeout for a single exchange
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Path of the token refresh endpoint, relative to `base_url`
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Absolute URL of the refresh endpoint
    pub fn refresh_url(&self) -> String {
        format!("{}{}", self.base_url, self.refresh_path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
            user_agent: None,
        }
    }
}

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl_domain_enum_conversions!(LogFormat {
    Pretty => "pretty",
    Json => "json",
});

/// Tracing settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level directive, e.g. "info" or "vocawik_infra=debug"
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), format: LogFormat::default() }
    }
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_refresh_path() -> String {
    DEFAULT_REFRESH_PATH.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
