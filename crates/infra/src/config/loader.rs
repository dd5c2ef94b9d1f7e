//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the base URL is not set there, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `VOCAWIK_API_BASE_URL`: Backend base URL (required)
//! - `VOCAWIK_API_TIMEOUT_SECS`: Per-exchange timeout in seconds
//! - `VOCAWIK_API_REFRESH_PATH`: Refresh endpoint path
//! - `VOCAWIK_API_USER_AGENT`: User-Agent header value
//! - `VOCAWIK_LOG_LEVEL`: Tracing directive (e.g. `info`)
//! - `VOCAWIK_LOG_FORMAT`: `pretty` or `json`
//!
//! ## File Locations
//! The loader searches the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./vocawik.json` or `./vocawik.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use url::Url;
use vocawik_domain::{ApiConfig, Config, LogFormat, LoggingConfig, Result, VocawikError};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variable is missing or invalid, falls back to loading from a config file.
///
/// # Errors
/// Returns `VocawikError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - The base URL is not an absolute http(s) URL
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `VOCAWIK_API_BASE_URL` is required; every other variable falls back
/// to its default.
///
/// # Errors
/// Returns `VocawikError::Config` if the base URL is missing or any variable
/// has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let defaults = ApiConfig::default();

    let base_url = env_var("VOCAWIK_API_BASE_URL")?;
    let timeout_seconds = match optional_env("VOCAWIK_API_TIMEOUT_SECS") {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|e| VocawikError::Config(format!("Invalid API timeout: {}", e)))?,
        None => defaults.timeout_seconds,
    };
    let refresh_path = optional_env("VOCAWIK_API_REFRESH_PATH").unwrap_or(defaults.refresh_path);
    let user_agent = optional_env("VOCAWIK_API_USER_AGENT");

    let level = optional_env("VOCAWIK_LOG_LEVEL").unwrap_or_else(|| LoggingConfig::default().level);
    let format = match optional_env("VOCAWIK_LOG_FORMAT") {
        Some(raw) => LogFormat::from_str(&raw)
            .map_err(|e| VocawikError::Config(format!("Invalid log format: {}", e)))?,
        None => LogFormat::default(),
    };

    validate(Config {
        api: ApiConfig { base_url, timeout_seconds, refresh_path, user_agent },
        logging: LoggingConfig { level, format },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, searches multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `VocawikError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - The base URL is not an absolute http(s) URL
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(VocawikError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => search_config_paths().ok_or_else(|| {
            VocawikError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| VocawikError::Config(format!("Failed to read config file: {}", e)))?;

    validate(parse_config(&contents, &config_path)?)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| VocawikError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| VocawikError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(VocawikError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Checks the base URL and normalizes it (no trailing slash).
fn validate(mut config: Config) -> Result<Config> {
    let base_url = config.api.base_url.trim();
    let parsed = Url::parse(base_url)
        .map_err(|e| VocawikError::Config(format!("Invalid API base URL '{}': {}", base_url, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(VocawikError::Config(format!(
            "API base URL must use http or https, got '{}'",
            parsed.scheme()
        )));
    }

    config.api.base_url = base_url.trim_end_matches('/').to_string();

    if !config.api.refresh_path.starts_with('/') {
        config.api.refresh_path = format!("/{}", config.api.refresh_path);
    }

    Ok(config)
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory (`./config.{json,toml}`,
///    `./vocawik.{json,toml}`)
/// 2. Parent directories (up to 2 levels)
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn search_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("vocawik.json"),
        dir.join("vocawik.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Get required environment variable
///
/// # Errors
/// Returns `VocawikError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    optional_env(key).ok_or_else(|| {
        VocawikError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Non-empty value of an optional environment variable
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}
