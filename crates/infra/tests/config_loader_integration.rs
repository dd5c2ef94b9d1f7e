//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files and
//! feeding it into the client.

use std::io::Write;
use std::sync::Arc;

use tempfile::NamedTempFile;
use vocawik_domain::{LogFormat, VocawikError};
use vocawik_infra::api::ApiClientConfig;
use vocawik_infra::{bootstrap_client, config, TokenStore};

struct NoTokens;

impl TokenStore for NoTokens {
    fn access_token(&self) -> Option<String> {
        None
    }

    fn set_access_token(&self, _token: Option<String>) {}
}

fn write_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let path = write_config(
        r#"{
            "api": {
                "base_url": "https://api.vocawik.com/",
                "timeout_seconds": 15,
                "refresh_path": "/api/v1/auth/refresh",
                "user_agent": "vocawik-shell/2.3"
            },
            "logging": { "level": "vocawik_infra=debug", "format": "json" }
        }"#,
        "json",
    );

    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(path).ok();

    let config = result.expect("Failed to load config from JSON file");
    assert_eq!(config.api.base_url, "https://api.vocawik.com");
    assert_eq!(config.api.timeout_seconds, 15);
    assert_eq!(config.api.user_agent.as_deref(), Some("vocawik-shell/2.3"));
    assert_eq!(config.logging.level, "vocawik_infra=debug");
    assert_eq!(config.logging.format, LogFormat::Json);

    let client_config = ApiClientConfig::from(&config.api);
    assert_eq!(client_config.base_url, "https://api.vocawik.com");
}

#[test]
fn test_load_config_from_toml_file() {
    let path = write_config(
        r#"
[api]
base_url = "http://localhost:8080"
timeout_seconds = 5

[logging]
level = "warn"
"#,
        "toml",
    );

    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(path).ok();

    let config = result.expect("Failed to load config from TOML file");
    assert_eq!(config.api.refresh_url(), "http://localhost:8080/api/v1/auth/refresh");
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.logging.format, LogFormat::Pretty);
}

#[test]
fn test_missing_api_section_is_rejected() {
    let path = write_config(r#"{ "logging": { "level": "info" } }"#, "json");

    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(path).ok();

    assert!(matches!(result, Err(VocawikError::Config(_))));
}

#[tokio::test]
async fn test_loaded_config_bootstraps_client() {
    let path = write_config(r#"{ "api": { "base_url": "https://api.vocawik.com" } }"#, "json");

    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(path).ok();
    let config = result.expect("config");

    let client = bootstrap_client(&config.api, Arc::new(NoTokens)).expect("client");

    assert_eq!(client.config().base_url, "https://api.vocawik.com");
    assert!(client.hooks().has_refresh());
}
