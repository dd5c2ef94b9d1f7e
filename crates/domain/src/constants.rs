//! Domain constants
//!
//! Messages, header values and defaults shared by the error model and the
//! request pipeline.

// Normalized error messages
pub const DEFAULT_UNKNOWN_MESSAGE: &str = "Unexpected error occurred.";
pub const DEFAULT_NETWORK_MESSAGE: &str = "Network error occurred. Please check your connection.";

/// HTTP status that marks an authentication failure.
pub const UNAUTHORIZED_STATUS: u16 = 401;

// Wire contract
pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const BEARER_PREFIX: &str = "Bearer ";

// Configuration defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_REFRESH_PATH: &str = "/api/v1/auth/refresh";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Message used when a failed response carries no recognized envelope.
pub fn request_failed_message(status: u16) -> String {
    format!("Request failed: {status}")
}
