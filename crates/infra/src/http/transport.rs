//! Transport abstraction used by the request pipeline

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use vocawik_domain::TransportError;

/// One outgoing HTTP exchange, fully resolved
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
    /// Per-request timeout, overriding the transport default
    pub timeout: Option<Duration>,
}

/// A received HTTP response with its body fully read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decodes the body as JSON
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// True when the body holds nothing but whitespace
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }
}

/// Sends one request and returns the response, or a failure when no HTTP
/// response could be obtained.
///
/// Implementations perform exactly one exchange per call; retry policy
/// belongs to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: TransportRequest)
        -> Result<TransportResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_json_body() {
        let response = TransportResponse::new(StatusCode::OK, br#"{"ok":true}"#.to_vec());

        assert!(response.is_success());
        assert!(!response.is_empty());
        assert_eq!(response.json().unwrap(), json!({ "ok": true }));
    }

    #[test]
    fn whitespace_body_is_empty() {
        let response = TransportResponse::new(StatusCode::NO_CONTENT, b" \n".to_vec());

        assert!(response.is_empty());
        assert!(response.json().is_err());
    }
}
