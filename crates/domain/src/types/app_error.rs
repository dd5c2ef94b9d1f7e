//! Normalized application error
//!
//! Application code outside the request pipeline only sees [`AppError`]. Every
//! [`ClientError`] maps to exactly one [`AppErrorKind`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::client_error::ClientError;
use crate::constants::{DEFAULT_NETWORK_MESSAGE, DEFAULT_UNKNOWN_MESSAGE};
use crate::impl_domain_enum_conversions;

/// Normalized error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppErrorKind {
    Api,
    Network,
    Unknown,
}

impl_domain_enum_conversions!(AppErrorKind {
    Api => "api",
    Network => "network",
    Unknown => "unknown",
});

/// Standard error shape consumed by UI and domain logic
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl AppError {
    fn unknown(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::Unknown,
            message: message.into(),
            status: None,
            code: None,
            details: None,
        }
    }
}

/// Converts any pipeline failure into the [`AppError`] shape.
pub fn normalize_api_error(input: &ClientError) -> AppError {
    match input {
        ClientError::Api(error) => AppError {
            kind: AppErrorKind::Api,
            message: message_or_default(error.message()),
            status: Some(error.status()),
            code: error.code().map(str::to_string),
            details: error.body().cloned(),
        },
        ClientError::Transport(_) => AppError {
            kind: AppErrorKind::Network,
            message: DEFAULT_NETWORK_MESSAGE.to_string(),
            status: None,
            code: None,
            details: None,
        },
        ClientError::Decode(_) | ClientError::InvalidRequest(_) => {
            AppError::unknown(message_or_default(&input.to_string()))
        }
        ClientError::Payload(value) => AppError {
            details: Some(value.clone()),
            ..AppError::unknown(DEFAULT_UNKNOWN_MESSAGE)
        },
    }
}

fn message_or_default(message: &str) -> String {
    if message.is_empty() {
        DEFAULT_UNKNOWN_MESSAGE.to_string()
    } else {
        message.to_string()
    }
}

impl From<&ClientError> for AppError {
    fn from(error: &ClientError) -> Self {
        normalize_api_error(error)
    }
}

impl From<ClientError> for AppError {
    fn from(error: ClientError) -> Self {
        normalize_api_error(&error)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::{ApiError, TransportError, TransportErrorKind};

    #[test]
    fn maps_api_error_into_api_shape() {
        let error = ApiError::new(403, "Access denied.")
            .with_code("FORBIDDEN")
            .with_body(json!({ "code": 403 }));

        let normalized = normalize_api_error(&ClientError::Api(error));

        assert_eq!(
            normalized,
            AppError {
                kind: AppErrorKind::Api,
                message: "Access denied.".into(),
                status: Some(403),
                code: Some("FORBIDDEN".into()),
                details: Some(json!({ "code": 403 })),
            }
        );
    }

    #[test]
    fn api_error_with_empty_message_uses_default() {
        let normalized = normalize_api_error(&ClientError::from(ApiError::new(500, "")));

        assert_eq!(normalized.kind, AppErrorKind::Api);
        assert_eq!(normalized.message, DEFAULT_UNKNOWN_MESSAGE);
    }

    #[test]
    fn maps_transport_failure_into_network_shape() {
        let failure = TransportError::new(TransportErrorKind::Connect, "Failed to fetch");

        let normalized = normalize_api_error(&ClientError::Transport(failure));

        assert_eq!(normalized.kind, AppErrorKind::Network);
        assert!(normalized.message.contains("Network"));
        assert!(normalized.status.is_none());
        assert!(normalized.details.is_none());
    }

    #[test]
    fn maps_other_errors_into_unknown_with_their_message() {
        let normalized = AppError::from(ClientError::Decode("expected value".into()));

        assert_eq!(normalized.kind, AppErrorKind::Unknown);
        assert_eq!(normalized.message, "Failed to decode response body: expected value");
        assert!(normalized.details.is_none());
    }

    #[test]
    fn maps_unknown_values_into_unknown_with_details() {
        let normalized = AppError::from(&ClientError::from(json!({ "foo": "bar" })));

        assert_eq!(normalized.kind, AppErrorKind::Unknown);
        assert_eq!(normalized.message, DEFAULT_UNKNOWN_MESSAGE);
        assert_eq!(normalized.details, Some(json!({ "foo": "bar" })));
    }

    #[test]
    fn serializes_in_client_shape() {
        let normalized = AppError::from(ClientError::Transport(TransportError::new(
            TransportErrorKind::Timeout,
            "deadline elapsed",
        )));

        assert_eq!(
            serde_json::to_value(&normalized).unwrap(),
            json!({ "kind": "network", "message": DEFAULT_NETWORK_MESSAGE })
        );
    }
}
