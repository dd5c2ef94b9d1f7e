//! Backend error envelope and the HTTP-status-bearing request error

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::constants::{request_failed_message, UNAUTHORIZED_STATUS};

/// Error payload returned by backend APIs on non-2xx responses
///
/// `code` duplicates the HTTP status, `status` carries the machine-readable
/// symbolic code (e.g. `"UNAUTHORIZED"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub code: u16,
    pub message: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ApiErrorResponse {
    /// Returns the typed envelope when `value` has the envelope shape.
    ///
    /// A recognized envelope whose `code` does not fit an HTTP status
    /// (negative, fractional, too large) yields `None`.
    pub fn recognize(value: &Value) -> Option<Self> {
        if !is_api_error_response(value) {
            return None;
        }
        let code = value.get("code").and_then(Value::as_u64)?;
        Some(Self {
            code: u16::try_from(code).ok()?,
            message: value.get("message").and_then(Value::as_str)?.to_string(),
            status: value.get("status").and_then(Value::as_str)?.to_string(),
            timestamp: value.get("timestamp").and_then(Value::as_str).map(str::to_string),
        })
    }
}

/// True when `value` carries `code` as a number, `message` as a string and
/// `status` as a string.
pub fn is_api_error_response(value: &Value) -> bool {
    let Some(candidate) = value.as_object() else {
        return false;
    };
    candidate.get("code").is_some_and(Value::is_number)
        && candidate.get("message").is_some_and(Value::is_string)
        && candidate.get("status").is_some_and(Value::is_string)
}

/// Failed API request: the backend produced an HTTP response with a
/// non-success status.
///
/// Immutable once built; the `with_*` methods are only usable while the value
/// is still owned by its constructor.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    status: u16,
    message: String,
    code: Option<String>,
    body: Option<Value>,
}

impl ApiError {
    /// Error with the given status and message, no code or body
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), code: None, body: None }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Builds the error for a failed response from its HTTP status and the
    /// decoded body (`None` when the body was empty or not JSON).
    ///
    /// A recognized envelope supplies status, message and code and is kept
    /// whole as `body`. Anything else produces a generic error carrying the
    /// HTTP status.
    pub fn from_response(http_status: u16, body: Option<Value>) -> Self {
        if let Some(envelope) = body.as_ref().and_then(ApiErrorResponse::recognize) {
            return Self {
                status: envelope.code,
                message: envelope.message,
                code: Some(envelope.status),
                body,
            };
        }

        Self { status: http_status, message: request_failed_message(http_status), code: None, body }
    }

    /// HTTP status (or the envelope's `code`)
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Message meant for display
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Symbolic code such as `UNAUTHORIZED`, when known
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// The full parsed error body, when it was JSON
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == UNAUTHORIZED_STATUS
    }
}
