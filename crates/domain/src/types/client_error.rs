//! Failures returned by the request pipeline

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::api_error::ApiError;
use crate::impl_domain_enum_conversions;

/// Where a transport exchange broke down before an HTTP response existed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportErrorKind {
    /// DNS or connection establishment failed
    Connect,
    Timeout,
    /// Request could not be built or sent
    Request,
    /// Response body could not be read
    Body,
}

impl_domain_enum_conversions!(TransportErrorKind {
    Connect => "connect",
    Timeout => "timeout",
    Request => "request",
    Body => "body",
});

/// Low-level transport failure (no HTTP response available)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} failure: {message}")]
pub struct TransportError {
    kind: TransportErrorKind,
    message: String,
}

impl TransportError {
    /// Failure of the given kind with a detail message
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    /// What went wrong at the transport level
    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    /// Human-readable detail from the underlying client
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Every failure surfaced by the authenticated request pipeline
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Failed to decode response body: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Opaque non-error failure value handed over by surrounding code
    #[error("Unexpected failure payload: {0}")]
    Payload(Value),
}

impl ClientError {
    /// The request error, when the backend answered
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) => Some(error),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.as_api().map(ApiError::status)
    }
}

impl From<Value> for ClientError {
    fn from(value: Value) -> Self {
        Self::Payload(value)
    }
}
