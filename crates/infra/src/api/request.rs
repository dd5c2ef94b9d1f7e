//! Per-call request description and options

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use vocawik_domain::ClientError;

/// What to send: method, extra headers, JSON body and an optional timeout.
///
/// The pipeline always overrides `Content-Type` and `Authorization`.
#[derive(Debug, Clone)]
pub struct RequestInit {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Value>,
    /// Passed to the transport as-is
    pub timeout: Option<Duration>,
}

impl Default for RequestInit {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestInit {
    pub fn new(method: Method) -> Self {
        Self { method, headers: HeaderMap::new(), body: None, timeout: None }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Serializes `body` as the JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRequest`] if `body` cannot be represented
    /// as JSON.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ClientError> {
        let value = serde_json::to_value(body)
            .map_err(|err| ClientError::InvalidRequest(format!("unserializable body: {err}")))?;
        self.body = Some(value);
        Ok(self)
    }

    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Options that change pipeline behavior for a single call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Attach the bearer token and take part in refresh handling
    pub with_auth: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self { with_auth: true }
    }
}

impl FetchOptions {
    /// Options for endpoints that must be called without credentials.
    pub fn public() -> Self {
        Self { with_auth: false }
    }
}
