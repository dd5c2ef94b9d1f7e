use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use tracing::debug;
use vocawik_domain::{TransportError, VocawikError};

use super::transport::{Transport, TransportRequest, TransportResponse};
use crate::errors::{InfraError, IntoTransportError};

/// reqwest-backed [`Transport`].
///
/// Sends each request exactly once; the pipeline above decides whether a
/// second attempt is warranted.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, VocawikError> {
        Self::builder().build()
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn execute(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        let TransportRequest { method, url, headers, body, timeout } = request;

        let mut builder = self.client.request(method.clone(), &url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        debug!(%method, %url, "sending HTTP request");
        let response = builder.send().await.map_err(|err| {
            debug!(%method, %url, error = %err, "HTTP request failed");
            err.into_transport()
        })?;

        let status = response.status();
        debug!(%method, %url, %status, "received HTTP response");

        let body = response.bytes().await.map_err(IntoTransportError::into_transport)?;
        Ok(TransportResponse::new(status, body.to_vec()))
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
    cookie_store: bool,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: None,
            default_headers: None,
            cookie_store: false,
        }
    }
}

impl HttpClientBuilder {
    /// Whole-request timeout applied when a call sets none
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Value of the `User-Agent` header
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Headers sent with every request
    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// Keep cookies between requests (the refresh credential is a cookie).
    pub fn cookie_store(mut self, enabled: bool) -> Self {
        self.cookie_store = enabled;
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns [`VocawikError::Config`] if reqwest rejects the configuration
    pub fn build(self) -> Result<HttpClient, VocawikError> {
        let mut builder = ReqwestClient::builder()
            .timeout(self.timeout)
            .cookie_store(self.cookie_store)
            .no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| VocawikError::from(InfraError::from(err)))?;

        Ok(HttpClient { client })
    }
}
