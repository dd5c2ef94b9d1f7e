//! Authenticated request pipeline
//!
//! Attaches the bearer token, detects authentication failures, joins or
//! starts the shared token refresh and retries a failed call at most once.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use vocawik_common::sync::SingleFlight;
use vocawik_domain::constants::{
    BEARER_PREFIX, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECONDS, JSON_CONTENT_TYPE,
};
use vocawik_domain::{ApiConfig, ClientError, VocawikError};

use super::auth::ApiClientHooks;
use super::errors::{parse_api_error, ApiResult};
use super::request::{FetchOptions, RequestInit};
use crate::http::{HttpClient, Transport, TransportRequest, TransportResponse};

/// Configuration for API client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClientConfig {
    /// Base URL for API (e.g., "https://api.vocawik.com")
    pub base_url: String,
    /// Default timeout for a single exchange
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self { base_url: config.base_url.clone(), timeout: config.timeout() }
    }
}

/// API client owning its hook set and refresh coordination
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    config: ApiClientConfig,
    hooks: RwLock<Arc<ApiClientHooks>>,
    refresh: SingleFlight<Option<String>>,
}

impl ApiClient {
    /// Create a client backed by a default [`HttpClient`].
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be built
    pub fn new(config: ApiClientConfig) -> Result<Self, VocawikError> {
        let http = HttpClient::builder().timeout(config.timeout).build()?;
        Ok(Self::with_transport(config, Arc::new(http)))
    }

    /// Create a client over an existing transport.
    pub fn with_transport(config: ApiClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            config,
            hooks: RwLock::new(Arc::new(ApiClientHooks::default())),
            refresh: SingleFlight::new(),
        }
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Replaces the whole hook set. Hooks not present in `hooks` are unset.
    pub fn configure(&self, hooks: ApiClientHooks) {
        debug!(?hooks, "configuring API client hooks");
        *self.hooks.write() = Arc::new(hooks);
    }

    /// Snapshot of the hook set currently in effect
    pub fn hooks(&self) -> Arc<ApiClientHooks> {
        Arc::clone(&self.hooks.read())
    }

    /// Base URL and default timeout this client was built with
    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Execute a request and decode the success body into `T`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] when the backend answered with a non-success
    ///   status (after at most one refresh-and-retry)
    /// - [`ClientError::Transport`] when no response was obtained
    /// - [`ClientError::Decode`] when the success body does not fit `T`
    /// - [`ClientError::InvalidRequest`] when the request cannot be built
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        init: &RequestInit,
        options: FetchOptions,
    ) -> ApiResult<T> {
        let value = self.fetch_value(path, init, options).await?;
        serde_json::from_value(value).map_err(|err| ClientError::Decode(err.to_string()))
    }

    /// Execute a request and return the success body as raw JSON.
    ///
    /// An empty success body is returned as `Value::Null`.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::fetch`], except that no decoding into a typed
    /// value takes place.
    #[instrument(
        skip(self, init),
        fields(method = %init.method, path = %path, with_auth = options.with_auth)
    )]
    pub async fn fetch_value(
        &self,
        path: &str,
        init: &RequestInit,
        options: FetchOptions,
    ) -> ApiResult<Value> {
        let token = if options.with_auth { self.hooks().current_token() } else { None };

        let response = self.send(path, init, token.as_deref()).await?;
        if response.is_success() {
            return decode_success(&response);
        }

        let mut error = parse_api_error(&response);
        debug!(status = error.status(), "request failed");

        if !options.with_auth || !error.is_unauthorized() {
            return Err(error.into());
        }

        if let Some(fresh) = self.refresh_access_token().await {
            let retry = self.send(path, init, Some(&fresh)).await?;
            if retry.is_success() {
                debug!("retry after refresh succeeded");
                return decode_success(&retry);
            }
            error = parse_api_error(&retry);
            debug!(status = error.status(), "retry after refresh failed");
        }

        if error.is_unauthorized() {
            warn!("request unauthorized; notifying handler");
            if let Some(handler) = self.hooks().on_unauthorized.clone() {
                handler.on_unauthorized().await;
            }
        }

        Err(error.into())
    }

    /// Execute a GET request
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::fetch`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.fetch(path, &RequestInit::get(), FetchOptions::default()).await
    }

    /// Execute a POST request with a JSON body
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::fetch`]. Returns [`ClientError::InvalidRequest`]
    /// before sending anything if `body` cannot be serialized.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let init = RequestInit::post().json(body)?;
        self.fetch(path, &init, FetchOptions::default()).await
    }

    /// Execute a PUT request with a JSON body
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::post`].
    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let init = RequestInit::put().json(body)?;
        self.fetch(path, &init, FetchOptions::default()).await
    }

    /// Execute a DELETE request
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::fetch`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.fetch(path, &RequestInit::delete(), FetchOptions::default()).await
    }

    /// Runs the configured refresh hook, or joins the one already running.
    async fn refresh_access_token(&self) -> Option<String> {
        let Some(refresher) = self.hooks().refresh.clone() else {
            debug!("no refresh hook configured");
            return None;
        };

        self.refresh
            .run(move || async move {
                info!("refreshing access token");
                let token = refresher.refresh().await.filter(|token| !token.is_empty());
                if token.is_some() {
                    info!("access token refreshed");
                } else {
                    warn!("access token refresh failed");
                }
                token
            })
            .await
    }

    async fn send(
        &self,
        path: &str,
        init: &RequestInit,
        token: Option<&str>,
    ) -> ApiResult<TransportResponse> {
        let mut headers = init.headers.clone();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

        match token {
            Some(token) => {
                let mut value = HeaderValue::from_str(&format!("{BEARER_PREFIX}{token}"))
                    .map_err(|_| {
                        ClientError::InvalidRequest("access token is not a valid header value".into())
                    })?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            None => {
                headers.remove(AUTHORIZATION);
            }
        }

        let body = init
            .body
            .as_ref()
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|err| ClientError::InvalidRequest(format!("unserializable body: {err}")))?;

        let request = TransportRequest {
            method: init.method.clone(),
            url: format!("{}{}", self.config.base_url, path),
            headers,
            body,
            timeout: init.timeout,
        };

        Ok(self.transport.execute(request).await?)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("hooks", &*self.hooks())
            .field("refresh", &self.refresh)
            .finish_non_exhaustive()
    }
}

fn decode_success(response: &TransportResponse) -> ApiResult<Value> {
    if response.is_empty() {
        return Ok(Value::Null);
    }
    response.json().map_err(|err| ClientError::Decode(err.to_string()))
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: ApiClientConfig,
    transport: Option<Arc<dyn Transport>>,
    hooks: Option<ApiClientHooks>,
}

impl ApiClientBuilder {
    /// Base URL prepended to every request path
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Timeout for the default [`HttpClient`]. Ignored when a transport is
    /// supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Use `transport` instead of building a default [`HttpClient`]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Hook set installed on the built client
    pub fn hooks(mut self, hooks: ApiClientHooks) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns error if no transport was given and the default HTTP client
    /// cannot be built
    pub fn build(self) -> Result<ApiClient, VocawikError> {
        let client = match self.transport {
            Some(transport) => ApiClient::with_transport(self.config, transport),
            None => ApiClient::new(self.config)?,
        };
        if let Some(hooks) = self.hooks {
            client.configure(hooks);
        }
        Ok(client)
    }
}
