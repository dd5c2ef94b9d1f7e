//! Refresh endpoint client

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use tracing::{debug, instrument, warn};
use vocawik_domain::constants::JSON_CONTENT_TYPE;
use vocawik_domain::AuthTokenResponse;

use super::store::TokenStore;
use crate::api::TokenRefresher;
use crate::http::{Transport, TransportRequest};

/// Calls `POST <refresh_url>` and stores the returned access token.
///
/// The refresh credential is an HTTP-only cookie, so the transport must share
/// the cookie jar used for login.
pub struct HttpTokenRefresher {
    transport: Arc<dyn Transport>,
    refresh_url: String,
    store: Arc<dyn TokenStore>,
}

impl HttpTokenRefresher {
    pub fn new(
        transport: Arc<dyn Transport>,
        refresh_url: impl Into<String>,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        Self { transport, refresh_url: refresh_url.into(), store }
    }

    pub fn refresh_url(&self) -> &str {
        &self.refresh_url
    }
}

#[async_trait]
impl TokenRefresher for HttpTokenRefresher {
    #[instrument(skip(self), fields(url = %self.refresh_url))]
    async fn refresh(&self) -> Option<String> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

        let request = TransportRequest {
            method: Method::POST,
            url: self.refresh_url.clone(),
            headers,
            body: None,
            timeout: None,
        };

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "refresh request failed");
                return None;
            }
        };

        if !response.is_success() {
            debug!(status = %response.status, "refresh rejected");
            return None;
        }

        let payload: AuthTokenResponse = match serde_json::from_slice(&response.body) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "refresh response is not a token payload");
                return None;
            }
        };

        let token = payload.usable_token()?.to_string();
        self.store.set_access_token(Some(token.clone()));
        Some(token)
    }
}

impl std::fmt::Debug for HttpTokenRefresher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTokenRefresher").field("refresh_url", &self.refresh_url).finish()
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::http::HttpClient;

    #[derive(Default)]
    struct SlotStore(Mutex<Option<String>>);

    impl TokenStore for SlotStore {
        fn access_token(&self) -> Option<String> {
            self.0.lock().clone()
        }

        fn set_access_token(&self, token: Option<String>) {
            *self.0.lock() = token;
        }
    }

    fn refresher_for(server: &MockServer, store: Arc<SlotStore>) -> HttpTokenRefresher {
        let transport = Arc::new(HttpClient::new().expect("http client"));
        HttpTokenRefresher::new(transport, format!("{}/api/v1/auth/refresh", server.uri()), store)
    }

    #[tokio::test]
    async fn stores_and_returns_new_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/refresh"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accessToken": "fresh",
                "tokenType": "Bearer",
                "expiresIn": 900
            })))
            .expect(1)
            .mount(&server)
            .await;

        let store = Arc::new(SlotStore::default());
        let refresher = refresher_for(&server, Arc::clone(&store));

        assert_eq!(refresher.refresh().await.as_deref(), Some("fresh"));
        assert_eq!(store.access_token().as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn rejected_refresh_yields_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "code": 401,
                "message": "Refresh token expired.",
                "status": "UNAUTHORIZED"
            })))
            .mount(&server)
            .await;

        let store = Arc::new(SlotStore::default());
        store.set_access_token(Some("old".into()));
        let refresher = refresher_for(&server, Arc::clone(&store));

        assert_eq!(refresher.refresh().await, None);
        assert_eq!(store.access_token().as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn payload_without_token_yields_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "accessToken": "" })))
            .mount(&server)
            .await;

        let store = Arc::new(SlotStore::default());
        let refresher = refresher_for(&server, Arc::clone(&store));

        assert_eq!(refresher.refresh().await, None);
        assert_eq!(store.access_token(), None);
    }

    #[tokio::test]
    async fn non_json_success_yields_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let refresher = refresher_for(&server, Arc::new(SlotStore::default()));

        assert_eq!(refresher.refresh().await, None);
    }
}
