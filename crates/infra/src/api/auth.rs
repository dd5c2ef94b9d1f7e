//! Authentication hooks consumed by the request pipeline
//!
//! The pipeline never owns credentials. It asks these collaborators for the
//! current token, for a refreshed one after a 401, and tells them when
//! authentication has definitively failed.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

/// Supplies the current access token, if any.
///
/// Called synchronously right before each authenticated send.
pub trait AccessTokenProvider: Send + Sync {
    fn access_token(&self) -> Option<String>;
}

impl<F> AccessTokenProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn access_token(&self) -> Option<String> {
        self()
    }
}

/// Obtains a new access token after an authentication failure.
///
/// Returns `None` when the refresh failed for any reason. Implementations
/// must not fail in any other way.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self) -> Option<String>;
}

#[async_trait]
impl<F, Fut> TokenRefresher for F
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Option<String>> + Send + 'static,
{
    async fn refresh(&self) -> Option<String> {
        self().await
    }
}

/// Notified when a call ends in an authentication failure that refreshing
/// could not fix.
#[async_trait]
pub trait UnauthorizedHandler: Send + Sync {
    async fn on_unauthorized(&self);
}

#[async_trait]
impl<F, Fut> UnauthorizedHandler for F
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn on_unauthorized(&self) {
        self().await
    }
}

/// The hook set held by an [`ApiClient`](super::ApiClient).
///
/// Every hook is optional. A set is replaced as a whole through
/// [`ApiClient::configure`](super::ApiClient::configure).
#[derive(Clone, Default)]
pub struct ApiClientHooks {
    pub(crate) access_token: Option<Arc<dyn AccessTokenProvider>>,
    pub(crate) refresh: Option<Arc<dyn TokenRefresher>>,
    pub(crate) on_unauthorized: Option<Arc<dyn UnauthorizedHandler>>,
}

impl ApiClientHooks {
    /// Empty hook set: no token, no refresh, no unauthorized handler
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_access_token(mut self, provider: impl AccessTokenProvider + 'static) -> Self {
        self.access_token = Some(Arc::new(provider));
        self
    }

    #[must_use]
    pub fn with_refresh(mut self, refresher: impl TokenRefresher + 'static) -> Self {
        self.refresh = Some(Arc::new(refresher));
        self
    }

    #[must_use]
    pub fn with_unauthorized(mut self, handler: impl UnauthorizedHandler + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(handler));
        self
    }

    /// Token to attach right now. Empty strings count as no token.
    pub fn current_token(&self) -> Option<String> {
        self.access_token
            .as_ref()
            .and_then(|provider| provider.access_token())
            .filter(|token| !token.is_empty())
    }

    pub fn has_refresh(&self) -> bool {
        self.refresh.is_some()
    }
}

impl fmt::Debug for ApiClientHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClientHooks")
            .field("access_token", &self.access_token.is_some())
            .field("refresh", &self.refresh.is_some())
            .field("on_unauthorized", &self.on_unauthorized.is_some())
            .finish()
    }
}
