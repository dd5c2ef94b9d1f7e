//! One-step client setup from configuration

use std::sync::Arc;

use tracing::info;
use vocawik_domain::{ApiConfig, Result};

use super::refresher::HttpTokenRefresher;
use super::store::TokenStore;
use crate::api::{ApiClient, ApiClientConfig, ApiClientHooks};
use crate::http::{HttpClient, Transport};

/// Installs the session hooks on `client`.
///
/// - access token: read from `store`
/// - refresh: delegated to `refresher`
/// - unauthorized: clears `store`
pub fn configure_session(
    client: &ApiClient,
    store: Arc<dyn TokenStore>,
    refresher: HttpTokenRefresher,
) {
    let reader = Arc::clone(&store);
    let hooks = ApiClientHooks::new()
        .with_access_token(move || reader.access_token())
        .with_refresh(refresher)
        .with_unauthorized(move || {
            let store = Arc::clone(&store);
            async move {
                info!("session expired; clearing access token");
                store.clear();
            }
        });

    client.configure(hooks);
}

/// Builds a ready-to-use client: cookie-aware HTTP transport, pipeline and
/// session hooks.
///
/// # Errors
///
/// Returns `VocawikError::Config` if the HTTP client cannot be built.
pub fn bootstrap_client(config: &ApiConfig, store: Arc<dyn TokenStore>) -> Result<ApiClient> {
    let mut builder = HttpClient::builder().timeout(config.timeout()).cookie_store(true);
    if let Some(agent) = &config.user_agent {
        builder = builder.user_agent(agent.clone());
    }
    let transport: Arc<dyn Transport> = Arc::new(builder.build()?);

    let client = ApiClient::with_transport(ApiClientConfig::from(config), Arc::clone(&transport));
    let refresher = HttpTokenRefresher::new(transport, config.refresh_url(), Arc::clone(&store));
    configure_session(&client, store, refresher);

    info!(base_url = %config.base_url, "API client ready");
    Ok(client)
}
