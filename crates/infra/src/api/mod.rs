//! Authenticated API request pipeline
//!
//! Every call to the backend goes through [`ApiClient`], which:
//!
//! - attaches `Authorization: Bearer <token>` from the configured hook
//! - on a 401, joins or starts one shared token refresh per client
//! - retries the failed call exactly once with the refreshed token
//! - notifies the unauthorized hook when authentication definitively fails
//!
//! Failures come back as [`vocawik_domain::ClientError`]; UI-facing code
//! normalizes them with [`vocawik_domain::normalize_api_error`].

pub mod auth;
pub mod client;
pub mod errors;
pub mod request;

pub use auth::{AccessTokenProvider, ApiClientHooks, TokenRefresher, UnauthorizedHandler};
pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig};
pub use errors::{parse_api_error, ApiResult};
pub use request::{FetchOptions, RequestInit};
