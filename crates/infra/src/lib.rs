//! # Vocawik Infrastructure
//!
//! Impure side of the Vocawik API client.
//!
//! This crate contains:
//! - The authenticated request pipeline (`api`)
//! - The reqwest-backed transport (`http`)
//! - Session wiring: refresh endpoint client and bootstrap (`session`)
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Error model and config types come from `vocawik-domain`
//! - Single-flight coordination and tracing init come from `vocawik-common`

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;
pub mod session;

// Re-export commonly used items
pub use api::{
    AccessTokenProvider, ApiClient, ApiClientConfig, ApiClientHooks, FetchOptions, RequestInit,
    TokenRefresher, UnauthorizedHandler,
};
pub use http::{HttpClient, Transport, TransportRequest, TransportResponse};
pub use observability::init_logging;
pub use session::{bootstrap_client, configure_session, HttpTokenRefresher, TokenStore};
