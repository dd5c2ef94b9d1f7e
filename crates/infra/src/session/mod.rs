//! Session wiring
//!
//! Connects an [`ApiClient`](crate::api::ApiClient) to a token store and the
//! backend refresh endpoint.

mod bootstrap;
mod refresher;
mod store;

pub use bootstrap::{bootstrap_client, configure_session};
pub use refresher::HttpTokenRefresher;
pub use store::TokenStore;
