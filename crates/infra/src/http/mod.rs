//! HTTP transport
//!
//! [`Transport`] is the seam between the request pipeline and the network.
//! [`HttpClient`] implements it with reqwest.

pub mod client;
pub mod transport;

pub use client::{HttpClient, HttpClientBuilder};
pub use transport::{Transport, TransportRequest, TransportResponse};
