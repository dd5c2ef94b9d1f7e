#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use tokio::sync::Barrier;
use vocawik_domain::TransportError;
use vocawik_infra::{TokenStore, Transport, TransportRequest, TransportResponse};

/// In-memory token slot standing in for the shell's store.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Arc<Self> {
        let store = Self::default();
        store.set_access_token(Some(token.to_string()));
        Arc::new(store)
    }
}

impl TokenStore for MemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        self.token.lock().clone()
    }

    fn set_access_token(&self, token: Option<String>) {
        *self.token.lock() = token;
    }
}

type Handler =
    dyn Fn(&TransportRequest) -> Result<TransportResponse, TransportError> + Send + Sync;

/// Transport answering from a closure and recording every request.
///
/// With a gate, the first `n` requests are held until all `n` have arrived so
/// that their responses are delivered together.
pub struct ScriptedTransport {
    handler: Box<Handler>,
    gate: Option<(usize, Arc<Barrier>)>,
    arrivals: AtomicUsize,
    requests: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&TransportRequest) -> Result<TransportResponse, TransportError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            handler: Box::new(handler),
            gate: None,
            arrivals: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn gated(mut self, first: usize) -> Self {
        self.gate = Some((first, Arc::new(Barrier::new(first))));
        self
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().clone()
    }

    /// Bearer values seen so far, `None` for unauthenticated requests.
    pub fn authorizations(&self) -> Vec<Option<String>> {
        self.requests
            .lock()
            .iter()
            .map(|request| bearer_of(request).map(str::to_string))
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        let arrival = self.arrivals.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        if let Some((first, barrier)) = &self.gate {
            if arrival < *first {
                barrier.wait().await;
            }
        }

        (self.handler)(&request)
    }
}

pub fn bearer_of(request: &TransportRequest) -> Option<&str> {
    request.headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok())
}

pub fn json_response(status: u16, body: serde_json::Value) -> TransportResponse {
    TransportResponse::new(
        StatusCode::from_u16(status).expect("valid status"),
        serde_json::to_vec(&body).expect("serializable body"),
    )
}

pub fn empty_response(status: u16) -> TransportResponse {
    TransportResponse::new(StatusCode::from_u16(status).expect("valid status"), Vec::new())
}
