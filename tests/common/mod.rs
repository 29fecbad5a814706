//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use counterparty_api_client::auth::StaticCredentials;
use counterparty_api_client::rest::{
    ApiClient, RawResponse, RequestDescriptor, Transport, TransportFailure,
};
use wiremock::MockServer;

/// Path the mock service is mounted under, mirroring the default deployment.
pub const API_ROOT: &str = "/counterparty/api";

pub fn signing_key() -> String {
    BASE64.encode("test_signing_key")
}

/// Client for the mock server without credentials.
pub fn build_public_client(server: &MockServer) -> ApiClient {
    ApiClient::builder()
        .base_url(format!("{}{}", server.uri(), API_ROOT))
        .build()
}

/// Client for the mock server with identity and signing key.
pub fn build_signed_client(server: &MockServer) -> ApiClient {
    ApiClient::builder()
        .base_url(format!("{}{}", server.uri(), API_ROOT))
        .credentials(Arc::new(StaticCredentials::new("copayer-1", signing_key())))
        .build()
}

/// Transport that counts calls and always answers 200 with an empty object.
#[derive(Default)]
pub struct CountingTransport {
    calls: AtomicUsize,
}

impl CountingTransport {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for CountingTransport {
    async fn send(
        &self,
        _request: RequestDescriptor,
        _timeout: Duration,
    ) -> Result<RawResponse, TransportFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(RawResponse::new(200, "{}"))
    }
}

/// Client wired to a [`CountingTransport`].
pub fn build_counting_client() -> (ApiClient, Arc<CountingTransport>) {
    let transport = Arc::new(CountingTransport::default());
    let client = ApiClient::builder().transport(transport.clone()).build();
    (client, transport)
}
