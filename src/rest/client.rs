//! Counterparty REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use url::Url;

use crate::auth::{CredentialsProvider, SIGNING_KEY_FIELD, compute_headers};
use crate::error::ClientError;
use crate::rest::classify::classify;
use crate::rest::endpoints::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
use crate::rest::transport::{ReqwestTransport, Transport, versioned_path};
use crate::rest::types::{
    ApiResponse, HttpMethod, RawResponse, RequestDescriptor, TransportFailure,
};

/// Settings read once when a client is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the service, without the version prefix.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Log requests and outcomes at `info` instead of `debug`.
    pub verbose: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            verbose: false,
        }
    }
}

/// The Counterparty REST API client.
///
/// Every operation builds a request, signs it when credentials are attached,
/// sends it through the configured [`Transport`] and classifies the outcome.
/// The client holds no mutable state, so clones can issue requests
/// concurrently.
///
/// # Example
///
/// ```rust,no_run
/// use counterparty_api_client::rest::ApiClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ApiClient::new();
///     let version = client.get_version().await?;
///     println!("Service version: {}", version.body);
///     Ok(())
/// }
/// ```
///
/// For signed requests, provide credentials:
///
/// ```rust,no_run
/// use counterparty_api_client::auth::StaticCredentials;
/// use counterparty_api_client::rest::ApiClient;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("copayer-id", "c2lnbmluZ19rZXk="));
///     let client = ApiClient::builder()
///         .base_url("https://example.com/counterparty/api")
///         .credentials(credentials)
///         .build();
///
///     let balances = client.get_balances("1BoatSLRHtKNngkdXEeobR76b53LETtpyT").await?;
///     println!("Balances: {}", balances.body);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    config: Arc<ClientConfig>,
    credentials: Option<Arc<dyn CredentialsProvider>>,
}

impl ApiClient {
    /// Create a new client with default settings and no credentials.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether requests carry identity headers.
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Make a GET request.
    pub async fn get(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.request(HttpMethod::Get, path, None).await
    }

    /// Make a POST request with a JSON body.
    pub async fn post(&self, path: &str, body: Map<String, Value>) -> Result<ApiResponse, ClientError> {
        self.request(HttpMethod::Post, path, Some(body)).await
    }

    /// Make a PUT request with a JSON body.
    pub async fn put(&self, path: &str, body: Map<String, Value>) -> Result<ApiResponse, ClientError> {
        self.request(HttpMethod::Put, path, Some(body)).await
    }

    /// Make a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.request(HttpMethod::Delete, path, None).await
    }

    /// Send a request and classify the result.
    ///
    /// `path` is the operation path without the version prefix. A body passed
    /// with GET or DELETE is only consulted for the per-call signing key
    /// field; it is never sent.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Map<String, Value>>,
    ) -> Result<ApiResponse, ClientError> {
        let mut body = if method.has_body() {
            body
        } else {
            body.and_then(|map| map.get(SIGNING_KEY_FIELD).cloned())
                .map(|key| Map::from_iter([(SIGNING_KEY_FIELD.to_string(), key)]))
        };

        let credentials = self.credentials.as_ref().map(|c| c.get_credentials());
        let headers = compute_headers(method, &versioned_path(path), &mut body, credentials)?;

        let descriptor = RequestDescriptor {
            method,
            path: path.to_string(),
            body: if method.has_body() { body } else { None },
            headers,
        };

        self.log_request(method, path);
        let outcome = self.send(descriptor).await;
        let classified = classify(outcome);
        self.log_outcome(method, path, &classified);
        classified
    }

    async fn send(&self, descriptor: RequestDescriptor) -> Result<RawResponse, TransportFailure> {
        let timeout = self.config.timeout;
        match tokio::time::timeout(timeout, self.transport.send(descriptor, timeout)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(TransportFailure::timeout(format!(
                "no response within {}ms",
                timeout.as_millis()
            ))),
        }
    }

    fn log_request(&self, method: HttpMethod, path: &str) {
        if self.config.verbose {
            tracing::info!(%method, path, "sending request");
        } else {
            tracing::debug!(%method, path, "sending request");
        }
    }

    fn log_outcome(&self, method: HttpMethod, path: &str, outcome: &Result<ApiResponse, ClientError>) {
        match outcome {
            Ok(_) if self.config.verbose => tracing::info!(%method, path, "request succeeded"),
            Ok(_) => tracing::debug!(%method, path, "request succeeded"),
            Err(e) if e.is_connection_error() => {
                tracing::warn!(%method, path, error = %e, "request failed")
            }
            Err(e) if self.config.verbose => tracing::info!(%method, path, error = %e, "request failed"),
            Err(e) => tracing::debug!(%method, path, error = %e, "request failed"),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder {
    config: ClientConfig,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    transport: Option<Arc<dyn Transport>>,
}

impl ApiClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            credentials: None,
            transport: None,
        }
    }

    /// Start from an existing configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout in milliseconds.
    pub fn timeout_ms(mut self, millis: u64) -> Self {
        self.config.timeout = Duration::from_millis(millis);
        self
    }

    /// Log requests at `info` instead of `debug`.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Set the credentials provider for signed requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Use a custom transport instead of the reqwest one.
    ///
    /// A custom transport is responsible for resolving the base URL itself.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client, rejecting a base URL that does not parse.
    ///
    /// The check is skipped when a custom transport is set.
    pub fn try_build(self) -> Result<ApiClient, ClientError> {
        if self.transport.is_none() {
            Url::parse(&self.config.base_url)?;
        }
        Ok(self.build())
    }

    /// Build the client.
    ///
    /// A malformed base URL is only reported when a request is sent, as a
    /// connection error. Use [`try_build`](Self::try_build) to catch it here.
    pub fn build(self) -> ApiClient {
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(ReqwestTransport::new(self.config.base_url.clone())));

        ApiClient {
            transport,
            config: Arc::new(self.config),
            credentials: self.credentials,
        }
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{IDENTITY_HEADER, SIGNATURE_HEADER, StaticCredentials, sign_request};
    use async_trait::async_trait;
    use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
    use serde_json::json;
    use std::sync::Mutex;

    /// Records requests and answers with a fixed outcome.
    struct FixedTransport {
        outcome: Result<RawResponse, TransportFailure>,
        requests: Mutex<Vec<RequestDescriptor>>,
    }

    impl FixedTransport {
        fn new(outcome: Result<RawResponse, TransportFailure>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Transport for FixedTransport {
        async fn send(
            &self,
            request: RequestDescriptor,
            _timeout: Duration,
        ) -> Result<RawResponse, TransportFailure> {
            self.requests.lock().unwrap().push(request);
            self.outcome.clone()
        }
    }

    struct StalledTransport;

    #[async_trait]
    impl Transport for StalledTransport {
        async fn send(
            &self,
            _request: RequestDescriptor,
            _timeout: Duration,
        ) -> Result<RawResponse, TransportFailure> {
            std::future::pending().await
        }
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_builder_defaults() {
        let client = ApiClient::new();
        assert_eq!(client.config().base_url, "http://localhost:3232/counterparty/api");
        assert_eq!(client.config().timeout, Duration::from_millis(50_000));
        assert!(!client.config().verbose);
        assert!(!client.has_credentials());
    }

    #[test]
    fn test_builder_overrides() {
        let client = ApiClient::builder()
            .base_url("http://example.com/api")
            .timeout_ms(1500)
            .verbose(true)
            .build();
        assert_eq!(client.config().base_url, "http://example.com/api");
        assert_eq!(client.config().timeout, Duration::from_millis(1500));
        assert!(client.config().verbose);
    }

    #[test]
    fn test_try_build_rejects_malformed_base_url() {
        let error = ApiClient::builder().base_url("not a url").try_build().unwrap_err();
        assert!(matches!(error, ClientError::Url(_)));
        assert_eq!(error.kind(), crate::error::ErrorKind::Local);

        let client = ApiClient::builder()
            .base_url("http://example.com/api")
            .try_build()
            .unwrap();
        assert_eq!(client.config().base_url, "http://example.com/api");

        let transport = FixedTransport::new(Ok(RawResponse::new(200, "{}")));
        assert!(
            ApiClient::builder()
                .base_url("not a url")
                .transport(transport)
                .try_build()
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_request_is_signed_over_versioned_path() {
        let key = BASE64.encode("secret");
        let transport = FixedTransport::new(Ok(RawResponse::new(200, "{}")));
        let client = ApiClient::builder()
            .credentials(Arc::new(StaticCredentials::new("copayer-1", key.clone())))
            .transport(transport.clone())
            .build();

        client
            .post("/assets/info", object(json!({ "assets": ["XCP"] })))
            .await
            .unwrap();

        let requests = transport.requests.lock().unwrap();
        let request = &requests[0];
        assert_eq!(request.path, "/assets/info");
        assert_eq!(request.headers[IDENTITY_HEADER], "copayer-1");
        let expected =
            sign_request(HttpMethod::Post, "/v1/assets/info", request.body.as_ref(), &key).unwrap();
        assert_eq!(request.headers[SIGNATURE_HEADER], expected.as_str());
    }

    #[tokio::test]
    async fn test_get_body_is_not_sent_but_override_key_is_honoured() {
        let key = BASE64.encode("per-call");
        let transport = FixedTransport::new(Ok(RawResponse::new(200, "{}")));
        let client = ApiClient::builder()
            .credentials(Arc::new(StaticCredentials::from_credentials(
                crate::auth::Credentials::identity_only("copayer-1"),
            )))
            .transport(transport.clone())
            .build();

        let body = object(json!({ "ignored": true, SIGNING_KEY_FIELD: key.clone() }));
        client.request(HttpMethod::Get, "/version", Some(body)).await.unwrap();

        let requests = transport.requests.lock().unwrap();
        assert!(requests[0].body.is_none());
        let expected = sign_request(HttpMethod::Get, "/v1/version", None, &key).unwrap();
        assert_eq!(requests[0].headers[SIGNATURE_HEADER], expected.as_str());
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_connection_error() {
        let transport = FixedTransport::new(Err(TransportFailure::new("connection refused")));
        let client = ApiClient::builder().transport(transport).build();

        let error = client.get_version().await.unwrap_err();
        assert!(matches!(error, ClientError::Connection { .. }));
    }

    #[tokio::test]
    async fn test_timeout_applies_to_custom_transport() {
        let client = ApiClient::builder()
            .timeout_ms(20)
            .transport(Arc::new(StalledTransport))
            .build();

        let error = client.get_version().await.unwrap_err();
        assert!(matches!(error, ClientError::Connection { .. }));
        assert!(error.to_string().contains("timed out"));
    }
}
