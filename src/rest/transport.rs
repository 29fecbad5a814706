//! HTTP transport.
//!
//! The [`Transport`] trait is the only seam that performs network I/O. The
//! default [`ReqwestTransport`] sends requests through a reqwest client with
//! tracing middleware. It does not retry.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde_json::Value;
use url::Url;

use crate::error::ClientError;
use crate::rest::endpoints::API_VERSION_PREFIX;
use crate::rest::types::{HttpMethod, RawResponse, RequestDescriptor, TransportFailure};

/// Name of the cache-busting query parameter added to GET requests.
pub const CACHE_BUSTER_PARAM: &str = "r";

/// Sends a fully built request and returns whatever came back.
///
/// Non-2xx statuses are returned as a [`RawResponse`]; only the absence of a
/// response is a [`TransportFailure`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request, giving up after `timeout`.
    async fn send(
        &self,
        request: RequestDescriptor,
        timeout: Duration,
    ) -> Result<RawResponse, TransportFailure>;
}

/// The versioned path for an operation path (e.g. `/version` -> `/v1/version`).
pub fn versioned_path(path: &str) -> String {
    format!("{API_VERSION_PREFIX}{path}")
}

/// Build the absolute URL for a request.
///
/// GET requests get `cache_buster` appended as the `r` query parameter.
pub fn build_url(
    base_url: &str,
    method: HttpMethod,
    path: &str,
    cache_buster: u32,
) -> Result<Url, ClientError> {
    let mut url = Url::parse(&format!(
        "{}{}",
        base_url.trim_end_matches('/'),
        versioned_path(path)
    ))?;
    if method == HttpMethod::Get {
        url.query_pairs_mut()
            .append_pair(CACHE_BUSTER_PARAM, &cache_buster.to_string());
    }
    Ok(url)
}

/// Percent-encode `segment` so it lands in the URL as exactly one path segment.
///
/// `/`, `?`, `#`, `%` and spaces are escaped.
pub fn path_segment(segment: &str) -> Result<String, ClientError> {
    let mut url = Url::parse("http://localhost/")?;
    url.path_segments_mut()
        .map_err(|_| ClientError::Validation("URL cannot hold path segments".to_string()))?
        .clear()
        .push(segment);
    Ok(url.path().trim_start_matches('/').to_string())
}

/// A random five digit number for the cache-busting parameter.
pub fn cache_buster() -> u32 {
    rand::thread_rng().gen_range(10_000..100_000)
}

/// [`Transport`] backed by reqwest.
#[derive(Clone)]
pub struct ReqwestTransport {
    http_client: ClientWithMiddleware,
    base_url: String,
}

impl ReqwestTransport {
    /// Create a transport for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let reqwest_client = reqwest::Client::builder()
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self::with_client(base_url, reqwest_client)
    }

    /// Create a transport around an existing reqwest client.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let http_client = ClientBuilder::new(client)
            .with(TracingMiddleware::default())
            .build();
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: RequestDescriptor,
        timeout: Duration,
    ) -> Result<RawResponse, TransportFailure> {
        let url = build_url(&self.base_url, request.method, &request.path, cache_buster())
            .map_err(|e| TransportFailure::new(e.to_string()))?;

        let mut builder = self
            .http_client
            .request(request.method.into(), url)
            .headers(request.headers)
            .timeout(timeout);

        if request.method.has_body() {
            let body = Value::Object(request.body.unwrap_or_default()).to_string();
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body);
        }

        let response = builder.send().await.map_err(into_failure)?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(|e| TransportFailure {
            message: e.to_string(),
            timed_out: e.is_timeout(),
        })?;

        Ok(RawResponse {
            status: Some(status),
            body,
            headers,
        })
    }
}

fn into_failure(error: reqwest_middleware::Error) -> TransportFailure {
    let timed_out = matches!(&error, reqwest_middleware::Error::Reqwest(e) if e.is_timeout());
    TransportFailure {
        message: error.to_string(),
        timed_out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_url_has_cache_buster() {
        let url = build_url("http://localhost:3232/api", HttpMethod::Get, "/balances/abc", 12345)
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3232/api/v1/balances/abc?r=12345");
    }

    #[test]
    fn test_post_url_has_no_query() {
        for method in [HttpMethod::Post, HttpMethod::Put, HttpMethod::Delete] {
            let url = build_url("http://localhost:3232/api/", method, "/transactions", 12345)
                .unwrap();
            assert_eq!(url.as_str(), "http://localhost:3232/api/v1/transactions");
            assert!(url.query().is_none());
        }
    }

    #[test]
    fn test_cache_buster_is_five_digits() {
        for _ in 0..1000 {
            let value = cache_buster();
            assert_eq!(value.to_string().len(), 5);
        }
    }

    #[test]
    fn test_path_segment_escapes_reserved_characters() {
        assert_eq!(path_segment("1Abc").unwrap(), "1Abc");
        assert_eq!(path_segment("a/b?c#d").unwrap(), "a%2Fb%3Fc%23d");
        assert_eq!(path_segment("a b%").unwrap(), "a%20b%25");

        let encoded = path_segment("a/b?c").unwrap();
        let url = build_url(
            "http://localhost:3232/api",
            HttpMethod::Get,
            &format!("/balances/{encoded}"),
            12345,
        )
        .unwrap();
        assert_eq!(url.path(), "/api/v1/balances/a%2Fb%3Fc");
        assert_eq!(url.query(), Some("r=12345"));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = build_url("not a url", HttpMethod::Get, "/version", 10000);
        assert!(matches!(result, Err(ClientError::Url(_))));
    }
}
