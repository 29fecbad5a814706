//! Authentication header construction.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};

use crate::auth::{Credentials, sign_request};
use crate::error::ClientError;
use crate::rest::HttpMethod;

/// Header identifying the client library and its version.
pub const CLIENT_VERSION_HEADER: HeaderName = HeaderName::from_static("x-client-version");
/// Header carrying the caller's identity.
pub const IDENTITY_HEADER: HeaderName = HeaderName::from_static("x-identity");
/// Header carrying the request signature.
pub const SIGNATURE_HEADER: HeaderName = HeaderName::from_static("x-signature");

/// Body field holding a per-call signing key.
///
/// The field is transport metadata: it overrides the credential's own key and
/// is removed from the body before signing and sending.
pub const SIGNING_KEY_FIELD: &str = "_signingKey";

/// Value of the [`CLIENT_VERSION_HEADER`].
pub fn client_version() -> String {
    format!("counterparty-api-client-{}", env!("CARGO_PKG_VERSION"))
}

/// Compute the headers for a request.
///
/// Without credentials only the client version header is returned. With
/// credentials the identity header is added, and when a signing key resolves
/// (the body's [`SIGNING_KEY_FIELD`] first, then the credential's own key)
/// the signature header is added too. A missing key is not an error here.
///
/// The [`SIGNING_KEY_FIELD`] is always stripped from `body`.
pub fn compute_headers(
    method: HttpMethod,
    path: &str,
    body: &mut Option<Map<String, Value>>,
    credentials: Option<&Credentials>,
) -> Result<HeaderMap, ClientError> {
    let override_key = body
        .as_mut()
        .and_then(|map| map.remove(SIGNING_KEY_FIELD))
        .and_then(|value| match value {
            Value::String(key) if !key.is_empty() => Some(key),
            _ => None,
        });

    let mut headers = HeaderMap::new();
    headers.insert(CLIENT_VERSION_HEADER, header_value(&client_version())?);

    let Some(credentials) = credentials else {
        return Ok(headers);
    };

    headers.insert(IDENTITY_HEADER, header_value(&credentials.identity_id)?);

    let signing_key = override_key
        .as_deref()
        .or_else(|| credentials.expose_signing_key());
    if let Some(key) = signing_key {
        let signature = sign_request(method, path, body.as_ref(), key)?;
        headers.insert(SIGNATURE_HEADER, header_value(&signature)?);
    }

    Ok(headers)
}

fn header_value(value: &str) -> Result<HeaderValue, ClientError> {
    HeaderValue::from_str(value)
        .map_err(|e| ClientError::Auth(format!("Invalid header value: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
    use serde_json::json;

    fn object(value: Value) -> Option<Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    #[test]
    fn test_headers_without_credentials() {
        let mut body = None;
        let headers = compute_headers(HttpMethod::Get, "/v1/version", &mut body, None).unwrap();

        assert_eq!(headers.len(), 1);
        assert_eq!(headers[CLIENT_VERSION_HEADER], client_version().as_str());
        assert!(client_version().starts_with("counterparty-api-client-"));
    }

    #[test]
    fn test_headers_with_signing_key() {
        let credentials = Credentials::new("copayer-1", BASE64.encode("key"));
        let mut body = object(json!({ "assets": ["XCP"] }));
        let headers =
            compute_headers(HttpMethod::Post, "/v1/assets/info", &mut body, Some(&credentials))
                .unwrap();

        assert_eq!(headers[IDENTITY_HEADER], "copayer-1");
        let expected = sign_request(
            HttpMethod::Post,
            "/v1/assets/info",
            body.as_ref(),
            &BASE64.encode("key"),
        )
        .unwrap();
        assert_eq!(headers[SIGNATURE_HEADER], expected.as_str());
    }

    #[test]
    fn test_missing_key_omits_signature() {
        let credentials = Credentials::identity_only("copayer-1");
        let mut body = None;
        let headers =
            compute_headers(HttpMethod::Get, "/v1/version", &mut body, Some(&credentials)).unwrap();

        assert_eq!(headers[IDENTITY_HEADER], "copayer-1");
        assert!(headers.get(SIGNATURE_HEADER).is_none());
    }

    #[test]
    fn test_override_key_is_used_and_stripped() {
        let credentials = Credentials::new("copayer-1", BASE64.encode("attached"));
        let override_key = BASE64.encode("override");
        let mut body = object(json!({ "data": "x", SIGNING_KEY_FIELD: override_key }));

        let headers =
            compute_headers(HttpMethod::Post, "/v1/assets/data", &mut body, Some(&credentials))
                .unwrap();

        let stripped = object(json!({ "data": "x" }));
        assert_eq!(body, stripped);
        let expected =
            sign_request(HttpMethod::Post, "/v1/assets/data", stripped.as_ref(), &override_key)
                .unwrap();
        assert_eq!(headers[SIGNATURE_HEADER], expected.as_str());
    }

    #[test]
    fn test_override_key_stripped_without_credentials() {
        let mut body = object(json!({ "data": "x", SIGNING_KEY_FIELD: "a2V5" }));
        let headers = compute_headers(HttpMethod::Put, "/v1/assets/data", &mut body, None).unwrap();

        assert!(headers.get(SIGNATURE_HEADER).is_none());
        assert_eq!(body, object(json!({ "data": "x" })));
    }
}
