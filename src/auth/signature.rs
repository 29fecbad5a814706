//! HMAC-SHA512 request signatures.
//!
//! A signed request carries a signature computed as:
//! ```text
//! HMAC-SHA512(SHA256(method + "|" + path + "|" + JSON(body)), base64_decode(signing_key))
//! ```
//!
//! The method is lowercased and the body is its compact JSON encoding (`{}`
//! when the request has no body). The result is base64-encoded and sent in
//! the `x-signature` header.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256, Sha512};

use crate::error::ClientError;
use crate::rest::HttpMethod;

type HmacSha512 = Hmac<Sha512>;

/// Build the canonical message that is signed for a request.
pub fn canonical_message(method: HttpMethod, path: &str, body: Option<&Map<String, Value>>) -> String {
    // serde_json::Map keeps keys sorted, so the encoding is stable.
    let body = match body {
        Some(map) => Value::Object(map.clone()).to_string(),
        None => "{}".to_string(),
    };
    format!("{}|{}|{}", method.as_str().to_lowercase(), path, body)
}

/// Sign a request.
///
/// # Arguments
///
/// * `method` - The HTTP method of the request
/// * `path` - The versioned request path (e.g., "/v1/balances/abc")
/// * `body` - The request body, after transport-only fields were removed
/// * `signing_key` - Base64-encoded signing key
///
/// # Returns
///
/// Base64-encoded HMAC-SHA512 signature.
///
/// # Example
///
/// ```rust
/// use counterparty_api_client::auth::sign_request;
/// use counterparty_api_client::rest::HttpMethod;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let signature = sign_request(HttpMethod::Get, "/v1/version", None, "c2lnbmluZ19rZXk=")?;
/// assert_eq!(signature.len(), 88);
/// # Ok(())
/// # }
/// ```
pub fn sign_request(
    method: HttpMethod,
    path: &str,
    body: Option<&Map<String, Value>>,
    signing_key: &str,
) -> Result<String, ClientError> {
    let key_decoded = BASE64
        .decode(signing_key)
        .map_err(|_| ClientError::Auth("Signing key must be valid base64.".to_string()))?;

    let message = canonical_message(method, path, body);
    let digest = Sha256::digest(message.as_bytes());

    let mut hmac = HmacSha512::new_from_slice(&key_decoded)
        .map_err(|e| ClientError::Auth(format!("Invalid HMAC key: {e}")))?;
    hmac.update(&digest);
    let hmac_result = hmac.finalize().into_bytes();

    Ok(BASE64.encode(hmac_result))
}
