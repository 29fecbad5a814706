//! Translation of raw transport outcomes into success values or
//! [`ClientError`]s.
//!
//! This is the only place that interprets response bodies. The rules are
//! evaluated in order and the first match wins:
//!
//! 1. no response at all -> [`ClientError::Connection`]
//! 2. status other than 200:
//!    404 -> [`ClientError::NotFound`], missing/zero status ->
//!    [`ClientError::Connection`], anything else -> [`parse_error_body`]
//! 3. 200 whose body is `{"error":"read ECONNRESET"}` ->
//!    [`ClientError::ConnectionReset`]
//! 4. 200 whose body has non-null `errors` and `message` ->
//!    [`ClientError::Generic`]
//! 5. otherwise success
//!
//! A 200 with only one of `errors`/`message` is a success.

use serde_json::Value;

use crate::error::{ClientError, ErrorCode};
use crate::rest::types::{ApiResponse, RawResponse, TransportFailure};

/// Body the service returns when one of its upstream connections was reset.
pub const ECONNRESET_SENTINEL: &str = r#"{"error":"read ECONNRESET"}"#;

/// Classify the outcome of a transport call.
pub fn classify(outcome: Result<RawResponse, TransportFailure>) -> Result<ApiResponse, ClientError> {
    let response = match outcome {
        Ok(response) => response,
        Err(failure) => return Err(ClientError::connection(failure.to_string())),
    };

    let status = match response.status {
        Some(status) => status,
        None => return Err(ClientError::connection("no response received")),
    };

    if status != 200 {
        if status == 404 {
            return Err(ClientError::NotFound);
        }
        if status == 0 {
            return Err(ClientError::connection("response carried no status code"));
        }
        return Err(parse_error_body(&response.body));
    }

    let body = decode_body(&response.body);

    if is_econnreset(&response.body, &body) {
        return Err(ClientError::ConnectionReset { context: body });
    }

    if let Some(message) = application_error(&body) {
        return Err(ClientError::Generic { message });
    }

    Ok(ApiResponse {
        body,
        headers: response.headers,
    })
}

/// Turn the body of a non-200 response into an error.
///
/// Bodies with a recognised `code` become [`ClientError::Api`]; everything
/// else becomes [`ClientError::Generic`].
pub fn parse_error_body(body: &str) -> ClientError {
    let parsed: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return ClientError::generic(body),
    };

    let message = parsed.get("message").and_then(non_null).map(value_text);

    match parsed.get("code").and_then(non_null) {
        Some(code) => {
            let code = value_text(code);
            match ErrorCode::from_code(&code) {
                Some(code) => ClientError::Api { code, message },
                None => ClientError::Generic { message: code },
            }
        }
        None => ClientError::Generic {
            message: message.unwrap_or_else(|| value_text(&parsed)),
        },
    }
}

/// Decode a success body. Empty bodies are `null`, non-JSON bodies are kept
/// as a string.
fn decode_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

fn is_econnreset(raw: &str, body: &Value) -> bool {
    match body {
        Value::String(_) => raw == ECONNRESET_SENTINEL,
        _ => body.to_string() == ECONNRESET_SENTINEL,
    }
}

fn application_error(body: &Value) -> Option<String> {
    body.get("errors").and_then(non_null)?;
    body.get("message").and_then(non_null).map(value_text)
}

fn non_null(value: &Value) -> Option<&Value> {
    (!value.is_null()).then_some(value)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
