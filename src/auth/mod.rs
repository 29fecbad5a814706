//! Authentication for the Counterparty API.
//!
//! This module provides:
//! - Credential management with secure key storage
//! - HMAC-SHA512 signature generation over (method, path, body)
//! - Header construction for authenticated and anonymous requests

mod credentials;
mod headers;
mod signature;

pub use credentials::{Credentials, CredentialsProvider, EnvCredentials, StaticCredentials};
pub use headers::{
    CLIENT_VERSION_HEADER, IDENTITY_HEADER, SIGNATURE_HEADER, SIGNING_KEY_FIELD, client_version,
    compute_headers,
};
pub use signature::{canonical_message, sign_request};
