//! Credential management for authenticated requests.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

/// Identity and optional signing key attached to a client.
///
/// The signing key is the base64 encoding of the raw key bytes.
#[derive(Clone)]
pub struct Credentials {
    /// The identity (copayer) reference sent with signed requests
    pub identity_id: String,
    signing_key: Option<SecretString>,
}

impl Credentials {
    /// Create credentials with an identity and a base64-encoded signing key.
    pub fn new(identity_id: impl Into<String>, signing_key: impl Into<String>) -> Self {
        Self {
            identity_id: identity_id.into(),
            signing_key: Some(SecretString::from(signing_key.into())),
        }
    }

    /// Create credentials that identify the caller without signing.
    pub fn identity_only(identity_id: impl Into<String>) -> Self {
        Self {
            identity_id: identity_id.into(),
            signing_key: None,
        }
    }

    /// Get the signing key, if any.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_signing_key(&self) -> Option<&str> {
        self.signing_key.as_ref().map(|key| key.expose_secret())
    }

    /// Whether a signing key is attached.
    pub fn has_signing_key(&self) -> bool {
        self.signing_key.is_some()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let signing_key = if self.signing_key.is_some() {
            "[REDACTED]"
        } else {
            "None"
        };
        f.debug_struct("Credentials")
            .field("identity_id", &self.identity_id)
            .field("signing_key", &signing_key)
            .finish()
    }
}

/// Trait for providing credentials.
///
/// Implement this trait to customize how credentials are retrieved,
/// for example from a secrets manager.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

/// Static credentials provider that holds credentials directly.
#[derive(Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(identity_id: impl Into<String>, signing_key: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(identity_id, signing_key),
        }
    }

    /// Wrap existing credentials.
    pub fn from_credentials(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl CredentialsProvider for Arc<StaticCredentials> {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials provider that reads from environment variables.
///
/// By default, reads `COUNTERPARTY_IDENTITY_ID` and `COUNTERPARTY_SIGNING_KEY`.
/// The signing key variable is optional.
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Try to create credentials from the default environment variables.
    ///
    /// Returns `None` if the identity variable is not set.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_vars("COUNTERPARTY_IDENTITY_ID", "COUNTERPARTY_SIGNING_KEY")
    }

    /// Try to create credentials from custom environment variable names.
    ///
    /// Returns `None` if the identity variable is not set.
    pub fn try_from_env_vars(identity_var: &str, key_var: &str) -> Option<Self> {
        let identity_id = std::env::var(identity_var).ok()?;
        let credentials = match std::env::var(key_var) {
            Ok(key) if !key.is_empty() => Credentials::new(identity_id, key),
            _ => Credentials::identity_only(identity_id),
        };

        Some(Self { credentials })
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}
