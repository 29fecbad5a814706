//! Error types for the Counterparty client library.

use thiserror::Error;

/// The main error type for all client operations.
///
/// Every failed operation resolves to exactly one of these variants. Raw
/// transport and HTTP artifacts are translated by
/// [`classify`](crate::rest::classify) and never reach the caller directly.
#[derive(Error, Debug)]
pub enum ClientError {
    /// No HTTP response was obtained (network failure or timeout)
    #[error("Connection error: {message}")]
    Connection {
        /// Description of the underlying transport failure
        message: String,
    },

    /// The service responded with 404
    #[error("Not found")]
    NotFound,

    /// The service relayed a connection reset from one of its upstreams
    #[error("Connection reset by upstream: {context}")]
    ConnectionReset {
        /// The parsed response body that signalled the reset
        context: serde_json::Value,
    },

    /// The service returned an error with a recognised code
    #[error("API error: {code}")]
    Api {
        /// The recognised error code
        code: ErrorCode,
        /// Optional message accompanying the code
        message: Option<String>,
    },

    /// Any other failure reported by the service
    #[error("{message}")]
    Generic {
        /// The error message
        message: String,
    },

    /// Required call arguments were missing or empty; no request was sent
    #[error("Invalid arguments: {0}")]
    Validation(String),

    /// The signing key could not be used
    #[error("Authentication error: {0}")]
    Auth(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    /// Create a generic error from a message.
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Create a connection error from a message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// The taxonomy kind this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Connection { .. } => ErrorKind::Connection,
            Self::NotFound => ErrorKind::NotFound,
            Self::ConnectionReset { .. } => ErrorKind::ConnectionReset,
            Self::Api { .. } => ErrorKind::Coded,
            Self::Generic { .. } => ErrorKind::Generic,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Auth(_) | Self::Json(_) | Self::Url(_) => ErrorKind::Local,
        }
    }

    /// The recognised error code, if this is a coded API error.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Check if the failure happened before any response was received.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::ConnectionReset { .. })
    }
}

/// Coarse classification of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No HTTP response was obtained.
    Connection,
    /// The service responded with 404.
    NotFound,
    /// The service reported `read ECONNRESET`.
    ConnectionReset,
    /// A recognised [`ErrorCode`].
    Coded,
    /// Any other service-reported failure.
    Generic,
    /// Local argument validation failed.
    Validation,
    /// A local failure unrelated to the service (signing key, decoding, URL).
    Local,
}

/// Error codes the service is known to return in the `code` field of an
/// error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotAuthorized,
    InvalidAddress,
    InvalidAssetName,
    AssetNotFound,
    AssetAlreadyExists,
    InsufficientFunds,
    WalletNotFound,
    CopayerNotFound,
    TxNotFound,
    InvalidSignature,
    UpstreamUnavailable,
}

impl ErrorCode {
    /// Every recognised code.
    pub const ALL: [ErrorCode; 11] = [
        ErrorCode::NotAuthorized,
        ErrorCode::InvalidAddress,
        ErrorCode::InvalidAssetName,
        ErrorCode::AssetNotFound,
        ErrorCode::AssetAlreadyExists,
        ErrorCode::InsufficientFunds,
        ErrorCode::WalletNotFound,
        ErrorCode::CopayerNotFound,
        ErrorCode::TxNotFound,
        ErrorCode::InvalidSignature,
        ErrorCode::UpstreamUnavailable,
    ];

    /// Look up a code by its wire representation.
    ///
    /// Returns `None` for codes this version of the client does not know.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = match code {
            "NOT_AUTHORIZED" => Self::NotAuthorized,
            "INVALID_ADDRESS" => Self::InvalidAddress,
            "INVALID_ASSET_NAME" => Self::InvalidAssetName,
            "ASSET_NOT_FOUND" => Self::AssetNotFound,
            "ASSET_ALREADY_EXISTS" => Self::AssetAlreadyExists,
            "INSUFFICIENT_FUNDS" => Self::InsufficientFunds,
            "WALLET_NOT_FOUND" => Self::WalletNotFound,
            "COPAYER_NOT_FOUND" => Self::CopayerNotFound,
            "TX_NOT_FOUND" => Self::TxNotFound,
            "INVALID_SIGNATURE" => Self::InvalidSignature,
            "UPSTREAM_UNAVAILABLE" => Self::UpstreamUnavailable,
            _ => return None,
        };
        Some(code)
    }

    /// The wire representation of this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotAuthorized => "NOT_AUTHORIZED",
            Self::InvalidAddress => "INVALID_ADDRESS",
            Self::InvalidAssetName => "INVALID_ASSET_NAME",
            Self::AssetNotFound => "ASSET_NOT_FOUND",
            Self::AssetAlreadyExists => "ASSET_ALREADY_EXISTS",
            Self::InsufficientFunds => "INSUFFICIENT_FUNDS",
            Self::WalletNotFound => "WALLET_NOT_FOUND",
            Self::CopayerNotFound => "COPAYER_NOT_FOUND",
            Self::TxNotFound => "TX_NOT_FOUND",
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
