//! # Counterparty API Client
//!
//! An async Rust client library for the Counterparty asset metadata and balance API.
//!
//! ## Features
//!
//! - Signed requests (HMAC-SHA512 over method, path and body)
//! - Every response classified into a success value or a typed [`ClientError`]
//! - Pluggable [`Transport`](rest::Transport) for testing
//! - No hidden retries
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use counterparty_api_client::rest::ApiClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::builder()
//!         .base_url("http://localhost:3232/counterparty/api")
//!         .build();
//!     let balances = client.get_balances("1BoatSLRHtKNngkdXEeobR76b53LETtpyT").await?;
//!     println!("Balances: {}", balances.body);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;

// Re-export commonly used types at crate root
pub use error::{ClientError, ErrorCode, ErrorKind};
pub use rest::{ApiClient, ApiResponse, AssetApi};

/// Result type alias using ClientError
pub type Result<T> = std::result::Result<T, ClientError>;
