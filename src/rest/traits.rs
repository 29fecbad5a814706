//! Trait definition for the Counterparty REST API client.
//!
//! The `AssetApi` trait abstracts the asset and balance operations. This enables:
//! - Mock implementations for testing
//! - Decorators around the client
//!
//! # Example
//!
//! ```rust,ignore
//! use counterparty_api_client::rest::{ApiClient, AssetApi};
//!
//! async fn print_balances<C: AssetApi>(client: &C) -> counterparty_api_client::Result<()> {
//!     let balances = client.get_balances("1BoatSLRHtKNngkdXEeobR76b53LETtpyT").await?;
//!     println!("{}", balances.body);
//!     Ok(())
//! }
//! ```

use std::future::Future;

use serde_json::Value;

use crate::error::ClientError;
use crate::rest::ApiClient;
use crate::rest::types::ApiResponse;

/// Trait defining the asset and balance operations.
///
/// All methods are async and return `Result<ApiResponse, ClientError>`.
pub trait AssetApi: Send + Sync {
    /// Get the service version.
    fn get_version(&self) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;

    /// Get the asset balances held by an address.
    fn get_balances(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;

    /// Get transactions for an address.
    fn get_transactions(
        &self,
        address: &str,
        txids: Option<&[String]>,
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;

    /// Get metadata for one or more assets.
    fn get_asset_info(
        &self,
        asset_names: Option<&[String]>,
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;

    /// Upload asset data.
    fn add_asset_data(
        &self,
        payload: Option<Value>,
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;
}

impl AssetApi for ApiClient {
    async fn get_version(&self) -> Result<ApiResponse, ClientError> {
        ApiClient::get_version(self).await
    }

    async fn get_balances(&self, address: &str) -> Result<ApiResponse, ClientError> {
        ApiClient::get_balances(self, address).await
    }

    async fn get_transactions(
        &self,
        address: &str,
        txids: Option<&[String]>,
    ) -> Result<ApiResponse, ClientError> {
        ApiClient::get_transactions(self, address, txids).await
    }

    async fn get_asset_info(
        &self,
        asset_names: Option<&[String]>,
    ) -> Result<ApiResponse, ClientError> {
        ApiClient::get_asset_info(self, asset_names).await
    }

    async fn add_asset_data(&self, payload: Option<Value>) -> Result<ApiResponse, ClientError> {
        ApiClient::add_asset_data(self, payload).await
    }
}
