//! Asset and balance endpoints.

use serde_json::{Map, Value, json};

use crate::error::ClientError;
use crate::rest::ApiClient;
use crate::rest::endpoints;
use crate::rest::transport::path_segment;
use crate::rest::types::ApiResponse;

impl ApiClient {
    /// Get the service version.
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
    ///     println!("{}", version.body);
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_version(&self) -> Result<ApiResponse, ClientError> {
        self.get(endpoints::VERSION).await
    }

    /// Get the asset balances held by an address.
    ///
    /// The address is percent-encoded as a single path segment.
    pub async fn get_balances(&self, address: &str) -> Result<ApiResponse, ClientError> {
        let address = path_segment(address)?;
        self.get(&format!("{}/{}", endpoints::BALANCES, address))
            .await
    }

    /// Get transactions for an address.
    ///
    /// An empty or missing `txids` list resolves to an empty list without
    /// contacting the service.
    pub async fn get_transactions(
        &self,
        address: &str,
        txids: Option<&[String]>,
    ) -> Result<ApiResponse, ClientError> {
        let txids = match txids {
            Some(txids) if !txids.is_empty() => txids,
            _ => return Ok(ApiResponse::from_body(Value::Array(Vec::new()))),
        };

        self.post(
            endpoints::TRANSACTIONS,
            object(json!({ "address": address, "txids": txids })),
        )
        .await
    }

    /// Get metadata for one or more assets.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] without contacting the service when
    /// `asset_names` is missing or empty.
    pub async fn get_asset_info(
        &self,
        asset_names: Option<&[String]>,
    ) -> Result<ApiResponse, ClientError> {
        let asset_names = match asset_names {
            Some(names) if !names.is_empty() => names,
            _ => return Err(ClientError::Validation("no asset names given".to_string())),
        };

        self.post(endpoints::ASSET_INFO, object(json!({ "assets": asset_names })))
            .await
    }

    /// Upload asset data.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] without contacting the service when
    /// `payload` is missing.
    pub async fn add_asset_data(&self, payload: Option<Value>) -> Result<ApiResponse, ClientError> {
        let payload = payload
            .ok_or_else(|| ClientError::Validation("no asset data given".to_string()))?;

        self.post(endpoints::ASSET_DATA, object(json!({ "data": payload })))
            .await
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
