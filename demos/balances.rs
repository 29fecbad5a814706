//! Example: Looking up balances and asset info.
//!
//! Credentials are optional and read from `COUNTERPARTY_IDENTITY_ID` and
//! `COUNTERPARTY_SIGNING_KEY`. Set `RUST_LOG=debug` to see request logs.
//!
//! Run with: cargo run --example balances -- <address>

use std::sync::Arc;

use counterparty_api_client::auth::EnvCredentials;
use counterparty_api_client::rest::ApiClient;
use counterparty_api_client::{ClientError, ErrorKind};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let address = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "1BoatSLRHtKNngkdXEeobR76b53LETtpyT".to_string());

    let mut builder = ApiClient::builder().verbose(true);
    if let Ok(base_url) = std::env::var("COUNTERPARTY_BASE_URL") {
        builder = builder.base_url(base_url);
    }
    if let Some(credentials) = EnvCredentials::try_from_env() {
        builder = builder.credentials(Arc::new(credentials));
    }
    let client = builder.try_build()?;

    println!("=== Version ===");
    let version = client.get_version().await?;
    println!("{}", version.body);

    println!("\n=== Balances for {address} ===");
    match client.get_balances(&address).await {
        Ok(balances) => println!("{}", balances.body),
        Err(ClientError::NotFound) => println!("No balances"),
        Err(e) => return Err(e.into()),
    }

    println!("\n=== Asset Info ===");
    let assets = vec!["XCP".to_string(), "PEPECASH".to_string()];
    match client.get_asset_info(Some(assets.as_slice())).await {
        Ok(info) => println!("{}", info.body),
        Err(e) if e.kind() == ErrorKind::Connection => {
            println!("Service unreachable: {e}");
        }
        Err(e) => println!("Lookup failed: {e}"),
    }

    Ok(())
}
