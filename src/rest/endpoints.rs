//! Counterparty API endpoint constants.

/// Default base URL for the Counterparty API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3232/counterparty/api";

/// Version prefix for every operation path.
pub const API_VERSION_PREFIX: &str = "/v1";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 50_000;

/// Get service version.
pub const VERSION: &str = "/version";
/// Get balances for an address (append `/{address}`).
pub const BALANCES: &str = "/balances";
/// Get transactions for an address.
pub const TRANSACTIONS: &str = "/transactions";
/// Get asset info.
pub const ASSET_INFO: &str = "/assets/info";
/// Upload asset data.
pub const ASSET_DATA: &str = "/assets/data";
