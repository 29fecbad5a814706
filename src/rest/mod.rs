//! Counterparty REST API client.
//!
//! The request pipeline has four stages:
//! - [`compute_headers`](crate::auth::compute_headers) identifies and signs the request
//! - a [`Transport`] sends it
//! - [`classify`] turns the outcome into a success value or a [`ClientError`](crate::ClientError)
//! - [`ApiClient`] wires them together and exposes one method per endpoint
//!
//! # Trait-based API
//!
//! The [`AssetApi`] trait abstracts the endpoint methods so callers can swap
//! in mock implementations.

mod classify;
mod client;
mod endpoints;
mod operations;
mod traits;
mod transport;
mod types;

pub use classify::{ECONNRESET_SENTINEL, classify, parse_error_body};
pub use client::{ApiClient, ApiClientBuilder, ClientConfig};
pub use endpoints::*;
pub use traits::AssetApi;
pub use transport::{
    CACHE_BUSTER_PARAM, ReqwestTransport, Transport, build_url, cache_buster, versioned_path,
};
pub use types::{ApiResponse, HttpMethod, RawResponse, RequestDescriptor, TransportFailure};
