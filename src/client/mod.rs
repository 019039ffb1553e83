//! Outbound HTTP clients for the algod node and the indexer.
//!
//! Both share one [`reqwest::Client`] built with the configured timeout.
//! A non-2xx status is an error; nothing is retried.

pub mod algod;
pub mod indexer;

pub use algod::AlgodClient;
pub use indexer::IndexerClient;

use crate::config::TrackerConfig;
use crate::error::TrackerError;

/// Builds the shared HTTP client.
///
/// # Errors
///
/// Returns [`TrackerError::Internal`] if the TLS backend cannot be initialised.
pub fn build_http_client(config: &TrackerConfig) -> Result<reqwest::Client, TrackerError> {
    reqwest::Client::builder()
        .timeout(config.http_timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| TrackerError::Internal(format!("http client: {e}")))
}

/// Joins a base URL and a path without doubling the slash.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
