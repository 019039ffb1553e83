//! algod REST client: account snapshot and node status.

use crate::domain::{AccountInfo, NodeStatus};
use crate::error::TrackerError;

use super::join_url;

/// Header carrying the algod API token.
pub const API_TOKEN_HEADER: &str = "X-Algo-API-Token";

/// Client for the algod node REST API.
#[derive(Debug, Clone)]
pub struct AlgodClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl AlgodClient {
    /// Creates a client against `base_url`, sending `token` when set.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            token,
        }
    }

    /// `GET /v2/accounts/{address}`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NodeRequest`] on transport failure or a
    /// non-2xx status, and [`TrackerError::Decode`] on a malformed body.
    pub async fn account(&self, address: &str) -> Result<AccountInfo, TrackerError> {
        let url = join_url(&self.base_url, &format!("v2/accounts/{address}"));
        tracing::debug!(%url, "fetching account info");
        let account: AccountInfo = self
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(account)
    }

    /// `GET /v2/status`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NodeRequest`] on transport failure or a
    /// non-2xx status, and [`TrackerError::Decode`] on a malformed body.
    pub async fn status(&self) -> Result<NodeStatus, TrackerError> {
        let url = join_url(&self.base_url, "v2/status");
        tracing::debug!(%url, "fetching node status");
        let status: NodeStatus = self
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(status)
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.http.get(url);
        match &self.token {
            Some(token) => request.header(API_TOKEN_HEADER, token),
            None => request,
        }
    }
}
