//! Indexer REST client: proposer payout search.

use chrono::NaiveDate;

use crate::domain::{RewardTransaction, TransactionsPage};
use crate::error::TrackerError;

use super::join_url;

/// Base64 of the note `ProposerPayout` attached to block proposer rewards.
pub const PROPOSER_PAYOUT_NOTE_PREFIX: &str = "UHJvcG9zZXJQYXlvdXQ=";

/// Upper bound on pages followed in one search.
const MAX_PAGES: usize = 100;

/// Client for the indexer REST API.
#[derive(Debug, Clone)]
pub struct IndexerClient {
    http: reqwest::Client,
    base_url: String,
    page_limit: u32,
    max_pages: usize,
}

impl IndexerClient {
    /// Creates a client against `base_url` requesting `page_limit`
    /// transactions per page.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, page_limit: u32) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            page_limit: page_limit.max(1),
            max_pages: MAX_PAGES,
        }
    }

    /// Caps the number of pages followed in one search (at least one).
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Returns every proposer payout to `address` after `after`, following
    /// `next-token` until the indexer stops returning one or the page cap is
    /// reached. Transactions without a payment body are skipped, and so are
    /// payouts without an id, with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NodeRequest`] on transport failure or a
    /// non-2xx status, and [`TrackerError::Decode`] on a malformed body.
    pub async fn proposer_payouts(
        &self,
        address: &str,
        after: NaiveDate,
    ) -> Result<Vec<RewardTransaction>, TrackerError> {
        let mut payouts = Vec::new();
        let mut next_token: Option<String> = None;

        for page_no in 0..self.max_pages {
            let page = self.page(address, after, next_token.as_deref()).await?;
            let fetched = page.transactions.len();
            for tx in &page.transactions {
                match RewardTransaction::from_indexer(tx) {
                    Some(payout) => payouts.push(payout),
                    None if tx.payment_transaction.is_some() => tracing::warn!(
                        round = tx.confirmed_round,
                        "skipping payout without transaction id"
                    ),
                    None => {}
                }
            }
            tracing::debug!(page = page_no, fetched, total = payouts.len(), "indexer page");

            next_token = match page.next_token {
                Some(token) if fetched > 0 && !token.is_empty() => Some(token),
                _ => None,
            };
            if next_token.is_none() {
                break;
            }
        }

        if next_token.is_some() {
            tracing::warn!(
                max_pages = self.max_pages,
                total = payouts.len(),
                "indexer paging stopped at the page cap, payout list is incomplete"
            );
        }

        payouts.sort_by_key(|p| p.timestamp);
        Ok(payouts)
    }

    async fn page(
        &self,
        address: &str,
        after: NaiveDate,
        next_token: Option<&str>,
    ) -> Result<TransactionsPage, TrackerError> {
        let base = join_url(&self.base_url, &format!("v2/accounts/{address}/transactions"));
        let after_time = after.format("%Y-%m-%d").to_string();
        let limit = self.page_limit.to_string();
        let mut params = vec![
            ("after-time", after_time.as_str()),
            ("limit", limit.as_str()),
            ("note-prefix", PROPOSER_PAYOUT_NOTE_PREFIX),
        ];
        if let Some(token) = next_token {
            params.push(("next", token));
        }
        let url = reqwest::Url::parse_with_params(&base, &params)
            .map_err(|e| TrackerError::InvalidConfig(format!("indexer url: {e}")))?;

        tracing::debug!(%url, "searching indexer transactions");
        let page: TransactionsPage = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(page)
    }
}
