//! Response bodies of the tracker endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{AccountStatus, CumulativePoint, DashboardMetrics, HistorySample};
use crate::persistence::RewardsHistoryRow;

/// `GET /api/v1/metrics` response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MetricsResponse {
    /// Tracked account.
    pub address: String,
    /// Summary figures over all stored payouts.
    pub metrics: DashboardMetrics,
    /// When the figures were computed.
    pub generated_at: DateTime<Utc>,
}

/// `GET /api/v1/rewards` response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RewardsResponse {
    /// Tracked account.
    pub address: String,
    /// Number of stored payouts.
    pub total: usize,
    /// Payouts with running totals, newest first.
    pub data: Vec<CumulativePoint>,
}

/// Where history entries were read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HistorySource {
    /// The `rewards_history` table.
    Store,
    /// The local JSON history file.
    File,
}

/// One history entry, from either source.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HistoryEntryDto {
    /// Sample timestamp.
    pub timestamp: DateTime<Utc>,
    /// Cumulative proposer payouts in ALGO.
    pub cumulative_rewards: f64,
    /// Balance in ALGO.
    pub balance: f64,
    /// Pending rewards in ALGO.
    pub pending_rewards: f64,
    /// Account was online.
    pub online: bool,
    /// Round of the sample. The history file does not record it.
    pub current_round: Option<i64>,
}

impl From<&RewardsHistoryRow> for HistoryEntryDto {
    fn from(row: &RewardsHistoryRow) -> Self {
        Self {
            timestamp: row.timestamp,
            cumulative_rewards: row.cumulative_rewards,
            balance: row.amount,
            pending_rewards: row.pending_rewards,
            online: row.is_online,
            current_round: Some(row.current_round),
        }
    }
}

impl From<&HistorySample> for HistoryEntryDto {
    fn from(sample: &HistorySample) -> Self {
        Self {
            timestamp: sample.timestamp,
            cumulative_rewards: sample.cumulative_rewards,
            balance: sample.total_balance,
            pending_rewards: sample.pending_rewards.as_algo(),
            online: sample.status == AccountStatus::Online,
            current_round: None,
        }
    }
}

/// `GET /api/v1/history` response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HistoryResponse {
    /// Where the entries came from.
    pub source: HistorySource,
    /// Number of entries returned.
    pub count: usize,
    /// Entries, newest first.
    pub data: Vec<HistoryEntryDto>,
}

/// `GET /health` response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"` when the server answers.
    pub status: String,
    /// Server time.
    pub timestamp: String,
    /// Crate version.
    pub version: String,
    /// Tracked account.
    pub address: String,
    /// Store backend name (`postgres` or `memory`).
    pub store: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MicroAlgos;

    #[test]
    fn history_entry_from_file_sample() {
        let sample = HistorySample {
            timestamp: Utc::now(),
            rewards: MicroAlgos::ZERO,
            pending_rewards: MicroAlgos::new(1_500_000),
            total_balance: 10.0,
            cumulative_rewards: 2.0,
            status: AccountStatus::Online,
            rewards_base: 0,
        };
        let entry = HistoryEntryDto::from(&sample);
        assert!(entry.online);
        assert_eq!(entry.current_round, None);
        assert!((entry.pending_rewards - 1.5).abs() < 1e-9);
    }

    #[test]
    fn history_source_serializes_snake_case() {
        let json = serde_json::to_string(&HistorySource::File).unwrap_or_default();
        assert_eq!(json, "\"file\"");
    }
}
