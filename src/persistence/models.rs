//! Database rows for the three tracker tables.
//!
//! Amounts are stored in ALGO as `DOUBLE PRECISION`, rounds and reward
//! bases as `BIGINT`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{MicroAlgos, RewardTransaction};

/// A row of the `rewards_history` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RewardsHistoryRow {
    /// Sample timestamp.
    pub timestamp: DateTime<Utc>,
    /// Tracked account.
    pub address: String,
    /// Rewards reported by the node, in ALGO.
    pub rewards: f64,
    /// Reward base.
    pub rewards_base: i64,
    /// Original balance plus payouts, in ALGO.
    pub amount: f64,
    /// Total proposer payouts, in ALGO.
    pub cumulative_rewards: f64,
    /// Account status is `Online`.
    pub is_online: bool,
    /// Node round at sample time.
    pub current_round: i64,
    /// Pending rewards, in ALGO.
    pub pending_rewards: f64,
    /// Participation was active.
    pub participation_active: bool,
}

/// A row of the `node_status` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NodeStatusRow {
    /// Sample timestamp.
    pub timestamp: DateTime<Utc>,
    /// Tracked account.
    pub address: String,
    /// Original balance plus payouts, in ALGO.
    pub current_balance: f64,
    /// Account status is `Online`.
    pub is_online: bool,
    /// Node round at sample time.
    pub current_round: i64,
    /// A participation record is registered.
    pub participation_key_present: bool,
    /// Human-readable time until the voting key expires.
    pub time_remaining: String,
}

/// A row of the `rewards` table, unique on `tx_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RewardRow {
    /// Receiving account.
    pub address: String,
    /// Block time.
    pub timestamp: DateTime<Utc>,
    /// Confirmation round.
    pub round: i64,
    /// Payout in ALGO.
    pub amount: f64,
    /// Transaction id.
    pub tx_id: String,
}

impl RewardRow {
    /// Builds a row for `address` from a payout.
    #[must_use]
    pub fn from_payout(address: &str, payout: &RewardTransaction) -> Self {
        Self {
            address: address.to_string(),
            timestamp: payout.timestamp,
            round: to_db_int(payout.round),
            amount: payout.amount.as_algo(),
            tx_id: payout.tx_id.clone(),
        }
    }

    /// Converts the row back into a payout.
    #[must_use]
    pub fn to_payout(&self) -> RewardTransaction {
        RewardTransaction {
            tx_id: self.tx_id.clone(),
            round: u64::try_from(self.round).unwrap_or_default(),
            timestamp: self.timestamp,
            amount: MicroAlgos::from_algo(self.amount),
        }
    }
}

/// Converts an unsigned counter to Postgres `BIGINT`, saturating.
#[must_use]
pub fn to_db_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payout_row_round_trips_amount() {
        let payout = RewardTransaction {
            tx_id: "ABC".to_string(),
            round: 47_000_123,
            timestamp: Utc::now(),
            amount: MicroAlgos::new(10_123_456),
        };
        let row = RewardRow::from_payout("ADDR", &payout);
        assert_eq!(row.round, 47_000_123);
        assert!((row.amount - 10.123_456).abs() < 1e-9);
        assert_eq!(row.to_payout(), payout);
    }

    #[test]
    fn db_int_saturates() {
        assert_eq!(to_db_int(u64::MAX), i64::MAX);
        assert_eq!(to_db_int(5), 5);
    }
}
