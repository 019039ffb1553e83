//! Local history samples and the append rule.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{AccountInfo, AccountStatus, MicroAlgos};

/// One point in the local JSON history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HistorySample {
    /// When the sample was taken.
    pub timestamp: DateTime<Utc>,
    /// Rewards reported by the node, µALGO.
    #[schema(value_type = u64)]
    pub rewards: MicroAlgos,
    /// Pending rewards reported by the node, µALGO.
    #[schema(value_type = u64)]
    pub pending_rewards: MicroAlgos,
    /// Account balance in ALGO.
    pub total_balance: f64,
    /// Cumulative proposer payouts in ALGO.
    #[serde(default)]
    pub cumulative_rewards: f64,
    /// Account status at sample time.
    pub status: AccountStatus,
    /// Reward base.
    pub rewards_base: u64,
}

impl HistorySample {
    /// Builds a sample from an account snapshot and the payout total.
    #[must_use]
    pub fn from_account(
        account: &AccountInfo,
        cumulative_rewards: MicroAlgos,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            rewards: account.rewards,
            pending_rewards: account.pending_rewards,
            total_balance: account.amount.as_algo(),
            cumulative_rewards: cumulative_rewards.as_algo(),
            status: account.status,
            rewards_base: account.reward_base,
        }
    }
}

/// Returns `true` if a sample taken at `now` should be appended after
/// `last`: either there is no previous sample or strictly more than
/// `min_interval` has elapsed.
#[must_use]
pub fn should_append(last: Option<&HistorySample>, now: DateTime<Utc>, min_interval: Duration) -> bool {
    let Some(last) = last else {
        return true;
    };
    let min = chrono::Duration::from_std(min_interval).unwrap_or(chrono::Duration::MAX);
    now.signed_duration_since(last.timestamp) > min
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample_at(ts: DateTime<Utc>) -> HistorySample {
        HistorySample::from_account(&AccountInfo::default(), MicroAlgos::ZERO, ts)
    }

    #[test]
    fn first_sample_always_appends() {
        assert!(should_append(None, Utc::now(), Duration::from_secs(3_600)));
    }

    #[test]
    fn append_requires_strictly_more_than_interval() {
        let t0 = Utc.with_ymd_and_hms(2025, 2, 15, 0, 0, 0).single().unwrap_or_default();
        let last = sample_at(t0);
        let hour = Duration::from_secs(3_600);

        assert!(!should_append(Some(&last), t0 + chrono::Duration::minutes(30), hour));
        assert!(!should_append(Some(&last), t0 + chrono::Duration::hours(1), hour));
        assert!(should_append(
            Some(&last),
            t0 + chrono::Duration::hours(1) + chrono::Duration::seconds(1),
            hour
        ));
    }

    #[test]
    fn sample_converts_balance_to_algo() {
        let account = AccountInfo {
            amount: MicroAlgos::new(2_500_000),
            rewards: MicroAlgos::new(42),
            ..AccountInfo::default()
        };
        let sample = HistorySample::from_account(&account, MicroAlgos::new(1_000_000), Utc::now());
        assert!((sample.total_balance - 2.5).abs() < f64::EPSILON);
        assert!((sample.cumulative_rewards - 1.0).abs() < f64::EPSILON);
        assert_eq!(sample.rewards.get(), 42);
    }
}
