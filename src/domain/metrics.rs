//! Reward aggregation.
//!
//! Pure functions over lists of payouts: cumulative totals, per-day rates
//! since the node started, and the summary figures shown on the dashboard.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{MicroAlgos, RewardTransaction};

/// Days used to project a monthly figure from a daily average.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Running totals of `amounts`, in input order.
#[must_use]
pub fn cumulative(amounts: &[MicroAlgos]) -> Vec<MicroAlgos> {
    amounts
        .iter()
        .scan(MicroAlgos::ZERO, |acc, amount| {
            *acc = acc.saturating_add(*amount);
            Some(*acc)
        })
        .collect()
}

/// Sum of all payout amounts.
#[must_use]
pub fn total(rewards: &[RewardTransaction]) -> MicroAlgos {
    rewards.iter().map(|r| r.amount).sum()
}

/// One payout with the running total up to and including it.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CumulativePoint {
    /// Transaction id.
    pub tx_id: String,
    /// Confirmation round.
    pub round: u64,
    /// Block time.
    pub timestamp: DateTime<Utc>,
    /// Payout in ALGO.
    pub amount: f64,
    /// Running total in ALGO.
    pub cumulative: f64,
}

/// Sorts `rewards` by timestamp and attaches running totals.
#[must_use]
pub fn cumulative_points(rewards: &[RewardTransaction]) -> Vec<CumulativePoint> {
    let mut sorted: Vec<&RewardTransaction> = rewards.iter().collect();
    sorted.sort_by_key(|r| r.timestamp);
    let amounts: Vec<MicroAlgos> = sorted.iter().map(|r| r.amount).collect();
    sorted
        .into_iter()
        .zip(cumulative(&amounts))
        .map(|(reward, running)| CumulativePoint {
            tx_id: reward.tx_id.clone(),
            round: reward.round,
            timestamp: reward.timestamp,
            amount: reward.amount.as_algo(),
            cumulative: running.as_algo(),
        })
        .collect()
}

/// Reward rate since the node started participating.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RewardsMetrics {
    /// Total payouts in ALGO.
    pub total_rewards: f64,
    /// Average per day in ALGO.
    pub rewards_per_day: f64,
    /// Whole days since the start date.
    pub days_running: i64,
    /// `rewards_per_day * 30` when at least one day has passed.
    pub projected_monthly: Option<f64>,
}

impl RewardsMetrics {
    /// Computes the rate of `rewards` between `start_date` and `now`.
    /// The daily rate divides by at least one day.
    #[must_use]
    pub fn since(start_date: NaiveDate, rewards: &[RewardTransaction], now: DateTime<Utc>) -> Self {
        let total_rewards = total(rewards).as_algo();
        let days_running = now.date_naive().signed_duration_since(start_date).num_days();
        let rewards_per_day = total_rewards / days_running.max(1) as f64;
        Self {
            total_rewards,
            rewards_per_day,
            days_running,
            projected_monthly: (days_running > 0).then_some(rewards_per_day * DAYS_PER_MONTH),
        }
    }
}

/// Summary figures shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardMetrics {
    /// Sum of all payouts in ALGO.
    pub total_rewards: f64,
    /// Number of payouts.
    pub reward_count: usize,
    /// Mean payout in ALGO.
    pub average_reward: f64,
    /// Mean of per-calendar-day sums, over days that saw a payout.
    pub average_daily_rewards: f64,
    /// `average_daily_rewards * 30`.
    pub monthly_projection: f64,
    /// Balance before rewards, in ALGO.
    pub original_balance: f64,
    /// Original balance plus all payouts, in ALGO.
    pub current_balance: f64,
    /// Total payouts as a percentage of the original balance.
    pub roi_percent: f64,
    /// Mean gap between consecutive payouts, in hours.
    pub average_hours_between_rewards: Option<f64>,
}

impl DashboardMetrics {
    /// Computes the dashboard summary. `rewards` need not be sorted.
    #[must_use]
    pub fn compute(rewards: &[RewardTransaction], original_balance: MicroAlgos) -> Self {
        let mut sorted: Vec<&RewardTransaction> = rewards.iter().collect();
        sorted.sort_by_key(|r| r.timestamp);

        let total_micro: MicroAlgos = sorted.iter().map(|r| r.amount).sum();
        let total_rewards = total_micro.as_algo();
        let reward_count = sorted.len();
        let average_reward = if reward_count == 0 {
            0.0
        } else {
            total_rewards / reward_count as f64
        };

        let mut daily: BTreeMap<NaiveDate, MicroAlgos> = BTreeMap::new();
        for reward in &sorted {
            let day = daily.entry(reward.timestamp.date_naive()).or_default();
            *day = day.saturating_add(reward.amount);
        }
        let average_daily_rewards = if daily.is_empty() {
            0.0
        } else {
            daily.values().map(|v| v.as_algo()).sum::<f64>() / daily.len() as f64
        };

        let original = original_balance.as_algo();
        let roi_percent = if original > 0.0 {
            total_rewards / original * 100.0
        } else {
            0.0
        };

        let gaps: Vec<f64> = sorted
            .windows(2)
            .filter_map(|pair| match pair {
                [a, b] => Some((b.timestamp - a.timestamp).num_seconds() as f64 / 3_600.0),
                _ => None,
            })
            .collect();
        let average_hours_between_rewards =
            (!gaps.is_empty()).then(|| gaps.iter().sum::<f64>() / gaps.len() as f64);

        Self {
            total_rewards,
            reward_count,
            average_reward,
            average_daily_rewards,
            monthly_projection: average_daily_rewards * DAYS_PER_MONTH,
            original_balance: original,
            current_balance: original_balance.saturating_add(total_micro).as_algo(),
            roi_percent,
            average_hours_between_rewards,
        }
    }
}
