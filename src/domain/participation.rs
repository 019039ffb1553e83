//! Participation window evaluation.
//!
//! Derives whether an account is currently voting and how long its
//! participation keys have left, from the account snapshot and the node's
//! current round.

use serde::Serialize;
use utoipa::ToSchema;

use super::{AccountInfo, MicroAlgos};

/// Label used when no validity window is registered.
pub const NO_KEYS_LABEL: &str = "No participation keys found";

/// Participation status of an account at a given round.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ParticipationStatus {
    /// Account status is `Online`.
    pub online: bool,
    /// Round the status was evaluated at.
    pub current_round: u64,
    /// A participation record is registered.
    pub keys_present: bool,
    /// First valid voting round.
    pub vote_first_valid: Option<u64>,
    /// Last valid voting round.
    pub vote_last_valid: Option<u64>,
    /// Voting key dilution.
    pub vote_key_dilution: Option<u64>,
    /// Keys present, online, and the round falls inside the window.
    pub active: bool,
    /// Rounds until the voting key expires.
    pub blocks_remaining: u64,
    /// Estimated seconds until the voting key expires.
    pub time_remaining_secs: u64,
    /// Human-readable remaining time.
    pub time_remaining: String,
    /// Rewards not yet folded into the balance.
    #[schema(value_type = u64)]
    pub pending_rewards: MicroAlgos,
    /// Reward base.
    pub reward_base: u64,
    /// Rewards accrued by the account.
    #[schema(value_type = u64)]
    pub total_rewards: MicroAlgos,
    /// Current balance.
    #[schema(value_type = u64)]
    pub amount: MicroAlgos,
    /// Minimum balance.
    #[schema(value_type = u64)]
    pub min_balance: MicroAlgos,
}

impl ParticipationStatus {
    /// Evaluates `account` at `current_round`.
    ///
    /// The account is active iff keys are present, the account is online and
    /// `first_valid <= current_round <= last_valid`. Remaining time is
    /// `blocks_remaining * seconds_per_block`, truncated to whole seconds.
    #[must_use]
    pub fn evaluate(account: &AccountInfo, current_round: u64, seconds_per_block: f64) -> Self {
        let online = account.is_online();
        let keys_present = account.has_participation_keys();
        let participation = account.participation.clone().unwrap_or_default();

        let (active, blocks_remaining, time_remaining_secs, time_remaining) =
            match participation.window() {
                Some((first, last)) => {
                    let in_window = first <= current_round && current_round <= last;
                    let blocks = last.saturating_sub(current_round);
                    let secs = blocks_to_seconds(blocks, seconds_per_block);
                    (
                        keys_present && online && in_window,
                        blocks,
                        secs,
                        format_duration(secs),
                    )
                }
                None => (false, 0, 0, NO_KEYS_LABEL.to_string()),
            };

        Self {
            online,
            current_round,
            keys_present,
            vote_first_valid: participation.vote_first_valid,
            vote_last_valid: participation.vote_last_valid,
            vote_key_dilution: participation.vote_key_dilution,
            active,
            blocks_remaining,
            time_remaining_secs,
            time_remaining,
            pending_rewards: account.pending_rewards,
            reward_base: account.reward_base,
            total_rewards: account.rewards,
            amount: account.amount,
            min_balance: account.min_balance,
        }
    }
}

fn blocks_to_seconds(blocks: u64, seconds_per_block: f64) -> u64 {
    if !seconds_per_block.is_finite() || seconds_per_block <= 0.0 {
        return 0;
    }
    (blocks as f64 * seconds_per_block).floor() as u64
}

/// Formats a duration as `H:MM:SS`, prefixed with `N day(s), ` when it spans
/// at least one day.
#[must_use]
pub fn format_duration(total_secs: u64) -> String {
    let days = total_secs / 86_400;
    let rem = total_secs % 86_400;
    let (h, m, s) = (rem / 3_600, (rem % 3_600) / 60, rem % 60);
    match days {
        0 => format!("{h}:{m:02}:{s:02}"),
        1 => format!("1 day, {h}:{m:02}:{s:02}"),
        n => format!("{n} days, {h}:{m:02}:{s:02}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountStatus, Participation};

    fn account(status: AccountStatus, window: Option<(u64, u64)>) -> AccountInfo {
        AccountInfo {
            status,
            participation: window.map(|(first, last)| Participation {
                vote_first_valid: Some(first),
                vote_last_valid: Some(last),
                vote_key_dilution: Some(1_733),
                ..Participation::default()
            }),
            ..AccountInfo::default()
        }
    }

    #[test]
    fn active_inside_window() {
        let status =
            ParticipationStatus::evaluate(&account(AccountStatus::Online, Some((100, 200))), 150, 4.5);
        assert!(status.active);
        assert_eq!(status.blocks_remaining, 50);
        assert_eq!(status.time_remaining_secs, 225);
        assert_eq!(status.time_remaining, "0:03:45");
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let acct = account(AccountStatus::Online, Some((100, 200)));
        assert!(ParticipationStatus::evaluate(&acct, 100, 4.5).active);
        let at_last = ParticipationStatus::evaluate(&acct, 200, 4.5);
        assert!(at_last.active);
        assert_eq!(at_last.blocks_remaining, 0);
    }

    #[test]
    fn outside_window_is_inactive() {
        let acct = account(AccountStatus::Online, Some((100, 200)));
        let before = ParticipationStatus::evaluate(&acct, 99, 4.5);
        assert!(!before.active);
        assert_eq!(before.blocks_remaining, 101);

        let expired = ParticipationStatus::evaluate(&acct, 250, 4.5);
        assert!(!expired.active);
        assert_eq!(expired.blocks_remaining, 0);
    }

    #[test]
    fn offline_account_is_inactive() {
        let status =
            ParticipationStatus::evaluate(&account(AccountStatus::Offline, Some((100, 200))), 150, 4.5);
        assert!(!status.active);
        assert!(status.keys_present);
        assert_eq!(status.blocks_remaining, 50);
    }

    #[test]
    fn missing_keys_report_label() {
        let status = ParticipationStatus::evaluate(&account(AccountStatus::Online, None), 150, 4.5);
        assert!(!status.active);
        assert!(!status.keys_present);
        assert_eq!(status.blocks_remaining, 0);
        assert_eq!(status.time_remaining, NO_KEYS_LABEL);
    }

    #[test]
    fn odd_block_counts_truncate_half_seconds() {
        let status =
            ParticipationStatus::evaluate(&account(AccountStatus::Online, Some((1, 4))), 1, 4.5);
        assert_eq!(status.blocks_remaining, 3);
        assert_eq!(status.time_remaining_secs, 13);
    }

    #[test]
    fn formats_multi_day_durations() {
        assert_eq!(format_duration(0), "0:00:00");
        assert_eq!(format_duration(86_400 + 3_661), "1 day, 1:01:01");
        assert_eq!(format_duration(3 * 86_400 + 59), "3 days, 0:00:59");
    }
}
