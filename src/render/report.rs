//! Plain-text reports for the `report` and `status` commands.

use std::fmt::Write as _;

use crate::domain::{HistorySample, ParticipationStatus};
use crate::service::RewardsReport;

use super::chart::line_chart;
use super::format::{algo, grouped, thousands, yes_no};

const RULE_WIDTH: usize = 50;

/// Renders the rewards report: metrics since the start date, participation
/// and the payout list.
#[must_use]
pub fn rewards_report(report: &RewardsReport) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);
    let metrics = &report.metrics;

    let _ = writeln!(out, "Algorand Rewards Report");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Address: {}", report.address);
    let _ = writeln!(out, "Node Start Date: {}", report.start_date.format("%Y-%m-%d"));
    let _ = writeln!(out, "Days Running: {}", metrics.days_running);

    let _ = writeln!(out, "\nRewards Status:");
    let _ = writeln!(
        out,
        "Total Rewards Since Start: {}",
        algo(metrics.total_rewards)
    );
    let _ = writeln!(out, "Average Daily Rewards: {}", algo(metrics.rewards_per_day));
    if let Some(monthly) = metrics.projected_monthly {
        let _ = writeln!(out, "Projected Monthly Rewards: {}", algo(monthly));
    }
    if let Some(balance) = report.balance {
        let _ = writeln!(out, "Account Balance: {}", algo(balance.as_algo()));
    }

    let _ = writeln!(out, "\nParticipation Status:");
    match &report.participation {
        Some(status) => {
            let _ = writeln!(out, "Online: {}", yes_no(status.online));
            let _ = writeln!(out, "Current Round: {}", thousands(status.current_round));
            let _ = writeln!(
                out,
                "Participation Keys: {}",
                if status.keys_present { "Present" } else { "Not Found" }
            );
            let _ = writeln!(out, "Active: {}", yes_no(status.active));
            let _ = writeln!(out, "Time Remaining: {}", status.time_remaining);
        }
        None => {
            let _ = writeln!(out, "Unavailable (node did not answer)");
        }
    }

    let _ = writeln!(out, "\nProposer Payouts ({}):", report.payouts.len());
    for payout in &report.payouts {
        let _ = writeln!(
            out,
            "  {}  round {:>12}  {:>20}  {}",
            payout.timestamp.format("%Y-%m-%d %H:%M:%S"),
            thousands(payout.round),
            algo(payout.amount.as_algo()),
            payout.tx_id
        );
    }

    let _ = writeln!(out, "\nHistory Samples: {}", report.history.len());
    if let Some(last) = report.history.last() {
        let _ = writeln!(
            out,
            "Last Sample: {} ({})",
            last.timestamp.format("%Y-%m-%d %H:%M:%S"),
            algo(last.cumulative_rewards)
        );
    }
    out
}

/// Renders the detailed participation status for `address`.
#[must_use]
pub fn participation_report(address: &str, status: &ParticipationStatus) -> String {
    let round_or_dash = |round: Option<u64>| round.map_or_else(|| "-".to_string(), thousands);
    let mut out = String::new();

    let _ = writeln!(out, "Algorand Node Participation Status");
    let _ = writeln!(out, "{}", "=".repeat(34));
    let _ = writeln!(out, "Address: {address}");

    let _ = writeln!(out, "\nNode Status:");
    let _ = writeln!(out, "{}", "-".repeat(12));
    let _ = writeln!(out, "Online: {}", yes_no(status.online));
    let _ = writeln!(out, "Current Round: {}", thousands(status.current_round));

    let _ = writeln!(out, "\nParticipation Keys:");
    let _ = writeln!(out, "{}", "-".repeat(19));
    let _ = writeln!(out, "Has Keys: {}", yes_no(status.keys_present));
    let _ = writeln!(out, "Active: {}", yes_no(status.active));
    let _ = writeln!(out, "First Valid Round: {}", round_or_dash(status.vote_first_valid));
    let _ = writeln!(out, "Last Valid Round: {}", round_or_dash(status.vote_last_valid));
    let _ = writeln!(out, "Key Dilution: {}", round_or_dash(status.vote_key_dilution));
    let _ = writeln!(out, "Blocks Remaining: {}", thousands(status.blocks_remaining));
    let _ = writeln!(out, "Time Remaining: {}", status.time_remaining);

    let _ = writeln!(out, "\nRewards Information:");
    let _ = writeln!(out, "{}", "-".repeat(20));
    let _ = writeln!(out, "Total Rewards: {}", algo(status.total_rewards.as_algo()));
    let _ = writeln!(out, "Pending Rewards: {}", algo(status.pending_rewards.as_algo()));
    let _ = writeln!(out, "Reward Base: {}", thousands(status.reward_base));

    let _ = writeln!(out, "\nAccount Information:");
    let _ = writeln!(out, "{}", "-".repeat(20));
    let _ = writeln!(out, "Current Balance: {}", algo(status.amount.as_algo()));
    let _ = writeln!(out, "Minimum Balance: {}", algo(status.min_balance.as_algo()));
    out
}

/// Cumulative rewards of the local history as an SVG line chart.
#[must_use]
pub fn history_chart(history: &[HistorySample]) -> String {
    let points: Vec<_> = history
        .iter()
        .map(|s| (s.timestamp, s.cumulative_rewards))
        .collect();
    let title = match history.last() {
        Some(last) => format!(
            "Algorand Rewards History (balance {} ALGO)",
            grouped(last.total_balance, 2)
        ),
        None => "Algorand Rewards History".to_string(),
    };
    line_chart(&title, "Cumulative Rewards (ALGO)", &points)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;
    use crate::domain::{AccountStatus, MicroAlgos, RewardTransaction, RewardsMetrics};

    fn status() -> ParticipationStatus {
        ParticipationStatus {
            online: true,
            current_round: 47_000_123,
            keys_present: true,
            vote_first_valid: Some(46_000_000),
            vote_last_valid: Some(49_000_000),
            vote_key_dilution: Some(1_733),
            active: true,
            blocks_remaining: 1_999_877,
            time_remaining_secs: 8_999_446,
            time_remaining: "104 days, 3:50:46".to_string(),
            pending_rewards: MicroAlgos::ZERO,
            reward_base: 218_288,
            total_rewards: MicroAlgos::new(1_500_000),
            amount: MicroAlgos::from_algo(145_726.37),
            min_balance: MicroAlgos::new(100_000),
        }
    }

    #[test]
    fn participation_report_lists_window() {
        let text = participation_report("ADDR", &status());
        assert!(text.contains("Address: ADDR"));
        assert!(text.contains("Online: Yes"));
        assert!(text.contains("Current Round: 47,000,123"));
        assert!(text.contains("First Valid Round: 46,000,000"));
        assert!(text.contains("Blocks Remaining: 1,999,877"));
        assert!(text.contains("Time Remaining: 104 days, 3:50:46"));
        assert!(text.contains("Current Balance: 145,726.370000 ALGO"));
    }

    #[test]
    fn participation_report_without_keys() {
        let mut s = status();
        s.vote_first_valid = None;
        s.vote_last_valid = None;
        s.keys_present = false;
        s.active = false;
        let text = participation_report("ADDR", &s);
        assert!(text.contains("First Valid Round: -"));
        assert!(text.contains("Active: No"));
    }

    #[test]
    fn rewards_report_includes_payouts_and_projection() {
        let ts = Utc
            .with_ymd_and_hms(2025, 3, 1, 10, 0, 0)
            .single()
            .unwrap_or_default();
        let start = NaiveDate::from_ymd_opt(2025, 2, 15).unwrap_or_default();
        let payouts = vec![RewardTransaction {
            tx_id: "TX1".to_string(),
            round: 47_000_000,
            timestamp: ts,
            amount: MicroAlgos::new(10_000_000),
        }];
        let report = RewardsReport {
            address: "ADDR".to_string(),
            start_date: start,
            metrics: RewardsMetrics::since(start, &payouts, ts),
            participation: Some(status()),
            payouts,
            history: Vec::new(),
            balance: None,
        };
        let text = rewards_report(&report);
        assert!(text.contains("Node Start Date: 2025-02-15"));
        assert!(text.contains("Days Running: 14"));
        assert!(text.contains("Total Rewards Since Start: 10.000000 ALGO"));
        assert!(text.contains("Projected Monthly Rewards"));
        assert!(text.contains("Proposer Payouts (1):"));
        assert!(text.contains("TX1"));
        assert!(text.contains("Participation Keys: Present"));
    }

    #[test]
    fn history_chart_titles_with_last_balance() {
        let sample = HistorySample {
            timestamp: Utc
                .with_ymd_and_hms(2025, 3, 1, 0, 0, 0)
                .single()
                .unwrap_or_default(),
            rewards: MicroAlgos::ZERO,
            pending_rewards: MicroAlgos::ZERO,
            total_balance: 1_000.0,
            cumulative_rewards: 2.0,
            status: AccountStatus::Online,
            rewards_base: 0,
        };
        let svg = history_chart(&[sample]);
        assert!(svg.contains("balance 1,000.00 ALGO"));
        assert!(history_chart(&[]).contains("No data"));
    }
}
