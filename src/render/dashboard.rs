//! Server-rendered HTML dashboard.

use std::fmt::Write as _;

use crate::domain::{CumulativePoint, DashboardMetrics};
use crate::persistence::NodeStatusRow;

use super::chart::{Bar, LINE_COLOR, bar_chart, line_chart};
use super::format::{algo, escape_html, grouped, thousands};

/// Number of payouts in the "Recent Rewards" table.
pub const RECENT_REWARDS: usize = 5;

const BALANCE_COLOR: &str = "#3498db";

/// Everything the dashboard page shows.
#[derive(Debug, Clone)]
pub struct DashboardView<'a> {
    /// Tracked account.
    pub address: &'a str,
    /// Summary figures.
    pub metrics: &'a DashboardMetrics,
    /// Payouts with running totals, oldest first.
    pub points: &'a [CumulativePoint],
    /// Latest stored node status.
    pub node_status: Option<&'a NodeStatusRow>,
    /// Error banner, for example when the store could not be read.
    pub notice: Option<&'a str>,
}

/// Cumulative rewards over time.
#[must_use]
pub fn cumulative_chart(points: &[CumulativePoint]) -> String {
    let series: Vec<_> = points.iter().map(|p| (p.timestamp, p.cumulative)).collect();
    line_chart("Cumulative Rewards Growth", "Total Rewards (ALGO)", &series)
}

/// Current balance next to total rewards.
#[must_use]
pub fn balance_chart(metrics: &DashboardMetrics) -> String {
    let bars = [
        Bar {
            label: "Current Balance".to_string(),
            value: metrics.current_balance,
            color: BALANCE_COLOR,
        },
        Bar {
            label: "Total Rewards".to_string(),
            value: metrics.total_rewards,
            color: LINE_COLOR,
        },
    ];
    bar_chart("Balance vs Rewards", "ALGO", &bars)
}

/// Renders the full page.
#[must_use]
pub fn render_dashboard(view: &DashboardView<'_>) -> String {
    let m = view.metrics;
    let mut html = String::new();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Algorand Node Rewards Dashboard</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>Algorand Node Rewards Dashboard</h1>\n<p class=\"address\">{}</p>\n",
        escape_html(view.address)
    );
    if let Some(notice) = view.notice {
        let _ = writeln!(html, "<p class=\"notice\">{}</p>", escape_html(notice));
    }

    html.push_str("<section class=\"cards\">\n");
    let average_delta = (m.reward_count > 0)
        .then(|| format!("{} ALGO/reward", grouped(m.average_reward, 2)));
    html.push_str(&card(
        "Total Rewards",
        &format!("{} ALGO", grouped(m.total_rewards, 2)),
        average_delta.as_deref(),
    ));
    let monthly = format!("{} ALGO/month (projected)", grouped(m.monthly_projection, 2));
    html.push_str(&card(
        "Average Daily Rewards",
        &format!("{} ALGO", grouped(m.average_daily_rewards, 2)),
        Some(monthly.as_str()),
    ));
    let original = format!("Original Balance: {} ALGO", grouped(m.original_balance, 2));
    html.push_str(&card(
        "Current Balance",
        &format!("{} ALGO", grouped(m.current_balance, 2)),
        Some(original.as_str()),
    ));
    let basis = format!("Based on {} ALGO initial", grouped(m.original_balance, 2));
    html.push_str(&card(
        "ROI Since Start",
        &format!("{}%", grouped(m.roi_percent, 2)),
        Some(basis.as_str()),
    ));
    html.push_str("</section>\n");

    html.push_str("<h2>Cumulative Rewards Over Time</h2>\n<div class=\"chart\">\n");
    html.push_str(&cumulative_chart(view.points));
    html.push_str("</div>\n");

    html.push_str("<h2>Rewards Statistics</h2>\n<section class=\"columns\">\n<div>\n<h3>Recent Rewards</h3>\n");
    html.push_str(&recent_rewards_table(view.points));
    html.push_str("</div>\n<div>\n<h3>Performance Metrics</h3>\n");
    if m.reward_count > 0 {
        let avg_gap = m
            .average_hours_between_rewards
            .map_or_else(|| "-".to_string(), |h| format!("{} hours", grouped(h, 1)));
        let rows = [
            ("Original Balance", algo(m.original_balance)),
            ("Current Balance", algo(m.current_balance)),
            ("Total Rewards Earned", algo(m.total_rewards)),
            ("Number of Rewards", m.reward_count.to_string()),
            ("Average Reward Size", algo(m.average_reward)),
            ("ROI Since Start", format!("{}%", grouped(m.roi_percent, 2))),
            ("Avg Time Between Rewards", avg_gap),
        ];
        html.push_str(&key_value_table(&rows));
    } else {
        html.push_str("<p>No rewards recorded yet.</p>\n");
    }
    html.push_str("</div>\n</section>\n");

    html.push_str("<h2>Node Status</h2>\n");
    match view.node_status {
        Some(status) => {
            let round = u64::try_from(status.current_round).unwrap_or_default();
            let rows = [
                (
                    "Online Status",
                    if status.is_online { "Online" } else { "Offline" }.to_string(),
                ),
                ("Current Round", thousands(round)),
                (
                    "Participation Keys",
                    if status.participation_key_present {
                        "Present"
                    } else {
                        "Not Found"
                    }
                    .to_string(),
                ),
                ("Time Remaining", status.time_remaining.clone()),
                (
                    "Last Updated",
                    status.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                ),
            ];
            html.push_str(&key_value_table(&rows));
        }
        None => html.push_str("<p>No node status recorded yet.</p>\n"),
    }

    html.push_str(
        "<form method=\"post\" action=\"/refresh\">\n\
         <button type=\"submit\">Refresh Data</button>\n</form>\n</body>\n</html>\n",
    );
    html
}

fn card(label: &str, value: &str, delta: Option<&str>) -> String {
    let mut out = format!(
        "<div class=\"card\"><div class=\"label\">{}</div><div class=\"value\">{}</div>",
        escape_html(label),
        escape_html(value)
    );
    if let Some(delta) = delta {
        let _ = write!(out, "<div class=\"delta\">{}</div>", escape_html(delta));
    }
    out.push_str("</div>\n");
    out
}

fn recent_rewards_table(points: &[CumulativePoint]) -> String {
    if points.is_empty() {
        return "<p>No rewards recorded yet.</p>\n".to_string();
    }
    let mut out = String::from(
        "<table>\n<tr><th>Time</th><th>Reward Amount</th><th>Total Rewards</th></tr>\n",
    );
    for point in points.iter().rev().take(RECENT_REWARDS) {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{:.6}</td><td>{:.6}</td></tr>",
            point.timestamp.format("%Y-%m-%d %H:%M:%S"),
            point.amount,
            point.cumulative
        );
    }
    out.push_str("</table>\n");
    out
}

fn key_value_table(rows: &[(&str, String)]) -> String {
    let mut out = String::from("<table>\n<tr><th>Metric</th><th>Value</th></tr>\n");
    for (metric, value) in rows {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape_html(metric),
            escape_html(value)
        );
    }
    out.push_str("</table>\n");
    out
}

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;color:#222}\
.address{font-family:monospace;color:#666}\
.notice{background:#fdecea;border:1px solid #f5c2c0;padding:.5rem 1rem}\
.cards{display:flex;gap:1rem;flex-wrap:wrap}\
.card{flex:1;min-width:180px;border:1px solid #ddd;border-radius:6px;padding:1rem}\
.card .label{font-size:.9rem;color:#666}.card .value{font-size:1.6rem;margin:.3rem 0}\
.card .delta{font-size:.85rem;color:#2e7d32}\
.columns{display:flex;gap:2rem;flex-wrap:wrap}.columns>div{flex:1;min-width:320px}\
table{border-collapse:collapse}td,th{border-bottom:1px solid #eee;padding:.3rem .8rem;text-align:left}\
button{margin-top:2rem;padding:.6rem 1.2rem;font-size:1rem}";

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::metrics::cumulative_points;
    use crate::domain::{MicroAlgos, RewardTransaction};

    fn rewards(n: u32) -> Vec<RewardTransaction> {
        (1..=n)
            .map(|i| RewardTransaction {
                tx_id: format!("TX{i}"),
                round: u64::from(i),
                timestamp: Utc
                    .with_ymd_and_hms(2025, 3, i, 0, 0, 0)
                    .single()
                    .unwrap_or_default(),
                amount: MicroAlgos::new(1_000_000),
            })
            .collect()
    }

    fn node_status() -> NodeStatusRow {
        NodeStatusRow {
            timestamp: Utc
                .with_ymd_and_hms(2025, 3, 9, 12, 0, 0)
                .single()
                .unwrap_or_default(),
            address: "ADDR".to_string(),
            current_balance: 108.0,
            is_online: true,
            current_round: 47_000_123,
            participation_key_present: true,
            time_remaining: "3 days, 1:00:00".to_string(),
        }
    }

    #[test]
    fn page_shows_cards_tables_and_refresh() {
        let payouts = rewards(8);
        let metrics = DashboardMetrics::compute(&payouts, MicroAlgos::from_algo(100.0));
        let points = cumulative_points(&payouts);
        let status = node_status();
        let html = render_dashboard(&DashboardView {
            address: "ADDR",
            metrics: &metrics,
            points: &points,
            node_status: Some(&status),
            notice: None,
        });
        assert!(html.contains("Total Rewards"));
        assert!(html.contains("8.00 ALGO"));
        assert!(html.contains("ROI Since Start"));
        assert!(html.contains("8.00%"));
        assert!(html.contains("<svg"));
        assert!(html.contains("47,000,123"));
        assert!(html.contains("action=\"/refresh\""));
        // only the five newest payouts are listed
        assert!(html.contains("<td>8.000000</td>"));
        assert!(html.contains("<td>4.000000</td>"));
        assert!(!html.contains("<td>3.000000</td>"));
    }

    #[test]
    fn page_without_data_shows_placeholders() {
        let metrics = DashboardMetrics::compute(&[], MicroAlgos::ZERO);
        let html = render_dashboard(&DashboardView {
            address: "<ADDR>",
            metrics: &metrics,
            points: &[],
            node_status: None,
            notice: Some("database unavailable"),
        });
        assert!(html.contains("&lt;ADDR&gt;"));
        assert!(html.contains("database unavailable"));
        assert!(html.contains("No node status recorded yet."));
        assert!(html.contains("No data"));
    }

    #[test]
    fn balance_chart_has_two_bars() {
        let metrics = DashboardMetrics::compute(&rewards(2), MicroAlgos::from_algo(10.0));
        let svg = balance_chart(&metrics);
        assert!(svg.contains("12.000000"));
        assert!(svg.contains("2.000000"));
    }
}
