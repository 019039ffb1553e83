//! In-memory store used when PostgreSQL persistence is disabled.
//!
//! Mirrors the semantics of [`super::postgres::PostgresPersistence`]:
//! history and status rows are appended, payouts are unique on `tx_id`.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::models::{NodeStatusRow, RewardRow, RewardsHistoryRow};

#[derive(Debug, Default)]
struct Tables {
    history: Vec<RewardsHistoryRow>,
    node_status: Vec<NodeStatusRow>,
    rewards: Vec<RewardRow>,
}

/// Process-local store. Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryPersistence {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a `rewards_history` row.
    pub async fn insert_history(&self, row: &RewardsHistoryRow) {
        self.tables.write().await.history.push(row.clone());
    }

    /// Appends a `node_status` row.
    pub async fn insert_node_status(&self, row: &NodeStatusRow) {
        self.tables.write().await.node_status.push(row.clone());
    }

    /// Inserts or replaces the payout with the same `tx_id`. Always writes.
    pub async fn upsert_reward(&self, row: &RewardRow) -> bool {
        let mut tables = self.tables.write().await;
        match tables.rewards.iter_mut().find(|r| r.tx_id == row.tx_id) {
            Some(existing) => *existing = row.clone(),
            None => tables.rewards.push(row.clone()),
        }
        true
    }

    /// Returns the most recent `node_status` row for `address`.
    pub async fn latest_node_status(&self, address: &str) -> Option<NodeStatusRow> {
        self.tables
            .read()
            .await
            .node_status
            .iter()
            .filter(|r| r.address == address)
            .max_by_key(|r| r.timestamp)
            .cloned()
    }

    /// Returns all payouts for `address`, oldest first.
    pub async fn rewards(&self, address: &str) -> Vec<RewardRow> {
        let mut rows: Vec<RewardRow> = self
            .tables
            .read()
            .await
            .rewards
            .iter()
            .filter(|r| r.address == address)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.timestamp);
        rows
    }

    /// Returns the `rewards_history` rows for `address`, oldest first.
    pub async fn history(&self, address: &str) -> Vec<RewardsHistoryRow> {
        let mut rows: Vec<RewardsHistoryRow> = self
            .tables
            .read()
            .await
            .history
            .iter()
            .filter(|r| r.address == address)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.timestamp);
        rows
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn reward(tx_id: &str, amount: f64) -> RewardRow {
        RewardRow {
            address: "A".to_string(),
            timestamp: Utc::now(),
            round: 1,
            amount,
            tx_id: tx_id.to_string(),
        }
    }

    #[tokio::test]
    async fn upsert_replaces_on_same_tx_id() {
        let store = MemoryPersistence::new();
        store.upsert_reward(&reward("T1", 1.0)).await;
        store.upsert_reward(&reward("T2", 2.0)).await;
        store.upsert_reward(&reward("T1", 5.0)).await;

        let rows = store.rewards("A").await;
        assert_eq!(rows.len(), 2);
        let t1 = rows.iter().find(|r| r.tx_id == "T1").map(|r| r.amount);
        assert_eq!(t1, Some(5.0));
    }

    #[tokio::test]
    async fn latest_status_picks_newest_for_address() {
        let store = MemoryPersistence::new();
        let now = Utc::now();
        for (offset, address, round) in [(2, "A", 10), (1, "A", 20), (0, "B", 30)] {
            store
                .insert_node_status(&NodeStatusRow {
                    timestamp: now - Duration::hours(offset),
                    address: address.to_string(),
                    current_balance: 0.0,
                    is_online: true,
                    current_round: round,
                    participation_key_present: true,
                    time_remaining: String::new(),
                })
                .await;
        }
        let latest = store.latest_node_status("A").await.map(|r| r.current_round);
        assert_eq!(latest, Some(20));
        assert!(store.latest_node_status("C").await.is_none());
    }
}
