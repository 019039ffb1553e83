//! PostgreSQL implementation of the rewards store.

use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::models::{NodeStatusRow, RewardRow, RewardsHistoryRow};
use crate::config::TrackerConfig;
use crate::error::TrackerError;

type HistoryTuple = (
    DateTime<Utc>,
    String,
    f64,
    i64,
    f64,
    f64,
    bool,
    i64,
    f64,
    bool,
);

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    /// Creates a new persistence layer with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool from `config` and applies migrations if enabled.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::PersistenceError`] if the database is
    /// unreachable or a migration fails.
    pub async fn connect(config: &TrackerConfig) -> Result<Self, TrackerError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;

        if config.database_run_migrations {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| TrackerError::PersistenceError(format!("migration: {e}")))?;
            tracing::info!("database migrations applied");
        }

        Ok(Self::new(pool))
    }

    /// Appends a `rewards_history` row.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::PersistenceError`] on database failure.
    pub async fn insert_history(&self, row: &RewardsHistoryRow) -> Result<(), TrackerError> {
        sqlx::query(
            "INSERT INTO rewards_history (timestamp, address, rewards, rewards_base, amount, \
             cumulative_rewards, is_online, current_round, pending_rewards, participation_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(row.timestamp)
        .bind(&row.address)
        .bind(row.rewards)
        .bind(row.rewards_base)
        .bind(row.amount)
        .bind(row.cumulative_rewards)
        .bind(row.is_online)
        .bind(row.current_round)
        .bind(row.pending_rewards)
        .bind(row.participation_active)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Appends a `node_status` row.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::PersistenceError`] on database failure.
    pub async fn insert_node_status(&self, row: &NodeStatusRow) -> Result<(), TrackerError> {
        sqlx::query(
            "INSERT INTO node_status (timestamp, address, current_balance, is_online, \
             current_round, participation_key_present, time_remaining) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(row.timestamp)
        .bind(&row.address)
        .bind(row.current_balance)
        .bind(row.is_online)
        .bind(row.current_round)
        .bind(row.participation_key_present)
        .bind(&row.time_remaining)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Inserts or updates a payout keyed on `tx_id`. Returns `true` if a
    /// row was written.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::PersistenceError`] on database failure.
    pub async fn upsert_reward(&self, row: &RewardRow) -> Result<bool, TrackerError> {
        let result = sqlx::query(
            "INSERT INTO rewards (address, timestamp, round, amount, tx_id) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (tx_id) DO UPDATE SET address = EXCLUDED.address, \
             timestamp = EXCLUDED.timestamp, round = EXCLUDED.round, amount = EXCLUDED.amount",
        )
        .bind(&row.address)
        .bind(row.timestamp)
        .bind(row.round)
        .bind(row.amount)
        .bind(&row.tx_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Loads the most recent `node_status` row for `address`.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::PersistenceError`] on database failure.
    pub async fn latest_node_status(
        &self,
        address: &str,
    ) -> Result<Option<NodeStatusRow>, TrackerError> {
        let row = sqlx::query_as::<_, (DateTime<Utc>, String, f64, bool, i64, bool, String)>(
            "SELECT timestamp, address, current_balance, is_online, current_round, \
             participation_key_present, time_remaining FROM node_status \
             WHERE address = $1 ORDER BY timestamp DESC LIMIT 1",
        )
        .bind(address)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(
            |(
                timestamp,
                address,
                current_balance,
                is_online,
                current_round,
                participation_key_present,
                time_remaining,
            )| NodeStatusRow {
                timestamp,
                address,
                current_balance,
                is_online,
                current_round,
                participation_key_present,
                time_remaining,
            },
        ))
    }

    /// Loads all payouts for `address`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::PersistenceError`] on database failure.
    pub async fn rewards(&self, address: &str) -> Result<Vec<RewardRow>, TrackerError> {
        let rows = sqlx::query_as::<_, (String, DateTime<Utc>, i64, f64, String)>(
            "SELECT address, timestamp, round, amount, tx_id FROM rewards \
             WHERE address = $1 ORDER BY timestamp ASC",
        )
        .bind(address)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(address, timestamp, round, amount, tx_id)| RewardRow {
                address,
                timestamp,
                round,
                amount,
                tx_id,
            })
            .collect())
    }

    /// Loads the `rewards_history` rows for `address`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::PersistenceError`] on database failure.
    pub async fn history(&self, address: &str) -> Result<Vec<RewardsHistoryRow>, TrackerError> {
        let rows = sqlx::query_as::<_, HistoryTuple>(
            "SELECT timestamp, address, rewards, rewards_base, amount, cumulative_rewards, \
             is_online, current_round, pending_rewards, participation_active \
             FROM rewards_history WHERE address = $1 ORDER BY timestamp ASC",
        )
        .bind(address)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(
                |(
                    timestamp,
                    address,
                    rewards,
                    rewards_base,
                    amount,
                    cumulative_rewards,
                    is_online,
                    current_round,
                    pending_rewards,
                    participation_active,
                )| RewardsHistoryRow {
                    timestamp,
                    address,
                    rewards,
                    rewards_base,
                    amount,
                    cumulative_rewards,
                    is_online,
                    current_round,
                    pending_rewards,
                    participation_active,
                },
            )
            .collect())
    }
}
