//! Backend-agnostic rewards store.

use super::memory::MemoryPersistence;
use super::models::{NodeStatusRow, RewardRow, RewardsHistoryRow};
use super::postgres::PostgresPersistence;
use crate::config::TrackerConfig;
use crate::error::TrackerError;

/// The store the pipeline writes to and the dashboard reads from.
#[derive(Debug, Clone)]
pub enum RewardsStore {
    /// Hosted PostgreSQL database.
    Postgres(PostgresPersistence),
    /// Process-local tables.
    Memory(MemoryPersistence),
}

impl RewardsStore {
    /// Connects to PostgreSQL when persistence is enabled, otherwise returns
    /// an empty in-memory store.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::PersistenceError`] if the database cannot
    /// be reached or migrated.
    pub async fn from_config(config: &TrackerConfig) -> Result<Self, TrackerError> {
        if config.persistence_enabled {
            let pg = PostgresPersistence::connect(config).await?;
            tracing::info!("using postgres store");
            Ok(Self::Postgres(pg))
        } else {
            tracing::warn!("persistence disabled; rows are kept in memory only");
            Ok(Self::Memory(MemoryPersistence::new()))
        }
    }

    /// Returns a short backend name for logs and health output.
    #[must_use]
    pub const fn backend(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    /// Appends a `rewards_history` row.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::PersistenceError`] on database failure.
    pub async fn insert_history(&self, row: &RewardsHistoryRow) -> Result<(), TrackerError> {
        match self {
            Self::Postgres(pg) => pg.insert_history(row).await,
            Self::Memory(mem) => {
                mem.insert_history(row).await;
                Ok(())
            }
        }
    }

    /// Appends a `node_status` row.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::PersistenceError`] on database failure.
    pub async fn insert_node_status(&self, row: &NodeStatusRow) -> Result<(), TrackerError> {
        match self {
            Self::Postgres(pg) => pg.insert_node_status(row).await,
            Self::Memory(mem) => {
                mem.insert_node_status(row).await;
                Ok(())
            }
        }
    }

    /// Inserts or updates a payout keyed on `tx_id`.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::PersistenceError`] on database failure.
    pub async fn upsert_reward(&self, row: &RewardRow) -> Result<bool, TrackerError> {
        match self {
            Self::Postgres(pg) => pg.upsert_reward(row).await,
            Self::Memory(mem) => Ok(mem.upsert_reward(row).await),
        }
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
        match self {
            Self::Postgres(pg) => pg.latest_node_status(address).await,
            Self::Memory(mem) => Ok(mem.latest_node_status(address).await),
        }
    }

    /// Loads all payouts for `address`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::PersistenceError`] on database failure.
    pub async fn rewards(&self, address: &str) -> Result<Vec<RewardRow>, TrackerError> {
        match self {
            Self::Postgres(pg) => pg.rewards(address).await,
            Self::Memory(mem) => Ok(mem.rewards(address).await),
        }
    }

    /// Loads the `rewards_history` rows for `address`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::PersistenceError`] on database failure.
    pub async fn history(&self, address: &str) -> Result<Vec<RewardsHistoryRow>, TrackerError> {
        match self {
            Self::Postgres(pg) => pg.history(address).await,
            Self::Memory(mem) => Ok(mem.history(address).await),
        }
    }
}

impl From<MemoryPersistence> for RewardsStore {
    fn from(mem: MemoryPersistence) -> Self {
        Self::Memory(mem)
    }
}
