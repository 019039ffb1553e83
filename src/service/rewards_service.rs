//! Rewards service: one collection run from node fetch to storage.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::Instrument;
use utoipa::ToSchema;

use crate::client::{AlgodClient, IndexerClient, build_http_client};
use crate::config::TrackerConfig;
use crate::domain::metrics::total;
use crate::domain::{
    AccountInfo, EventBus, HistorySample, MicroAlgos, ParticipationStatus, RewardTransaction,
    RewardsMetrics, RunId, TrackerEvent,
};
use crate::error::TrackerError;
use crate::persistence::models::to_db_int;
use crate::persistence::{HistoryFile, NodeStatusRow, RewardRow, RewardsHistoryRow, RewardsStore};

/// Result of a successful collection run.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CollectionSummary {
    /// Run identifier.
    #[schema(value_type = String)]
    pub run_id: RunId,
    /// When the run finished fetching.
    pub timestamp: DateTime<Utc>,
    /// Row appended to `rewards_history`.
    pub history: RewardsHistoryRow,
    /// Row appended to `node_status`.
    pub node_status: NodeStatusRow,
    /// Participation evaluated during the run.
    pub participation: ParticipationStatus,
    /// Payouts returned by the indexer.
    pub rewards_found: usize,
    /// Payout rows written to the store.
    pub rewards_upserted: usize,
    /// Whether the local history file got a new sample.
    pub sample_appended: bool,
}

/// Data behind the plain-text rewards report.
#[derive(Debug, Clone, Serialize)]
pub struct RewardsReport {
    /// Tracked account.
    pub address: String,
    /// Node start date.
    pub start_date: NaiveDate,
    /// Reward rate since the start date.
    pub metrics: RewardsMetrics,
    /// Live participation, if the node answered.
    pub participation: Option<ParticipationStatus>,
    /// Payouts since the start date, oldest first.
    pub payouts: Vec<RewardTransaction>,
    /// Local history after recording this report's sample.
    pub history: Vec<HistorySample>,
    /// Account balance at report time.
    pub balance: Option<MicroAlgos>,
}

/// Orchestrates fetch, compute and persist.
///
/// Runs are serialised: a manual refresh waits for a scheduled run in
/// progress and vice versa.
#[derive(Debug)]
pub struct RewardsService {
    config: Arc<TrackerConfig>,
    algod: AlgodClient,
    indexer: IndexerClient,
    store: RewardsStore,
    history_file: HistoryFile,
    event_bus: EventBus,
    run_lock: Mutex<()>,
}

impl RewardsService {
    /// Creates the service and its HTTP clients.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Internal`] if the HTTP client cannot be built.
    pub fn new(
        config: Arc<TrackerConfig>,
        store: RewardsStore,
        event_bus: EventBus,
    ) -> Result<Self, TrackerError> {
        let http = build_http_client(&config)?;
        let algod = AlgodClient::new(
            http.clone(),
            config.algod_url.clone(),
            config.algod_token.clone(),
        );
        let indexer = IndexerClient::new(http, config.indexer_url.clone(), config.indexer_page_limit);
        let history_file = HistoryFile::new(config.history_file.clone());
        Ok(Self {
            config,
            algod,
            indexer,
            store,
            history_file,
            event_bus,
            run_lock: Mutex::new(()),
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Returns the store.
    #[must_use]
    pub fn store(&self) -> &RewardsStore {
        &self.store
    }

    /// Returns the local history file.
    #[must_use]
    pub fn history_file(&self) -> &HistoryFile {
        &self.history_file
    }

    /// Returns the event bus.
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Runs the pipeline once and publishes the outcome on the event bus.
    ///
    /// # Errors
    ///
    /// Returns the first error that aborted the run: the account or payout
    /// fetch, the history file, or a store write. A failed status fetch is
    /// logged and evaluated at round 0 instead.
    pub async fn collect(&self) -> Result<CollectionSummary, TrackerError> {
        let _guard = self.run_lock.lock().await;
        let run_id = RunId::new();
        let span = tracing::info_span!("collect", %run_id, address = %self.config.address);

        let outcome = self.collect_inner(run_id).instrument(span).await;
        match &outcome {
            Ok(summary) => {
                self.event_bus.publish(TrackerEvent::SampleCollected {
                    run_id,
                    address: self.config.address.clone(),
                    current_round: summary.participation.current_round,
                    cumulative_rewards: summary.history.cumulative_rewards,
                    current_balance: summary.node_status.current_balance,
                    participation_active: summary.participation.active,
                    rewards_upserted: summary.rewards_upserted,
                    timestamp: Utc::now(),
                });
            }
            Err(err) => {
                tracing::error!(%run_id, error = %err, "collection failed");
                self.event_bus.publish(TrackerEvent::CollectionFailed {
                    run_id,
                    message: err.to_string(),
                    timestamp: Utc::now(),
                });
            }
        }
        outcome
    }

    async fn collect_inner(&self, run_id: RunId) -> Result<CollectionSummary, TrackerError> {
        let address = self.config.address.as_str();

        let (account, participation) = self.fetch_participation().await?;
        tracing::info!(
            round = participation.current_round,
            online = participation.online,
            active = participation.active,
            "participation evaluated"
        );

        let payouts = self
            .indexer
            .proposer_payouts(address, self.config.start_date)
            .await?;
        let total_rewards = total(&payouts);
        let current_balance = self.config.original_balance.saturating_add(total_rewards);
        tracing::info!(
            payouts = payouts.len(),
            total_rewards = total_rewards.as_algo(),
            current_balance = current_balance.as_algo(),
            "rewards totalled"
        );

        let now = Utc::now();
        let history = RewardsHistoryRow {
            timestamp: now,
            address: address.to_string(),
            rewards: account.rewards.as_algo(),
            rewards_base: to_db_int(account.reward_base),
            amount: current_balance.as_algo(),
            cumulative_rewards: total_rewards.as_algo(),
            is_online: participation.online,
            current_round: to_db_int(participation.current_round),
            pending_rewards: account.pending_rewards.as_algo(),
            participation_active: participation.active,
        };
        self.store.insert_history(&history).await?;

        let node_status = NodeStatusRow {
            timestamp: now,
            address: address.to_string(),
            current_balance: current_balance.as_algo(),
            is_online: participation.online,
            current_round: to_db_int(participation.current_round),
            participation_key_present: participation.keys_present,
            time_remaining: participation.time_remaining.clone(),
        };
        self.store.insert_node_status(&node_status).await?;

        let mut rewards_upserted = 0;
        for payout in &payouts {
            if self
                .store
                .upsert_reward(&RewardRow::from_payout(address, payout))
                .await?
            {
                rewards_upserted += 1;
            }
        }

        // only a run whose store writes succeeded leaves a local sample
        let sample = HistorySample::from_account(&account, total_rewards, now);
        let (_, sample_appended) = self
            .history_file
            .record(sample, now, self.config.sample_min_interval)
            .await?;

        tracing::info!(
            rewards_upserted,
            sample_appended,
            backend = self.store.backend(),
            "snapshot stored"
        );

        Ok(CollectionSummary {
            run_id,
            timestamp: now,
            history,
            node_status,
            participation,
            rewards_found: payouts.len(),
            rewards_upserted,
            sample_appended,
        })
    }

    /// Fetches the account and node status and evaluates participation.
    ///
    /// # Errors
    ///
    /// Returns an error if the account cannot be fetched. A failed status
    /// fetch is logged and evaluated at round 0.
    pub async fn participation(&self) -> Result<ParticipationStatus, TrackerError> {
        let (_, status) = self.fetch_participation().await?;
        Ok(status)
    }

    async fn fetch_participation(
        &self,
    ) -> Result<(AccountInfo, ParticipationStatus), TrackerError> {
        let account = self.algod.account(&self.config.address).await?;
        let current_round = match self.algod.status().await {
            Ok(status) => status.last_round,
            Err(err) => {
                tracing::warn!(error = %err, "node status unavailable; using round 0");
                0
            }
        };
        let status =
            ParticipationStatus::evaluate(&account, current_round, self.config.seconds_per_block);
        Ok((account, status))
    }

    /// Gathers the data for the text report. Never fails: each missing piece
    /// is logged and left empty. The history file is updated under the same
    /// lock as [`Self::collect`].
    pub async fn report(&self) -> RewardsReport {
        let address = self.config.address.clone();
        let now = Utc::now();

        let payouts = match self
            .indexer
            .proposer_payouts(&address, self.config.start_date)
            .await
        {
            Ok(payouts) => payouts,
            Err(err) => {
                tracing::warn!(error = %err, "could not fetch payouts");
                Vec::new()
            }
        };
        let metrics = RewardsMetrics::since(self.config.start_date, &payouts, now);

        let (participation, balance, history) = match self.fetch_participation().await {
            Ok((account, status)) => {
                let sample = HistorySample::from_account(&account, total(&payouts), now);
                let recorded = {
                    let _guard = self.run_lock.lock().await;
                    self.history_file
                        .record(sample, now, self.config.sample_min_interval)
                        .await
                };
                let history = match recorded {
                    Ok((history, _)) => history,
                    Err(err) => {
                        tracing::warn!(error = %err, "could not update history file");
                        Vec::new()
                    }
                };
                (Some(status), Some(account.amount), history)
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not fetch account");
                let history = self.history_file.load().await.unwrap_or_default();
                (None, None, history)
            }
        };

        RewardsReport {
            address,
            start_date: self.config.start_date,
            metrics,
            participation,
            payouts,
            history,
            balance,
        }
    }

    /// Loads the stored payouts for the tracked account.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::PersistenceError`] on database failure.
    pub async fn stored_rewards(&self) -> Result<Vec<RewardTransaction>, TrackerError> {
        let rows = self.store.rewards(&self.config.address).await?;
        Ok(rows.iter().map(RewardRow::to_payout).collect())
    }
}
