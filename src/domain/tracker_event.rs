//! Events emitted by the collection pipeline.
//!
//! Every finished run publishes a [`TrackerEvent`] through the
//! [`super::EventBus`]; dashboard WebSocket clients use it to refresh.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::RunId;

/// Outcome of a pipeline run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum TrackerEvent {
    /// A run fetched, computed and stored a new snapshot.
    SampleCollected {
        /// Run identifier.
        run_id: RunId,
        /// Tracked account.
        address: String,
        /// Round the snapshot was taken at.
        current_round: u64,
        /// Total proposer payouts in ALGO.
        cumulative_rewards: f64,
        /// Original balance plus payouts, in ALGO.
        current_balance: f64,
        /// Whether the account was actively participating.
        participation_active: bool,
        /// Payout rows written to the store.
        rewards_upserted: usize,
        /// Completion timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A run aborted.
    CollectionFailed {
        /// Run identifier.
        run_id: RunId,
        /// Error message.
        message: String,
        /// Failure timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl TrackerEvent {
    /// Every value [`Self::event_type_str`] can return.
    pub const EVENT_TYPES: [&'static str; 2] = ["sample_collected", "collection_failed"];

    /// Returns the run that produced this event.
    #[must_use]
    pub fn run_id(&self) -> RunId {
        match self {
            Self::SampleCollected { run_id, .. } | Self::CollectionFailed { run_id, .. } => *run_id,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::SampleCollected { .. } => "sample_collected",
            Self::CollectionFailed { .. } => "collection_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_event_serializes_with_tag() {
        let event = TrackerEvent::CollectionFailed {
            run_id: RunId::new(),
            message: "node request failed".to_string(),
            timestamp: Utc::now(),
        };
        assert_eq!(event.event_type_str(), "collection_failed");
        let json = serde_json::to_string(&event).unwrap_or_default();
        assert!(json.contains("\"event_type\":\"collection_failed\""));
    }

    #[test]
    fn run_id_accessor() {
        let id = RunId::new();
        let event = TrackerEvent::SampleCollected {
            run_id: id,
            address: String::new(),
            current_round: 1,
            cumulative_rewards: 0.0,
            current_balance: 0.0,
            participation_active: false,
            rewards_upserted: 0,
            timestamp: Utc::now(),
        };
        assert_eq!(event.run_id(), id);
    }
}
