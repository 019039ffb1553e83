//! Domain layer: node payloads, participation and reward computation, and
//! the event system.
//!
//! Everything here is synchronous and free of I/O except the event bus.

pub mod account;
pub mod event_bus;
pub mod metrics;
pub mod microalgos;
pub mod participation;
pub mod run_id;
pub mod sample;
pub mod tracker_event;

pub use account::{
    AccountInfo, AccountStatus, IndexerTransaction, NodeStatus, Participation, PaymentTransaction,
    RewardTransaction, TransactionsPage,
};
pub use event_bus::EventBus;
pub use metrics::{CumulativePoint, DashboardMetrics, RewardsMetrics};
pub use microalgos::MicroAlgos;
pub use participation::ParticipationStatus;
pub use run_id::RunId;
pub use sample::HistorySample;
pub use tracker_event::TrackerEvent;
