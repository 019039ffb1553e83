//! Service layer: pipeline orchestration and scheduling.
//!
//! [`RewardsService`] runs fetch, compute and persist, and publishes the
//! outcome through the [`super::domain::EventBus`]. [`Scheduler`] repeats it.

pub mod rewards_service;
pub mod scheduler;

pub use rewards_service::{CollectionSummary, RewardsReport, RewardsService};
pub use scheduler::Scheduler;
