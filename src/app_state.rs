//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::RewardsService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Pipeline, store and configuration.
    pub service: Arc<RewardsService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}

impl AppState {
    /// Builds the state, sharing the service's event bus.
    #[must_use]
    pub fn new(service: Arc<RewardsService>) -> Self {
        let event_bus = service.event_bus().clone();
        Self { service, event_bus }
    }
}
