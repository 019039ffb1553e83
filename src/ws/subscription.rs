//! Per-connection subscription manager.
//!
//! Tracks which event types a WebSocket client receives. New connections
//! receive every type.

use std::collections::HashSet;

use crate::domain::TrackerEvent;

/// Wildcard selecting every event type.
pub const WILDCARD: &str = "*";

/// Manages the set of event types forwarded to a single connection.
#[derive(Debug, Clone)]
pub struct SubscriptionManager {
    event_types: HashSet<&'static str>,
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self {
            event_types: TrackerEvent::EVENT_TYPES.into_iter().collect(),
        }
    }
}

impl SubscriptionManager {
    /// Creates a manager subscribed to every event type.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds event types. Returns the names that are not known event types.
    pub fn subscribe(&mut self, names: &[String]) -> Vec<String> {
        let (known, unknown) = resolve(names);
        self.event_types.extend(known);
        unknown
    }

    /// Removes event types. Returns the names that are not known event types.
    pub fn unsubscribe(&mut self, names: &[String]) -> Vec<String> {
        let (known, unknown) = resolve(names);
        for name in known {
            self.event_types.remove(name);
        }
        unknown
    }

    /// Returns `true` if `event` should be forwarded.
    #[must_use]
    pub fn matches(&self, event: &TrackerEvent) -> bool {
        self.event_types.contains(event.event_type_str())
    }

    /// Subscribed event types, sorted.
    #[must_use]
    pub fn event_types(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = self.event_types.iter().copied().collect();
        types.sort_unstable();
        types
    }
}

fn resolve(names: &[String]) -> (Vec<&'static str>, Vec<String>) {
    let mut known = Vec::new();
    let mut unknown = Vec::new();
    for name in names {
        if name == WILDCARD {
            known.extend(TrackerEvent::EVENT_TYPES);
        } else if let Some(event_type) = TrackerEvent::EVENT_TYPES
            .into_iter()
            .find(|t| *t == name.as_str())
        {
            known.push(event_type);
        } else {
            unknown.push(name.clone());
        }
    }
    (known, unknown)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::RunId;

    fn failed() -> TrackerEvent {
        TrackerEvent::CollectionFailed {
            run_id: RunId::new(),
            message: String::new(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_connection_receives_everything() {
        let mgr = SubscriptionManager::new();
        assert!(mgr.matches(&failed()));
        assert_eq!(mgr.event_types(), vec!["collection_failed", "sample_collected"]);
    }

    #[test]
    fn unsubscribe_filters_type() {
        let mut mgr = SubscriptionManager::new();
        let unknown = mgr.unsubscribe(&["collection_failed".to_string()]);
        assert!(unknown.is_empty());
        assert!(!mgr.matches(&failed()));
        assert_eq!(mgr.event_types(), vec!["sample_collected"]);
    }

    #[test]
    fn wildcard_restores_everything() {
        let mut mgr = SubscriptionManager::new();
        mgr.unsubscribe(&[WILDCARD.to_string()]);
        assert!(mgr.event_types().is_empty());
        mgr.subscribe(&[WILDCARD.to_string()]);
        assert!(mgr.matches(&failed()));
    }

    #[test]
    fn unknown_names_are_reported() {
        let mut mgr = SubscriptionManager::new();
        let unknown = mgr.subscribe(&["reward_claimed".to_string()]);
        assert_eq!(unknown, vec!["reward_claimed".to_string()]);
    }
}
