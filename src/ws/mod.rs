//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The endpoint at `/ws` pushes a message for every finished collection run
//! and accepts a few commands (subscribe, unsubscribe, refresh, get_status).

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
