//! # algo-rewards-tracker
//!
//! Tracks the consensus participation and proposer rewards of one Algorand
//! account.
//!
//! A scheduler polls the node and indexer REST APIs, evaluates whether the
//! account's participation key covers the current round, totals the
//! proposer payouts since the node start date and writes a snapshot to
//! PostgreSQL. A small Axum server renders the stored data as a dashboard
//! and exposes it as JSON.
//!
//! ## Architecture
//!
//! ```text
//! Browser / API clients (HTTP, WebSocket)
//!     │
//!     ├── Dashboard + REST handlers (api/, render/)
//!     ├── WS handler (ws/)
//!     │
//!     ├── RewardsService, Scheduler (service/)
//!     ├── EventBus, participation, metrics (domain/)
//!     │
//!     ├── AlgodClient, IndexerClient (client/)
//!     └── RewardsStore (PostgreSQL or memory) + history file (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod cli;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod render;
pub mod service;
pub mod ws;
