//! Persistence layer: the three tracker tables and the local history file.
//!
//! [`RewardsStore`] dispatches to PostgreSQL (`sqlx::PgPool`) or to an
//! in-memory backend. [`HistoryFile`] is the flat-file fallback.

pub mod history_file;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use history_file::HistoryFile;
pub use memory::MemoryPersistence;
pub use models::{NodeStatusRow, RewardRow, RewardsHistoryRow};
pub use postgres::PostgresPersistence;
pub use store::RewardsStore;
