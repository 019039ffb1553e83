//! REST endpoint handlers organized by resource.

pub mod dashboard;
pub mod history;
pub mod metrics;
pub mod refresh;
pub mod status;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all JSON routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(metrics::routes())
        .merge(history::routes())
        .merge(status::routes())
        .merge(refresh::routes())
}
