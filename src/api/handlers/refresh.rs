//! Manual collection trigger.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::error::{ErrorResponse, TrackerError};
use crate::service::CollectionSummary;

/// `POST /refresh`: run the pipeline now.
///
/// Waits for a scheduled run already in progress.
///
/// # Errors
///
/// Returns the error that aborted the run.
#[utoipa::path(
    post,
    path = "/api/v1/refresh",
    tag = "Rewards",
    summary = "Collect now",
    description = "Fetches the account and payouts, stores a new snapshot and returns its summary.",
    responses(
        (status = 200, description = "Run finished", body = CollectionSummary),
        (status = 502, description = "Node or indexer unreachable", body = ErrorResponse),
        (status = 500, description = "Store or history file failure", body = ErrorResponse),
    )
)]
pub async fn refresh(State(state): State<AppState>) -> Result<impl IntoResponse, TrackerError> {
    let summary = state.service.collect().await?;
    Ok(Json(summary))
}

/// Refresh route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/refresh", post(refresh))
}
