//! Sample history, read from the store or the local file.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{HistoryEntryDto, HistoryResponse, HistorySource, LimitParams};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, TrackerError};

/// `GET /history`: collected samples, newest first.
///
/// Reads the `rewards_history` table and falls back to the local history
/// file when the store fails.
///
/// # Errors
///
/// Returns [`TrackerError::HistoryFile`] if both sources fail.
#[utoipa::path(
    get,
    path = "/api/v1/history",
    tag = "Rewards",
    summary = "Sample history",
    description = "Collected samples, newest first. Falls back to the local history file when the store is unavailable.",
    params(LimitParams),
    responses(
        (status = 200, description = "History entries", body = HistoryResponse),
        (status = 500, description = "No source readable", body = ErrorResponse),
    )
)]
pub async fn get_history(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<impl IntoResponse, TrackerError> {
    let limit = params.clamped();
    let address = &state.service.config().address;

    let (source, entries): (HistorySource, Vec<HistoryEntryDto>) =
        match state.service.store().history(address).await {
            Ok(rows) => (
                HistorySource::Store,
                rows.iter().rev().take(limit).map(HistoryEntryDto::from).collect(),
            ),
            Err(err) => {
                tracing::warn!(error = %err, "store history unavailable; reading history file");
                let samples = state.service.history_file().load().await?;
                (
                    HistorySource::File,
                    samples.iter().rev().take(limit).map(HistoryEntryDto::from).collect(),
                )
            }
        };

    Ok(Json(HistoryResponse {
        source,
        count: entries.len(),
        data: entries,
    }))
}

/// History routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/history", get(get_history))
}
