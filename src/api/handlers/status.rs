//! Node status: last stored snapshot and live participation.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::domain::ParticipationStatus;
use crate::error::{ErrorResponse, TrackerError};
use crate::persistence::NodeStatusRow;

/// `GET /node-status`: the most recent `node_status` row.
///
/// # Errors
///
/// Returns [`TrackerError::NotFound`] before the first collection run.
#[utoipa::path(
    get,
    path = "/api/v1/node-status",
    tag = "Node",
    summary = "Latest node status",
    description = "The most recent node status snapshot written by a collection run.",
    responses(
        (status = 200, description = "Latest snapshot", body = NodeStatusRow),
        (status = 404, description = "Nothing collected yet", body = ErrorResponse),
        (status = 500, description = "Store unavailable", body = ErrorResponse),
    )
)]
pub async fn get_node_status(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, TrackerError> {
    let address = &state.service.config().address;
    let status = state
        .service
        .store()
        .latest_node_status(address)
        .await?
        .ok_or_else(|| TrackerError::NotFound(format!("no node status recorded for {address}")))?;
    Ok(Json(status))
}

/// `GET /participation`: participation evaluated against the node now.
///
/// # Errors
///
/// Returns [`TrackerError::NodeRequest`] or [`TrackerError::Decode`] if the
/// account cannot be fetched.
#[utoipa::path(
    get,
    path = "/api/v1/participation",
    tag = "Node",
    summary = "Live participation status",
    description = "Fetches the account and current round from the node and evaluates the participation key window.",
    responses(
        (status = 200, description = "Participation status", body = ParticipationStatus),
        (status = 502, description = "Node unreachable", body = ErrorResponse),
    )
)]
pub async fn get_participation(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, TrackerError> {
    let status = state.service.participation().await?;
    Ok(Json(status))
}

/// Node routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/node-status", get(get_node_status))
        .route("/participation", get(get_participation))
}
