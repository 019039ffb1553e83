//! Reward metrics and the stored payout list.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{LimitParams, MetricsResponse, RewardsResponse};
use crate::app_state::AppState;
use crate::domain::DashboardMetrics;
use crate::domain::metrics::cumulative_points;
use crate::error::{ErrorResponse, TrackerError};

/// `GET /metrics`: summary figures over all stored payouts.
///
/// # Errors
///
/// Returns [`TrackerError::PersistenceError`] if the store cannot be read.
#[utoipa::path(
    get,
    path = "/api/v1/metrics",
    tag = "Rewards",
    summary = "Reward metrics",
    description = "Total, average and daily rewards, monthly projection, current balance and ROI computed from stored payouts.",
    responses(
        (status = 200, description = "Computed metrics", body = MetricsResponse),
        (status = 500, description = "Store unavailable", body = ErrorResponse),
    )
)]
pub async fn get_metrics(State(state): State<AppState>) -> Result<impl IntoResponse, TrackerError> {
    let rewards = state.service.stored_rewards().await?;
    let config = state.service.config();
    Ok(Json(MetricsResponse {
        address: config.address.clone(),
        metrics: DashboardMetrics::compute(&rewards, config.original_balance),
        generated_at: Utc::now(),
    }))
}

/// `GET /rewards`: stored payouts with running totals, newest first.
///
/// # Errors
///
/// Returns [`TrackerError::PersistenceError`] if the store cannot be read.
#[utoipa::path(
    get,
    path = "/api/v1/rewards",
    tag = "Rewards",
    summary = "List payouts",
    description = "Stored proposer payouts, newest first, each with the cumulative total up to it.",
    params(LimitParams),
    responses(
        (status = 200, description = "Payout list", body = RewardsResponse),
        (status = 500, description = "Store unavailable", body = ErrorResponse),
    )
)]
pub async fn list_rewards(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<impl IntoResponse, TrackerError> {
    let rewards = state.service.stored_rewards().await?;
    let points = cumulative_points(&rewards);
    let total = points.len();
    let data = points.into_iter().rev().take(params.clamped()).collect();
    Ok(Json(RewardsResponse {
        address: state.service.config().address.clone(),
        total,
        data,
    }))
}

/// Reward routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(get_metrics))
        .route("/rewards", get(list_rewards))
}
