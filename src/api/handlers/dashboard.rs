//! HTML dashboard, its charts and the refresh form target.

use axum::Router;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect};
use axum::routing::{get, post};

use crate::api::dto::DashboardParams;
use crate::app_state::AppState;
use crate::domain::DashboardMetrics;
use crate::domain::metrics::cumulative_points;
use crate::error::TrackerError;
use crate::render::dashboard::{balance_chart, cumulative_chart};
use crate::render::{DashboardView, render_dashboard};

const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// `GET /`: the dashboard page.
///
/// Store failures render an empty page with an error banner.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> impl IntoResponse {
    let service = &state.service;
    let address = service.config().address.as_str();

    let mut notice = params
        .refresh
        .as_deref()
        .filter(|r| *r == "failed")
        .map(|_| "Refresh failed; showing the last stored data.".to_string());

    let rewards = match service.stored_rewards().await {
        Ok(rewards) => rewards,
        Err(err) => {
            tracing::error!(error = %err, "could not load rewards for dashboard");
            notice = Some(format!("Error fetching data: {err}"));
            Vec::new()
        }
    };
    let node_status = match service.store().latest_node_status(address).await {
        Ok(status) => status,
        Err(err) => {
            tracing::error!(error = %err, "could not load node status for dashboard");
            None
        }
    };

    let metrics = DashboardMetrics::compute(&rewards, service.config().original_balance);
    let points = cumulative_points(&rewards);
    Html(render_dashboard(&DashboardView {
        address,
        metrics: &metrics,
        points: &points,
        node_status: node_status.as_ref(),
        notice: notice.as_deref(),
    }))
}

/// `POST /refresh`: run the pipeline, then go back to the dashboard.
pub async fn refresh_form(State(state): State<AppState>) -> Redirect {
    match state.service.collect().await {
        Ok(_) => Redirect::to("/"),
        Err(err) => {
            tracing::warn!(error = %err, "dashboard refresh failed");
            Redirect::to("/?refresh=failed")
        }
    }
}

/// `GET /charts/cumulative.svg`: cumulative rewards line chart.
///
/// # Errors
///
/// Returns [`TrackerError::PersistenceError`] if the store cannot be read.
pub async fn cumulative_svg(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, TrackerError> {
    let rewards = state.service.stored_rewards().await?;
    let svg = cumulative_chart(&cumulative_points(&rewards));
    Ok(([(header::CONTENT_TYPE, SVG_CONTENT_TYPE)], svg))
}

/// `GET /charts/balance.svg`: current balance against total rewards.
///
/// # Errors
///
/// Returns [`TrackerError::PersistenceError`] if the store cannot be read.
pub async fn balance_svg(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, TrackerError> {
    let rewards = state.service.stored_rewards().await?;
    let metrics = DashboardMetrics::compute(&rewards, state.service.config().original_balance);
    Ok(([(header::CONTENT_TYPE, SVG_CONTENT_TYPE)], balance_chart(&metrics)))
}

/// Dashboard routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/refresh", post(refresh_form))
        .route("/charts/cumulative.svg", get(cumulative_svg))
        .route("/charts/balance.svg", get(balance_svg))
}
