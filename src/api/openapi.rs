//! OpenAPI document for the JSON endpoints.

use utoipa::OpenApi;

use super::dto::{
    HealthResponse, HistoryEntryDto, HistoryResponse, HistorySource, MetricsResponse,
    RewardsResponse,
};
use super::handlers::{history, metrics, refresh, status, system};
use crate::domain::{AccountStatus, CumulativePoint, DashboardMetrics, ParticipationStatus};
use crate::error::{ErrorBody, ErrorResponse};
use crate::persistence::{NodeStatusRow, RewardsHistoryRow};
use crate::service::CollectionSummary;

/// Generated OpenAPI specification, served by Swagger UI when the
/// `swagger-ui` feature is on.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Algorand rewards tracker",
        description = "Participation status and proposer reward history of one Algorand account."
    ),
    paths(
        system::health_handler,
        metrics::get_metrics,
        metrics::list_rewards,
        history::get_history,
        status::get_node_status,
        status::get_participation,
        refresh::refresh,
    ),
    components(schemas(
        AccountStatus,
        CollectionSummary,
        CumulativePoint,
        DashboardMetrics,
        ErrorBody,
        ErrorResponse,
        HealthResponse,
        HistoryEntryDto,
        HistoryResponse,
        HistorySource,
        MetricsResponse,
        NodeStatusRow,
        ParticipationStatus,
        RewardsHistoryRow,
        RewardsResponse,
    )),
    tags(
        (name = "System", description = "Health"),
        (name = "Rewards", description = "Payouts, metrics and collection"),
        (name = "Node", description = "Node and participation status"),
    )
)]
pub struct ApiDoc;
