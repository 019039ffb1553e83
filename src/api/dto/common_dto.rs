//! Shared DTO types used across multiple endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

/// Largest page a list endpoint returns.
pub const MAX_LIMIT: usize = 1_000;

/// Query parameters for list endpoints.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LimitParams {
    /// Maximum number of items, newest first. Omit for all (capped at 1000).
    pub limit: Option<usize>,
}

impl LimitParams {
    /// Returns the limit clamped to `1..=MAX_LIMIT`.
    #[must_use]
    pub fn clamped(&self) -> usize {
        self.limit.map_or(MAX_LIMIT, |l| l.clamp(1, MAX_LIMIT))
    }
}

/// Query parameters of the dashboard page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardParams {
    /// Set to `failed` after a refresh that did not complete.
    pub refresh: Option<String>,
}
