//! Tracker error types with HTTP status code mapping.
//!
//! [`TrackerError`] is the central error type. Pipeline code logs it and
//! moves on; the dashboard API turns it into a structured JSON response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "node request failed: 503 Service Unavailable",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Tracker error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status               |
/// |-----------|-----------------|---------------------------|
/// | 1000–1999 | Configuration   | 400 Bad Request           |
/// | 2000–2999 | Upstream (node) | 502 Bad Gateway           |
/// | 3000–3999 | Server/Storage  | 500 Internal Server Error |
/// | 4000–4999 | Not Found       | 404 Not Found             |
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// A configuration value is missing or malformed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Request parameters failed validation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The node or indexer could not be reached or returned a bad status.
    #[error("node request failed: {0}")]
    NodeRequest(String),

    /// The node or indexer returned a payload that could not be decoded.
    #[error("unexpected node response: {0}")]
    Decode(String),

    /// Database failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Local history file could not be read or written.
    #[error("history file error: {0}")]
    HistoryFile(String),

    /// The requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TrackerError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidConfig(_) => 1001,
            Self::InvalidRequest(_) => 1002,
            Self::NodeRequest(_) => 2001,
            Self::Decode(_) => 2002,
            Self::Internal(_) => 3000,
            Self::PersistenceError(_) => 3001,
            Self::HistoryFile(_) => 3002,
            Self::NotFound(_) => 4004,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidConfig(_) | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::NodeRequest(_) | Self::Decode(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::PersistenceError(_) | Self::HistoryFile(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<reqwest::Error> for TrackerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::NodeRequest(err.to_string())
        }
    }
}

impl From<sqlx::Error> for TrackerError {
    fn from(err: sqlx::Error) -> Self {
        Self::PersistenceError(err.to_string())
    }
}

impl IntoResponse for TrackerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
