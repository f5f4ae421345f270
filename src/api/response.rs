//! Response types for the staffing API.
//!
//! This module defines the success payloads that are not plain domain
//! models, the error response structure, and the mapping from engine
//! errors to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::StaffingResult;

/// Column heading for the interval label.
pub const COLUMN_INTERVAL: &str = "Interval";
/// Column heading for inbound calls.
pub const COLUMN_INBOUND_CALLS: &str = "Inbound Calls";
/// Column heading for the offered load.
pub const COLUMN_WORKLOAD: &str = "Workload (Erlangs)";
/// Column heading for the unshrunk requirement.
pub const COLUMN_AGENTS_NO_SHRINKAGE: &str = "Agents Needed (No Shrinkage)";
/// Column heading for the shrinkage-adjusted requirement.
pub const COLUMN_AGENTS_WITH_SHRINKAGE: &str = "Agents Needed (With Shrinkage)";

/// Tabular forecast, shaped like the planner's spreadsheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastTable {
    /// Column headings.
    pub columns: Vec<String>,
    /// One row per interval, in input order.
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl ForecastTable {
    /// Builds the table from interval results.
    pub fn from_results(results: &[StaffingResult]) -> Self {
        let columns = [
            COLUMN_INTERVAL,
            COLUMN_INBOUND_CALLS,
            COLUMN_WORKLOAD,
            COLUMN_AGENTS_NO_SHRINKAGE,
            COLUMN_AGENTS_WITH_SHRINKAGE,
        ]
        .iter()
        .map(|c| c.to_string())
        .collect();

        let rows = results
            .iter()
            .map(|r| {
                vec![
                    serde_json::json!(r.interval_id),
                    serde_json::json!(r.inbound_calls),
                    serde_json::json!(r.workload_erlangs),
                    serde_json::json!(r.agents_no_shrinkage),
                    serde_json::json!(r.agents_with_shrinkage),
                ]
            })
            .collect();

        Self { columns, rows }
    }
}

/// Response body for the `/wait-probability` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitProbabilityResponse {
    /// Probability of waiting longer than the target answer time.
    pub wait_probability: f64,
    /// Erlang C probability of waiting at all.
    pub erlang_c_probability: f64,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::ProfileNotFound { name } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "PROFILE_NOT_FOUND",
                    message,
                    format!("No parameter profile named '{}' is configured", name),
                ),
            ),
            EngineError::InvalidParameter { field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "VALIDATION_ERROR",
                    message,
                    format!("Parameter '{}' is outside its accepted range", field),
                ),
            ),
            EngineError::InvalidInterval { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_INTERVAL",
                    message,
                    "The interval data contains invalid information",
                ),
            ),
            EngineError::ShrinkageSaturation { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "SHRINKAGE_SATURATION",
                    message,
                    "Shrinkage must be below 100%",
                ),
            ),
            EngineError::CalculationError { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}
