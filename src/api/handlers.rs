//! HTTP request handlers for the staffing API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{erlang_c_probability, run_forecast, wait_probability};
use crate::error::{EngineError, EngineResult};
use crate::models::{ForecastResult, ModelParameters};

use super::request::{ForecastRequest, WaitProbabilityRequest};
use super::response::{ApiError, ApiErrorResponse, ForecastTable, WaitProbabilityResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/forecast", post(forecast_handler))
        .route("/forecast/table", post(forecast_table_handler))
        .route("/wait-probability", post(wait_probability_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    ApiErrorResponse::from(err).into_response()
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Resolves and runs a forecast, logging the outcome.
fn compute_forecast(
    state: &AppState,
    request: ForecastRequest,
    correlation_id: Uuid,
) -> EngineResult<ForecastResult> {
    let input = state.resolve_forecast(request)?;
    let result = run_forecast(&input)?;

    if result.totals.unresolved_intervals > 0 {
        warn!(
            correlation_id = %correlation_id,
            unresolved_intervals = result.totals.unresolved_intervals,
            search_cap = input.search.cap,
            "Some intervals exceed the agent search range"
        );
    }
    info!(
        correlation_id = %correlation_id,
        config = %state.config().metadata().name,
        forecast_id = %result.forecast_id,
        intervals = result.totals.interval_count,
        peak_agents_with_shrinkage = result.totals.peak_agents_with_shrinkage,
        duration_us = result.audit_trace.duration_us,
        "Forecast completed successfully"
    );
    Ok(result)
}

/// Handler for POST /forecast.
///
/// Returns the full forecast result with totals and audit trace.
async fn forecast_handler(
    State(state): State<AppState>,
    payload: Result<Json<ForecastRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing forecast request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match compute_forecast(&state, request, correlation_id) {
        Ok(result) => json_response(StatusCode::OK, result),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /forecast/table.
///
/// Returns the forecast in spreadsheet column layout.
async fn forecast_table_handler(
    State(state): State<AppState>,
    payload: Result<Json<ForecastRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing forecast table request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match compute_forecast(&state, request, correlation_id) {
        Ok(result) => json_response(StatusCode::OK, ForecastTable::from_results(&result.intervals)),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /wait-probability.
///
/// Evaluates the Erlang C model for a single load and agent count.
async fn wait_probability_handler(
    payload: Result<Json<WaitProbabilityRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match evaluate_wait_probability(&request) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(err) => error_response(correlation_id, err),
    }
}

fn evaluate_wait_probability(
    request: &WaitProbabilityRequest,
) -> EngineResult<WaitProbabilityResponse> {
    if !request.traffic_intensity.is_finite() || request.traffic_intensity < 0.0 {
        return Err(EngineError::invalid_parameter(
            "traffic_intensity",
            format!(
                "must be a non-negative number of Erlangs, got {}",
                request.traffic_intensity
            ),
        ));
    }
    let parameters = ModelParameters::new(
        request.average_handle_time_seconds,
        request.target_answer_time_seconds,
    )?;

    Ok(WaitProbabilityResponse {
        wait_probability: wait_probability(
            request.traffic_intensity,
            request.agents,
            parameters.target_answer_time_seconds(),
            parameters.average_handle_time_seconds(),
        ),
        erlang_c_probability: erlang_c_probability(request.traffic_intensity, request.agents),
    })
}
