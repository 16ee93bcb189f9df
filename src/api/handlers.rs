//! HTTP request handlers for the HR cost engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::import::template_headers;
use crate::models::AllowanceType;
use crate::reports::{build_cost_report, compare_employees, summarize_workforce};

use super::request::{CostReportRequest, WorkforceRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/cost-report", post(cost_report_handler))
        .route("/workforce-summary", post(workforce_summary_handler))
        .route("/comparison", post(comparison_handler))
        .route("/allowance-types", get(allowance_types_handler))
        .route("/import-template", get(import_template_handler))
        .with_state(state)
}

/// Body of `GET /allowance-types`.
#[derive(Debug, Serialize)]
struct AllowanceTypesResponse<'a> {
    currency_label: &'a str,
    allowance_types: &'a [AllowanceType],
}

/// Body of `GET /import-template`.
#[derive(Debug, Serialize)]
struct ImportTemplateResponse {
    headers: Vec<String>,
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request rejected"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
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

fn report_date(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| Utc::now().date_naive())
}

/// Handler for POST /cost-report.
///
/// Accepts one employee and returns the full cost report.
async fn cost_report_handler(
    State(state): State<AppState>,
    payload: Result<Json<CostReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing cost report request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = state.config();
    let employee = match request.employee.into_employee(config) {
        Ok(employee) => employee,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    let report = build_cost_report(&employee, config, report_date(request.as_of));
    info!(
        correlation_id = %correlation_id,
        employee_number = %employee.employee_number,
        allowances_count = report.allowances.len(),
        annual_total_cost = %report.totals.annual_total_cost,
        duration_us = start_time.elapsed().as_micros(),
        "Cost report completed"
    );
    json_response(StatusCode::OK, report)
}

/// Handler for POST /workforce-summary.
async fn workforce_summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<WorkforceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing workforce summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = state.config();
    let (employees, filter, as_of) = match request.into_parts(config) {
        Ok(parts) => parts,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    let selected = filter.apply(&employees);
    let summary = summarize_workforce(&selected, config, report_date(as_of));
    info!(
        correlation_id = %correlation_id,
        submitted = employees.len(),
        selected = selected.len(),
        total_annual_cost = %summary.totals.total_annual_cost,
        recent_hires = summary.recent_hires.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Workforce summary completed"
    );
    json_response(StatusCode::OK, summary)
}

/// Handler for POST /comparison.
async fn comparison_handler(
    State(state): State<AppState>,
    payload: Result<Json<WorkforceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing comparison request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = state.config();
    let (employees, filter, as_of) = match request.into_parts(config) {
        Ok(parts) => parts,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let rows = compare_employees(&filter.apply(&employees), config.training_policy(), report_date(as_of));
    info!(
        correlation_id = %correlation_id,
        rows = rows.len(),
        "Comparison completed"
    );
    json_response(StatusCode::OK, rows)
}

/// Handler for GET /allowance-types.
async fn allowance_types_handler(State(state): State<AppState>) -> Response {
    let config = state.config();
    json_response(
        StatusCode::OK,
        AllowanceTypesResponse {
            currency_label: &config.metadata().currency_label,
            allowance_types: config.allowance_types(),
        },
    )
}

/// Handler for GET /import-template.
async fn import_template_handler(State(state): State<AppState>) -> Response {
    json_response(
        StatusCode::OK,
        ImportTemplateResponse {
            headers: template_headers(state.config()),
        },
    )
}
