//! HTTP request handlers for the parental leave planner API.
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
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    MAX_MONTHLY_AMOUNT, TimelineOptions, allocate, daily_rate, generate, highlight_ranges,
    monthly_income, suggest_alternatives, summarize, supplement_for,
};
use crate::config::{BenefitConfig, ConfigLoader};
use crate::error::EngineResult;
use crate::models::{Household, Preferences, Tenure};

use super::request::{BenefitsRequest, OptimizeRequest, SuggestionsRequest};
use super::response::{
    ApiError, ApiErrorResponse, BenefitsResponse, OptimizeResponse, ParentBenefits,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/optimize", post(optimize_handler))
        .route("/benefits", post(benefits_handler))
        .route("/suggestions", post(suggestions_handler))
        .route("/families", get(families_handler))
        .with_state(state)
}

/// Handler for POST /optimize endpoint.
///
/// Allocates the household's leave and returns the plans together with the
/// weekly income series and a summary.
async fn optimize_handler(
    State(state): State<AppState>,
    payload: Result<Json<OptimizeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing optimize request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match perform_optimize(&request.preferences, &request.household, state.config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                feasible = result.allocation.feasibility.is_feasible,
                weeks = result.timeline.len(),
                duration_us = result.duration_us,
                "Optimization completed successfully"
            );
            json_response(result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Optimization failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /benefits endpoint.
///
/// Returns daily rates, full-time monthly benefit and employer supplement
/// for two incomes.
async fn benefits_handler(
    State(state): State<AppState>,
    payload: Result<Json<BenefitsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing benefits request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    if request.income1 < 0 || request.income2 < 0 {
        warn!(correlation_id = %correlation_id, "Negative income in benefits request");
        return error_response(ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::validation_error("incomes must not be negative"),
        });
    }
    if request.income1 > MAX_MONTHLY_AMOUNT || request.income2 > MAX_MONTHLY_AMOUNT {
        warn!(correlation_id = %correlation_id, "Income out of range in benefits request");
        return error_response(ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::validation_error(format!(
                "incomes must not exceed {}",
                MAX_MONTHLY_AMOUNT
            )),
        });
    }

    let config = state.config().config();
    let response = BenefitsResponse {
        parent1: parent_benefits(
            request.income1,
            request.agreement1,
            request.tenure1,
            config,
        ),
        parent2: parent_benefits(
            request.income2,
            request.agreement2,
            request.tenure2,
            config,
        ),
    };

    info!(
        correlation_id = %correlation_id,
        daily_rate1 = response.parent1.daily_rate,
        daily_rate2 = response.parent2.daily_rate,
        "Benefits computed"
    );
    json_response(response)
}

/// Handler for POST /suggestions endpoint.
///
/// Splits a total duration between the parents and returns the best
/// alternatives to the requested plan.
async fn suggestions_handler(
    State(state): State<AppState>,
    payload: Result<Json<SuggestionsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing suggestions request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    match suggest_alternatives(
        &request.preferences,
        &request.household,
        state.config().config(),
        request.total_months,
        request.step,
    ) {
        Ok(suggestions) => {
            let has_alternative = suggestions.most_remaining_days.is_some()
                || suggestions.highest_income.is_some();
            info!(
                correlation_id = %correlation_id,
                total_months = %request.total_months,
                has_alternative,
                duration_us = start_time.elapsed().as_micros(),
                "Suggestions computed"
            );
            json_response(suggestions)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Suggestions failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for GET /families endpoint.
///
/// Lists the family presets shipped with the scheme configuration.
async fn families_handler(State(state): State<AppState>) -> Response {
    let families = state.config().families();
    info!(count = families.len(), "Listing family presets");
    json_response(families)
}

/// Runs the allocation and builds the full optimize response.
fn perform_optimize(
    preferences: &Preferences,
    household: &Household,
    config: &ConfigLoader,
) -> EngineResult<OptimizeResponse> {
    let start_time = Instant::now();
    let scheme = config.config();

    let mut allocation = allocate(preferences, household, scheme)?;
    allocation.audit_trace.duration_us = start_time.elapsed().as_micros() as u64;
    let options = TimelineOptions::from_config(scheme, household.child_date);
    let timeline = generate(&allocation, &options);
    let ranges = highlight_ranges(&timeline);
    let summary = summarize(&allocation, &scheme.rates);

    Ok(OptimizeResponse {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        duration_us: start_time.elapsed().as_micros() as u64,
        allocation,
        timeline,
        highlight_ranges: ranges,
        summary,
    })
}

fn parent_benefits(
    income: i64,
    has_agreement: bool,
    tenure: Tenure,
    config: &BenefitConfig,
) -> ParentBenefits {
    let rate = daily_rate(income, &config.rates);
    ParentBenefits {
        income,
        daily_rate: rate,
        monthly_benefit: monthly_income(rate, 7, 0, 0, 0, &config.rates),
        supplement: supplement_for(income, has_agreement, tenure, &config.supplement),
    }
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
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
    error_response(ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    })
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn json_response<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
