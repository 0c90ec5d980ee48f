//! Response types for the parental leave planner API.
//!
//! This module defines the success bodies of each endpoint, the error
//! response structures and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::StrategySummary;
use crate::error::EngineError;
use crate::models::{AllocationResult, HighlightRange, WeekEntry};

/// Response body for the `/optimize` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeResponse {
    /// Unique identifier of this calculation.
    pub calculation_id: Uuid,
    /// When the calculation ran.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// Wall-clock time spent in the calculation, in microseconds.
    pub duration_us: u64,
    /// The allocated plans and day balances.
    pub allocation: AllocationResult,
    /// The week-by-week income series.
    pub timeline: Vec<WeekEntry>,
    /// Consecutive weeks below the income floor.
    pub highlight_ranges: Vec<HighlightRange>,
    /// Per-parent and household summary of the allocation.
    pub summary: StrategySummary,
}

/// Benefit amounts for one parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentBenefits {
    /// Monthly income the amounts were computed from.
    pub income: i64,
    /// Benefit per income-level day.
    pub daily_rate: i64,
    /// Monthly benefit when drawing seven days per week.
    pub monthly_benefit: i64,
    /// Monthly employer supplement, 0 without an agreement.
    pub supplement: i64,
}

/// Response body for the `/benefits` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitsResponse {
    /// Amounts for parent 1.
    pub parent1: ParentBenefits,
    /// Amounts for parent 2.
    pub parent2: ParentBenefits,
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
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_INPUT",
                    format!("Invalid input field '{}': {}", field, message),
                    "The request contains values the planner cannot use",
                ),
            },
            EngineError::ExhaustedDays {
                parent,
                weeks,
                days_per_week,
                days_needed,
                days_available,
            } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "EXHAUSTED_DAYS",
                    format!(
                        "Leave for {} needs {} days: {} weeks at {} days per week",
                        parent, days_needed, weeks, days_per_week
                    ),
                    format!("Only {} benefit days are available", days_available),
                ),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}
