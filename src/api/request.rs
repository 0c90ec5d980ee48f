//! Request types for the parental leave planner API.
//!
//! This module defines the JSON request structures for the `/optimize`,
//! `/benefits` and `/suggestions` endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Household, Preferences, Tenure};

/// Request body for the `/optimize` endpoint.
///
/// Carries the household's circumstances and the requested plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeRequest {
    /// The requested leave plan.
    pub preferences: Preferences,
    /// Incomes, custody and employment details.
    pub household: Household,
}

/// Request body for the `/benefits` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenefitsRequest {
    /// Parent 1's monthly income in kronor.
    pub income1: i64,
    /// Parent 2's monthly income in kronor.
    #[serde(default)]
    pub income2: i64,
    /// Whether parent 1's employer has a collective agreement.
    #[serde(default)]
    pub agreement1: bool,
    /// Whether parent 2's employer has a collective agreement.
    #[serde(default)]
    pub agreement2: bool,
    /// Parent 1's employment tenure.
    #[serde(default)]
    pub tenure1: Tenure,
    /// Parent 2's employment tenure.
    #[serde(default)]
    pub tenure2: Tenure,
}

/// Request body for the `/suggestions` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionsRequest {
    /// The baseline plan.
    pub preferences: Preferences,
    /// Incomes, custody and employment details.
    pub household: Household,
    /// Total months to split between the parents.
    pub total_months: Decimal,
    /// Split increment in months.
    #[serde(default)]
    pub step: Option<Decimal>,
}
