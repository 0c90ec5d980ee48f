//! Error types for the parental leave planner.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing benefits and
//! allocating leave.

use thiserror::Error;

use crate::models::Parent;

/// The main error type for the parental leave planner.
///
/// Income shortfalls are never errors: they are reported through
/// [`FeasibilityVerdict`](crate::models::FeasibilityVerdict). Only malformed
/// input, configuration problems and (under the `fail` exhaustion policy)
/// physically impossible plans surface here.
///
/// # Example
///
/// ```
/// use parental_leave_planner::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/benefits.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/benefits.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An input value was negative or otherwise unusable.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The requested leave cannot be covered by the parent's benefit days,
    /// even after transfers.
    #[error(
        "Not enough benefit days for {parent}: {weeks} weeks at {days_per_week} days/week needs {days_needed} days, {days_available} available"
    )]
    ExhaustedDays {
        /// The parent whose days ran out.
        parent: Parent,
        /// The requested leave duration in weeks.
        weeks: u32,
        /// The chosen number of benefit days per week.
        days_per_week: u32,
        /// Total days the request needs.
        days_needed: u32,
        /// Income-level plus minimum-level days available after transfers.
        days_available: u32,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
