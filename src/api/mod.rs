//! HTTP API module for the parental leave planner.
//!
//! This module provides the REST API endpoints for computing benefits,
//! allocating leave and suggesting alternative splits.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BenefitsRequest, OptimizeRequest, SuggestionsRequest};
pub use response::{ApiError, BenefitsResponse, OptimizeResponse, ParentBenefits};
pub use state::AppState;
