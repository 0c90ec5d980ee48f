//! Core data models for the parental leave planner.
//!
//! This module contains all the domain models used throughout the engine.

mod allocation_result;
mod family;
mod household;
mod plan;
mod timeline;

pub use allocation_result::{
    AllocationResult, AuditStep, AuditTrace, AuditWarning, FeasibilityVerdict, Shortfall,
};
pub use family::FamilyPreset;
pub use household::{CustodyType, Household, LeaveMonths, Parent, Preferences, Strategy, Tenure};
pub use plan::{DayChoice, OverlapPlan, PhaseKind, Plan};
pub use timeline::{HighlightRange, IncomeComponents, IncomeSeverity, PeriodLabel, WeekEntry};
