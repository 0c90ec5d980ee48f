//! Calculation logic for the parental leave planner.
//!
//! This module contains the benefit rules (daily rate, monthly income,
//! employer supplement, child allowance), the per-parent day ledger, the
//! leave allocator with its day search, phase split and feasibility
//! re-check, the week-by-week timeline with boundary dragging, and the
//! strategy summaries built on top.

mod allocator;
mod boundary_drag;
mod child_allowance;
mod daily_rate;
mod day_pool;
mod day_search;
mod employer_supplement;
mod feasibility;
mod monthly_income;
mod phase_builder;
mod rounding;
mod strategy;
mod timeline;

pub use allocator::{MAX_LEAVE_MONTHS, MAX_MONTHLY_AMOUNT, allocate};
pub use boundary_drag::{
    DragBoundary, DragEvent, DragHandle, DragState, TimelineEditor, drag_handles,
    reslice_parent1, transition,
};
pub use child_allowance::{ChildAllowance, child_allowance, resolve_child_allowance};
pub use daily_rate::daily_rate;
pub use day_pool::{DayBalance, DayKind, DayPool};
pub use day_search::{SearchInput, SearchOutcome, initial_days_per_week, search_days};
pub use employer_supplement::{employer_supplement, supplement_for, supplement_weeks};
pub use feasibility::{FeasibilityCheck, recheck_feasibility};
pub use monthly_income::{monthly_income, monthly_income_mixed};
pub use phase_builder::{PhaseInput, PhaseSplitResult, build_phases};
pub use strategy::{
    Alternative, ParentSummary, StrategySummary, Suggestions, suggest_alternatives, summarize,
};
pub use timeline::{TimelineOptions, generate, highlight_ranges, horizon};
