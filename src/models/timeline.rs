//! Timeline models.
//!
//! The timeline is a week-by-week projection of an allocation, one
//! [`WeekEntry`] per week of the horizon.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Parent, PhaseKind};

/// What the household is doing in a given week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PeriodLabel {
    /// Both parents are on leave around the birth.
    Overlap,
    /// One parent is on leave while the other works.
    Leave {
        /// The parent on leave.
        parent: Parent,
        /// The phase of that parent's schedule.
        phase: PhaseKind,
        /// True if the week is paid from days received by transfer.
        transferred: bool,
    },
    /// Both parents are back at work.
    AfterLeave,
}

impl PeriodLabel {
    /// Returns a short human-readable description of the period.
    ///
    /// # Examples
    ///
    /// ```
    /// use parental_leave_planner::models::{Parent, PeriodLabel, PhaseKind};
    ///
    /// let label = PeriodLabel::Leave {
    ///     parent: Parent::First,
    ///     phase: PhaseKind::NoSupplement,
    ///     transferred: false,
    /// };
    /// assert_eq!(label.describe(), "Parent 1 on leave (without employer supplement)");
    /// ```
    pub fn describe(&self) -> String {
        match self {
            PeriodLabel::Overlap => "Both parents on leave".to_string(),
            PeriodLabel::AfterLeave => "After leave".to_string(),
            PeriodLabel::Leave {
                parent,
                phase,
                transferred,
            } => {
                let suffix = match (phase, transferred) {
                    (_, true) => " (transferred days)",
                    (PhaseKind::WithSupplement, false) => "",
                    (PhaseKind::NoSupplement, false) => " (without employer supplement)",
                    (PhaseKind::MinimumRate, false) => " (minimum level)",
                };
                format!("Parent {} on leave{}", parent.number(), suffix)
            }
        }
    }
}

/// The parts making up one parent's monthly income in a given week.
///
/// The components always sum to the parent's income for the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IncomeComponents {
    /// Parental benefit, SEK per month.
    pub benefit: i64,
    /// Employer supplement, SEK per month.
    pub supplement: i64,
    /// Child allowance, SEK per month.
    pub child_allowance: i64,
    /// Multi-child supplement, SEK per month.
    pub multi_child_supplement: i64,
    /// Salary, SEK per month.
    pub salary: i64,
}

impl IncomeComponents {
    /// Returns the sum of all components.
    pub fn total(&self) -> i64 {
        self.benefit
            + self.supplement
            + self.child_allowance
            + self.multi_child_supplement
            + self.salary
    }
}

/// How far a week's combined income falls below the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeSeverity {
    /// Below the floor by at most the configured ratio.
    Warning,
    /// Below the floor by more than the configured ratio.
    Error,
}

/// One week of the projected timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekEntry {
    /// 0-based week index from the start of leave.
    pub week_index: u32,
    /// The date the week starts, when a child date is known.
    pub week_start: Option<NaiveDate>,
    /// Combined household income for the week, SEK per month.
    pub combined_income: i64,
    /// Parent 1's income for the week, SEK per month.
    pub parent1_income: i64,
    /// Parent 2's income for the week, SEK per month.
    pub parent2_income: i64,
    /// What the household is doing this week.
    pub period: PeriodLabel,
    /// Breakdown of parent 1's income.
    pub parent1_components: IncomeComponents,
    /// Breakdown of parent 2's income.
    pub parent2_components: IncomeComponents,
    /// Set when the combined income is below the floor.
    pub severity: Option<IncomeSeverity>,
}

/// A half-open run of consecutive weeks sharing one severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightRange {
    /// First week of the range.
    pub start: u32,
    /// First week after the range.
    pub end: u32,
    /// The shared severity.
    pub severity: IncomeSeverity,
}
