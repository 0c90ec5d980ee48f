//! Timeline projection.
//!
//! Expands an [`AllocationResult`] into one [`WeekEntry`] per week of the
//! horizon. Each week is classified by half-open range membership, first
//! match wins:
//!
//! 1. The overlap period
//! 2. One of parent 1's phases
//! 3. One of parent 2's phases
//! 4. After leave
//!
//! Generation is pure and linear in the number of weeks, so it can run on
//! every pointer move while a boundary is dragged.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::config::BenefitConfig;
use crate::models::{
    AllocationResult, HighlightRange, IncomeComponents, IncomeSeverity, Parent, PeriodLabel,
    PhaseKind, Plan, WeekEntry,
};

/// Options controlling timeline generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineOptions {
    /// The minimum number of weeks in the series.
    pub min_weeks: u32,
    /// The child's date of birth; dates the weeks when present.
    pub child_date: Option<NaiveDate>,
    /// Shortfall ratio above which a week is an error rather than a warning.
    pub severity_error_ratio: Decimal,
}

impl TimelineOptions {
    /// Creates options from the scheme configuration.
    pub fn from_config(config: &BenefitConfig, child_date: Option<NaiveDate>) -> Self {
        Self {
            min_weeks: config.allocation.timeline_min_weeks,
            child_date,
            severity_error_ratio: config.allocation.severity_error_ratio,
        }
    }
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self::from_config(&BenefitConfig::default(), None)
    }
}

/// One week's classification and income breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ProjectedWeek {
    pub period: PeriodLabel,
    pub parent1: IncomeComponents,
    pub parent2: IncomeComponents,
}

impl ProjectedWeek {
    pub fn combined_income(&self) -> i64 {
        self.parent1.total() + self.parent2.total()
    }
}

/// Returns the number of weeks the timeline covers.
///
/// This is the last week any plan or the overlap reaches, but at least
/// `min_weeks`.
pub fn horizon(result: &AllocationResult, min_weeks: u32) -> u32 {
    let plans_end = [Parent::First, Parent::Second]
        .into_iter()
        .flat_map(|parent| result.phases(parent))
        .filter(|plan| !plan.is_empty())
        .map(|plan| plan.end_week())
        .max()
        .unwrap_or(0);
    let overlap_end = result.overlap_plan.start_week + result.overlap_plan.weeks;
    plans_end.max(overlap_end).max(min_weeks)
}

/// Generates the week-by-week timeline for an allocation.
///
/// # Arguments
///
/// * `result` - The allocation to project
/// * `options` - Horizon floor, child date and severity ratio
///
/// # Returns
///
/// One entry per week from 0 to the horizon. Identical inputs always give
/// identical output.
///
/// # Example
///
/// ```
/// use parental_leave_planner::calculation::{TimelineOptions, allocate, generate};
/// use parental_leave_planner::config::BenefitConfig;
/// use parental_leave_planner::models::{CustodyType, Household, LeaveMonths, PeriodLabel, Preferences};
/// use rust_decimal::Decimal;
///
/// let preferences = Preferences {
///     part_time: false,
///     leave_months: LeaveMonths { parent1: Decimal::from(6), parent2: Decimal::from(6) },
///     minimum_combined_income: 10000,
///     strategy: Default::default(),
/// };
/// let household = Household::new(30000, 30000, CustodyType::Joint);
/// let result = allocate(&preferences, &household, &BenefitConfig::default()).unwrap();
///
/// let entries = generate(&result, &TimelineOptions::default());
/// assert_eq!(entries.len(), 60);
/// assert_eq!(entries[0].period, PeriodLabel::Overlap);
/// assert_eq!(entries[59].period, PeriodLabel::AfterLeave);
/// ```
pub fn generate(result: &AllocationResult, options: &TimelineOptions) -> Vec<WeekEntry> {
    let weeks = horizon(result, options.min_weeks);
    let floor = result.minimum_combined_income;

    (0..weeks)
        .map(|week| {
            let projected = project_week(result, week);
            let combined_income = projected.combined_income();
            WeekEntry {
                week_index: week,
                week_start: options
                    .child_date
                    .and_then(|date| date.checked_add_days(Days::new(7 * u64::from(week)))),
                combined_income,
                parent1_income: projected.parent1.total(),
                parent2_income: projected.parent2.total(),
                period: projected.period,
                parent1_components: projected.parent1,
                parent2_components: projected.parent2,
                severity: severity(combined_income, floor, options.severity_error_ratio),
            }
        })
        .collect()
}

/// Classifies one week and breaks down both parents' income.
pub(crate) fn project_week(result: &AllocationResult, week: u32) -> ProjectedWeek {
    if result.includes_partner && result.overlap_plan.contains_week(week) {
        let overlap = &result.overlap_plan;
        let parent1 = match first_nonempty(result, Parent::First) {
            Some(plan) if overlap.days_per_week > 0 => leave_components(result, overlap.income, plan.supplement),
            _ => work_components(result, Parent::First),
        };
        return ProjectedWeek {
            period: PeriodLabel::Overlap,
            parent1,
            parent2: leave_components(result, overlap.partner_income, result.supplement2),
        };
    }

    for parent in [Parent::First, Parent::Second] {
        if let Some(plan) = result
            .phases(parent)
            .into_iter()
            .find(|plan| plan.contains_week(week))
        {
            let on_leave = leave_components(result, plan.income, plan.supplement);
            let working = work_components(result, parent.other());
            let (parent1, parent2) = match parent {
                Parent::First => (on_leave, working),
                Parent::Second => (working, on_leave),
            };
            return ProjectedWeek {
                period: PeriodLabel::Leave {
                    parent,
                    phase: plan.phase,
                    transferred: is_transferred_week(result, parent, week),
                },
                parent1,
                parent2,
            };
        }
    }

    ProjectedWeek {
        period: PeriodLabel::AfterLeave,
        parent1: work_components(result, Parent::First),
        parent2: work_components(result, Parent::Second),
    }
}

fn first_nonempty(result: &AllocationResult, parent: Parent) -> Option<Plan> {
    result
        .phases(parent)
        .into_iter()
        .find(|plan| !plan.is_empty())
}

fn leave_components(result: &AllocationResult, income: i64, supplement: i64) -> IncomeComponents {
    let child_allowance = result.child_allowance_per_parent;
    let multi_child_supplement = result.multi_child_supplement_per_parent;
    IncomeComponents {
        benefit: income - supplement - child_allowance - multi_child_supplement,
        supplement,
        child_allowance,
        multi_child_supplement,
        salary: 0,
    }
}

fn work_components(result: &AllocationResult, parent: Parent) -> IncomeComponents {
    let working = result.working_income(parent);
    if working == 0 {
        return IncomeComponents::default();
    }
    let child_allowance = result.child_allowance_per_parent;
    let multi_child_supplement = result.multi_child_supplement_per_parent;
    IncomeComponents {
        benefit: 0,
        supplement: 0,
        child_allowance,
        multi_child_supplement,
        salary: working - child_allowance - multi_child_supplement,
    }
}

/// Returns true if `week` is paid from days the parent received by transfer.
///
/// Received days are spent last, so they cover the final
/// `ceil(received / income_days_per_week)` income-level weeks.
fn is_transferred_week(result: &AllocationResult, parent: Parent, week: u32) -> bool {
    let received = result.received_days(parent);
    let per_week = result.day_choice(parent).income_days_per_week;
    if received == 0 || per_week == 0 {
        return false;
    }

    let phases = result.phases(parent);
    let income_weeks: u32 = phases
        .iter()
        .filter(|plan| plan.phase != PhaseKind::MinimumRate)
        .map(|plan| plan.weeks)
        .sum();
    let transferred_weeks = received.div_ceil(per_week).min(income_weeks);
    let end = phases[0].start_week + income_weeks;
    week >= end - transferred_weeks && week < end
}

fn severity(combined_income: i64, floor: i64, error_ratio: Decimal) -> Option<IncomeSeverity> {
    if floor <= 0 || combined_income >= floor {
        return None;
    }
    let shortfall = Decimal::from(floor - combined_income) / Decimal::from(floor);
    if shortfall > error_ratio {
        Some(IncomeSeverity::Error)
    } else {
        Some(IncomeSeverity::Warning)
    }
}

/// Groups consecutive weeks with the same severity into ranges.
///
/// # Example
///
/// ```
/// use parental_leave_planner::calculation::highlight_ranges;
///
/// assert!(highlight_ranges(&[]).is_empty());
/// ```
pub fn highlight_ranges(entries: &[WeekEntry]) -> Vec<HighlightRange> {
    let mut ranges: Vec<HighlightRange> = Vec::new();

    for entry in entries {
        let Some(severity) = entry.severity else {
            continue;
        };
        match ranges.last_mut() {
            Some(last) if last.end == entry.week_index && last.severity == severity => {
                last.end = entry.week_index + 1;
            }
            _ => ranges.push(HighlightRange {
                start: entry.week_index,
                end: entry.week_index + 1,
                severity,
            }),
        }
    }

    ranges
}
