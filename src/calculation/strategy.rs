//! Strategy summaries and alternative splits.
//!
//! [`summarize`] condenses an allocation into the figures used to compare
//! plans. [`suggest_alternatives`] splits a total leave duration between the
//! parents in fixed steps, allocates every split and picks the one leaving
//! the most days and the one paying the most.

use std::cmp::Ordering;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{BenefitConfig, RateConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{AllocationResult, Household, LeaveMonths, Parent, PeriodLabel, Preferences};

use super::allocator::{MAX_LEAVE_MONTHS, allocate};
use super::rounding::{round_kronor, weeks_to_months};
use super::timeline::{horizon, project_week};

/// Splits within this many months of the requested split count as the same.
const SAME_SPLIT_TOLERANCE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Upper bound on the number of splits evaluated per request.
const MAX_SPLITS: u32 = 240;

/// One parent's share of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentSummary {
    /// Weeks of leave.
    pub weeks: u32,
    /// Months of leave, one decimal.
    pub months: Decimal,
    /// Weighted average household income while this parent is on leave.
    pub average_combined_income: i64,
    /// Income-level days used, overlap included.
    pub used_income_days: u32,
    /// Minimum-level days used, overlap included.
    pub used_min_days: u32,
    /// Income-level days left.
    pub remaining_income_days: u32,
    /// Minimum-level days left.
    pub remaining_min_days: u32,
}

/// The figures used to compare plans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategySummary {
    /// Parent 1's share.
    pub parent1: ParentSummary,
    /// Parent 2's share.
    pub parent2: ParentSummary,
    /// Weighted average household income over both parents' leave.
    pub average_combined_income: i64,
    /// Household income over the whole leave, overlap included, SEK.
    pub total_income: i64,
    /// Days of either kind left to both parents.
    pub total_remaining_days: u32,
}

/// One alternative split of the total leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    /// Months of leave for parent 1.
    pub parent1_months: Decimal,
    /// Months of leave for parent 2.
    pub parent2_months: Decimal,
    /// The split's summary.
    pub summary: StrategySummary,
    /// Total income compared to the requested split, SEK.
    pub income_gain: i64,
    /// Remaining days compared to the requested split.
    pub remaining_days_gain: i64,
}

/// The outcome of the alternative search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestions {
    /// The summary of the requested split.
    pub baseline: StrategySummary,
    /// The split leaving the most days.
    pub most_remaining_days: Option<Alternative>,
    /// The split paying the most in total.
    pub highest_income: Option<Alternative>,
    /// Set when no split improves on the requested one.
    pub message: Option<String>,
}

/// Summarizes an allocation.
///
/// # Arguments
///
/// * `result` - The allocation to summarize
/// * `rates` - The rate constants, for the weeks-per-month conversion
pub fn summarize(result: &AllocationResult, rates: &RateConfig) -> StrategySummary {
    let parent1 = parent_summary(result, Parent::First, rates);
    let parent2 = parent_summary(result, Parent::Second, rates);

    let weighted: Vec<(i64, u32)> = [Parent::First, Parent::Second]
        .into_iter()
        .flat_map(|parent| phase_incomes(result, parent))
        .collect();

    StrategySummary {
        average_combined_income: weighted_average(&weighted),
        total_income: total_income(result, rates),
        total_remaining_days: parent1.remaining_income_days
            + parent1.remaining_min_days
            + parent2.remaining_income_days
            + parent2.remaining_min_days,
        parent1,
        parent2,
    }
}

fn parent_summary(result: &AllocationResult, parent: Parent, rates: &RateConfig) -> ParentSummary {
    let weeks = result.total_weeks(parent);
    ParentSummary {
        weeks,
        months: weeks_to_months(weeks, rates.weeks_per_month),
        average_combined_income: weighted_average(&phase_incomes(result, parent)),
        used_income_days: result.used_income_days(parent),
        used_min_days: result.used_min_days(parent),
        remaining_income_days: result.remaining_income_days(parent),
        remaining_min_days: result.remaining_min_days(parent),
    }
}

/// Combined household income and length of each non-empty phase.
fn phase_incomes(result: &AllocationResult, parent: Parent) -> Vec<(i64, u32)> {
    let counterpart = result.counterpart_income(parent);
    result
        .phases(parent)
        .into_iter()
        .filter(|plan| !plan.is_empty())
        .map(|plan| (plan.income + counterpart, plan.weeks))
        .collect()
}

fn weighted_average(values: &[(i64, u32)]) -> i64 {
    let weeks: u32 = values.iter().map(|(_, weeks)| weeks).sum();
    if weeks == 0 {
        return 0;
    }
    let sum: Decimal = values
        .iter()
        .map(|(income, weeks)| Decimal::from(*income) * Decimal::from(*weeks))
        .sum();
    round_kronor(sum / Decimal::from(weeks))
}

/// Household income over every leave week, converting monthly to weekly.
fn total_income(result: &AllocationResult, rates: &RateConfig) -> i64 {
    if rates.weeks_per_month.is_zero() {
        return 0;
    }
    let monthly: i64 = (0..horizon(result, 0))
        .map(|week| project_week(result, week))
        .filter(|week| week.period != PeriodLabel::AfterLeave)
        .map(|week| week.combined_income())
        .sum();
    round_kronor(Decimal::from(monthly) / rates.weeks_per_month)
}

/// Suggests alternative splits of a total leave duration.
///
/// # Arguments
///
/// * `preferences` - The requested plan; its split is the baseline
/// * `household` - The household, which must include a partner
/// * `config` - The scheme configuration
/// * `total_months` - The duration to split between the parents
/// * `step` - Split increment in months; 1 by default, 0.5 for two months or less
///
/// # Returns
///
/// The baseline summary and the best alternatives. Splits that fail, miss
/// the income floor, match the baseline or improve on nothing are dropped.
pub fn suggest_alternatives(
    preferences: &Preferences,
    household: &Household,
    config: &BenefitConfig,
    total_months: Decimal,
    step: Option<Decimal>,
) -> EngineResult<Suggestions> {
    if !household.includes_partner() {
        return Err(EngineError::InvalidInput {
            field: "household".to_string(),
            message: "alternative splits need a partner under joint custody".to_string(),
        });
    }
    if total_months <= Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "total_months".to_string(),
            message: format!("must be positive, got {}", total_months),
        });
    }
    let max_total = MAX_LEAVE_MONTHS * Decimal::from(2);
    if total_months > max_total {
        return Err(EngineError::InvalidInput {
            field: "total_months".to_string(),
            message: format!("must not exceed {} months, got {}", max_total, total_months),
        });
    }
    let step = step.unwrap_or_else(|| {
        if total_months > Decimal::from(2) {
            Decimal::ONE
        } else {
            Decimal::new(5, 1)
        }
    });
    if step <= Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "step".to_string(),
            message: format!("must be positive, got {}", step),
        });
    }

    let iterations = total_months
        .checked_div(step)
        .and_then(|n| {
            n.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_u32()
        })
        .unwrap_or(u32::MAX);
    if iterations > MAX_SPLITS {
        return Err(EngineError::InvalidInput {
            field: "step".to_string(),
            message: format!(
                "{} months in steps of {} gives more than {} splits",
                total_months, step, MAX_SPLITS
            ),
        });
    }

    let baseline_result = allocate(preferences, household, config)?;
    let baseline = summarize(&baseline_result, &config.rates);

    let mut candidates = Vec::new();
    for i in 0..=iterations {
        let parent1_months = (Decimal::from(i) * step)
            .min(total_months)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let parent2_months = total_months - parent1_months;

        if (parent1_months - preferences.leave_months.parent1).abs() <= SAME_SPLIT_TOLERANCE
            && (parent2_months - preferences.leave_months.parent2).abs() <= SAME_SPLIT_TOLERANCE
        {
            continue;
        }

        let candidate_preferences = Preferences {
            leave_months: LeaveMonths {
                parent1: parent1_months,
                parent2: parent2_months,
            },
            ..preferences.clone()
        };
        let result = match allocate(&candidate_preferences, household, config) {
            Ok(result) => result,
            Err(error) => {
                debug!(%parent1_months, %parent2_months, error = %error, "Split skipped");
                continue;
            }
        };
        if !result.feasibility.is_feasible {
            continue;
        }

        let summary = summarize(&result, &config.rates);
        let income_gain = summary.total_income - baseline.total_income;
        let remaining_days_gain =
            i64::from(summary.total_remaining_days) - i64::from(baseline.total_remaining_days);
        if income_gain <= 1 && remaining_days_gain <= 0 {
            continue;
        }

        candidates.push(Alternative {
            parent1_months,
            parent2_months,
            summary,
            income_gain,
            remaining_days_gain,
        });
    }

    debug!(
        %total_months,
        %step,
        candidates = candidates.len(),
        "Alternative splits evaluated"
    );

    let most_remaining_days = best_by(&candidates, None, |a, b| {
        a.summary
            .total_remaining_days
            .cmp(&b.summary.total_remaining_days)
            .then(
                a.summary
                    .average_combined_income
                    .cmp(&b.summary.average_combined_income),
            )
    });
    let highest_income = best_by(&candidates, most_remaining_days.as_ref(), |a, b| {
        a.summary
            .total_income
            .cmp(&b.summary.total_income)
            .then(
                a.summary
                    .average_combined_income
                    .cmp(&b.summary.average_combined_income),
            )
            .then(
                a.summary
                    .total_remaining_days
                    .cmp(&b.summary.total_remaining_days),
            )
    })
    .or_else(|| most_remaining_days.clone());

    let message = candidates
        .is_empty()
        .then(|| "No alternative split improves on the requested plan.".to_string());

    Ok(Suggestions {
        baseline,
        most_remaining_days,
        highest_income,
        message,
    })
}

/// Returns the first best candidate under `compare`, skipping `exclude`.
fn best_by(
    candidates: &[Alternative],
    exclude: Option<&Alternative>,
    compare: impl Fn(&Alternative, &Alternative) -> Ordering,
) -> Option<Alternative> {
    candidates
        .iter()
        .filter(|candidate| {
            exclude.is_none_or(|excluded| excluded.parent1_months != candidate.parent1_months)
        })
        .fold(None::<&Alternative>, |best, candidate| match best {
            Some(best) if compare(candidate, best) != Ordering::Greater => Some(best),
            _ => Some(candidate),
        })
        .cloned()
}
