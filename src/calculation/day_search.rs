//! Days-per-week search.
//!
//! Finds the weekly day mix for one parent that keeps the combined household
//! income at or above the floor. The scan runs days per week upwards and,
//! for each, minimum-level days per week downwards from the most the
//! minimum-level balance can sustain. The first combination that meets the
//! floor wins. If none does, the parent takes the ceiling in income-level
//! days and the shortfall is reported.

use crate::config::RateConfig;
use crate::models::{AuditStep, DayChoice, Parent, Strategy};

use super::monthly_income::monthly_income_mixed;

/// Inputs to the search for one parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchInput {
    /// The parent being planned.
    pub parent: Parent,
    /// Benefit per income-level day, SEK.
    pub daily_rate: i64,
    /// Employer supplement, SEK per month.
    pub supplement: i64,
    /// Child allowance, SEK per month.
    pub child_allowance: i64,
    /// Multi-child supplement, SEK per month.
    pub multi_child_supplement: i64,
    /// The other parent's income while this parent is on leave, SEK per month.
    pub counterpart_income: i64,
    /// Requested leave in weeks.
    pub weeks: u32,
    /// Minimum-level days the parent has left.
    pub min_days_available: u32,
    /// First days-per-week value to try.
    pub start_days_per_week: u32,
    /// Days-per-week ceiling.
    pub max_days_per_week: u32,
    /// The required combined income, SEK per month.
    pub minimum_combined_income: i64,
}

/// The result of the search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The chosen day mix.
    pub choice: DayChoice,
    /// The parent's monthly income with that mix, supplement included.
    pub income: i64,
    /// The parent's income plus the counterpart's income.
    pub combined_income: i64,
    /// False if no combination met the floor and the fallback was used.
    pub found: bool,
    /// The audit step recording the search.
    pub audit_step: AuditStep,
}

/// Returns the days-per-week value the search starts from.
///
/// `Longer` starts at one day per week. `Maximize` starts at the rate that
/// spreads the income-level days evenly over the leave, at least one and at
/// most the ceiling. No leave means no days.
///
/// # Examples
///
/// ```
/// use parental_leave_planner::calculation::initial_days_per_week;
/// use parental_leave_planner::models::Strategy;
///
/// assert_eq!(initial_days_per_week(Strategy::Longer, 7, 195, 26), 1);
/// assert_eq!(initial_days_per_week(Strategy::Maximize, 7, 195, 26), 7);
/// assert_eq!(initial_days_per_week(Strategy::Maximize, 7, 195, 52), 3);
/// assert_eq!(initial_days_per_week(Strategy::Maximize, 5, 195, 0), 0);
/// ```
pub fn initial_days_per_week(
    strategy: Strategy,
    max_days_per_week: u32,
    income_days: u32,
    weeks: u32,
) -> u32 {
    if weeks == 0 {
        return 0;
    }
    match strategy {
        Strategy::Longer => 1.min(max_days_per_week),
        Strategy::Maximize => (income_days / weeks).max(1).min(max_days_per_week),
    }
}

/// Searches for the weekly day mix meeting the income floor.
///
/// # Arguments
///
/// * `input` - The parent's rates, balances and the floor
/// * `rates` - The rate constants
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// The first combination in scan order whose combined income meets the
/// floor, or the all-income-level ceiling with `found == false`.
pub fn search_days(input: &SearchInput, rates: &RateConfig, step_number: u32) -> SearchOutcome {
    let income_for = |choice: DayChoice| {
        monthly_income_mixed(
            input.daily_rate,
            choice.income_days_per_week,
            choice.min_days_per_week,
            input.supplement,
            input.child_allowance,
            input.multi_child_supplement,
            rates,
        )
    };

    let start = input.start_days_per_week.max(1);
    let mut evaluated: u32 = 0;

    for days_per_week in start..=input.max_days_per_week {
        let max_min_days = if input.weeks == 0 {
            0
        } else {
            days_per_week.min(input.min_days_available / input.weeks)
        };

        for min_days_per_week in (0..=max_min_days).rev() {
            evaluated += 1;
            let choice = DayChoice::split(days_per_week, min_days_per_week);
            let income = income_for(choice);
            let combined_income = income + input.counterpart_income;

            if combined_income >= input.minimum_combined_income {
                return SearchOutcome {
                    choice,
                    income,
                    combined_income,
                    found: true,
                    audit_step: search_step(input, choice, combined_income, true, evaluated, step_number),
                };
            }
        }
    }

    let choice = DayChoice::income_only(input.max_days_per_week);
    let income = income_for(choice);
    let combined_income = income + input.counterpart_income;

    SearchOutcome {
        choice,
        income,
        combined_income,
        found: false,
        audit_step: search_step(input, choice, combined_income, false, evaluated, step_number),
    }
}

fn search_step(
    input: &SearchInput,
    choice: DayChoice,
    combined_income: i64,
    found: bool,
    evaluated: u32,
    step_number: u32,
) -> AuditStep {
    let reasoning = if found {
        format!(
            "{} days/week ({} income-level, {} minimum-level) gives a combined {} kr/month, meeting the required {} kr/month",
            choice.days_per_week,
            choice.income_days_per_week,
            choice.min_days_per_week,
            combined_income,
            input.minimum_combined_income
        )
    } else {
        format!(
            "No day mix meets the required {} kr/month; using {} income-level days/week for a combined {} kr/month",
            input.minimum_combined_income, choice.days_per_week, combined_income
        )
    };

    AuditStep {
        step_number,
        rule_id: "day_search".to_string(),
        rule_name: format!("Days Per Week Search ({})", input.parent),
        input: serde_json::json!({
            "parent": input.parent,
            "daily_rate": input.daily_rate,
            "supplement": input.supplement,
            "counterpart_income": input.counterpart_income,
            "weeks": input.weeks,
            "min_days_available": input.min_days_available,
            "start_days_per_week": input.start_days_per_week,
            "max_days_per_week": input.max_days_per_week,
            "minimum_combined_income": input.minimum_combined_income
        }),
        output: serde_json::json!({
            "days_per_week": choice.days_per_week,
            "income_days_per_week": choice.income_days_per_week,
            "min_days_per_week": choice.min_days_per_week,
            "combined_income": combined_income,
            "found": found,
            "combinations_evaluated": evaluated
        }),
        reasoning,
    }
}
