//! Phase splitting.
//!
//! Turns one parent's requested weeks and chosen day mix into up to three
//! contiguous [`Plan`] segments:
//!
//! 1. With employer supplement, capped at the supplement period
//! 2. Without supplement, same day mix, for the rest of the income-level weeks
//! 3. Minimum rate, once the income-level days cannot cover another week
//!
//! Weeks the day supply cannot cover at all are reported as truncated.

use crate::config::RateConfig;
use crate::models::{AuditStep, DayChoice, Parent, PhaseKind, Plan};

use super::monthly_income::{monthly_income, monthly_income_mixed};

/// Inputs to the phase split for one parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseInput {
    /// The parent being planned.
    pub parent: Parent,
    /// First week of the parent's leave.
    pub start_week: u32,
    /// Requested leave in weeks.
    pub requested_weeks: u32,
    /// The day mix chosen by the search.
    pub choice: DayChoice,
    /// Benefit per income-level day, SEK.
    pub daily_rate: i64,
    /// Employer supplement, SEK per month.
    pub supplement: i64,
    /// Child allowance, SEK per month.
    pub child_allowance: i64,
    /// Multi-child supplement, SEK per month.
    pub multi_child_supplement: i64,
    /// Length of the supplement period in weeks.
    pub supplement_cap_weeks: u32,
    /// Income-level days available to the parent.
    pub income_days_available: u32,
    /// Minimum-level days available to the parent.
    pub min_days_available: u32,
}

/// The result of splitting one parent's leave into phases.
#[derive(Debug, Clone)]
pub struct PhaseSplitResult {
    /// The phase with the employer supplement.
    pub with_supplement: Plan,
    /// The phase after the supplement period.
    pub no_supplement: Plan,
    /// The minimum-rate phase.
    pub minimum_rate: Plan,
    /// Requested weeks the day supply could not cover.
    pub truncated_weeks: u32,
    /// The audit step recording the split.
    pub audit_step: AuditStep,
}

impl PhaseSplitResult {
    /// Returns the three phases in schedule order.
    pub fn plans(&self) -> [Plan; 3] {
        [self.with_supplement, self.no_supplement, self.minimum_rate]
    }

    /// Returns the total weeks covered by the phases.
    pub fn total_weeks(&self) -> u32 {
        self.plans().iter().map(|plan| plan.weeks).sum()
    }

    /// Returns the income-level days the phases consume.
    pub fn used_income_days(&self) -> u32 {
        self.plans().iter().map(|plan| plan.used_income_days).sum()
    }

    /// Returns the minimum-level days the phases consume.
    pub fn used_min_days(&self) -> u32 {
        self.plans().iter().map(|plan| plan.used_min_days).sum()
    }

    /// Returns the first non-empty phase, if any.
    pub fn first_nonempty(&self) -> Option<Plan> {
        self.plans().into_iter().find(|plan| !plan.is_empty())
    }
}

/// Returns how many whole weeks `available` days cover at `per_week` a week.
///
/// Zero per week never limits the count.
fn weeks_covered(available: u32, per_week: u32) -> u32 {
    if per_week == 0 {
        u32::MAX
    } else {
        available / per_week
    }
}

/// Splits one parent's leave into phases.
///
/// # Arguments
///
/// * `input` - The parent's request, day mix, rates and day balances
/// * `rates` - The rate constants
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// The three phases, contiguous from `input.start_week`, and the number of
/// requested weeks left uncovered.
///
/// # Example
///
/// ```
/// use parental_leave_planner::calculation::{PhaseInput, build_phases};
/// use parental_leave_planner::config::RateConfig;
/// use parental_leave_planner::models::{DayChoice, Parent};
///
/// let input = PhaseInput {
///     parent: Parent::First,
///     start_week: 0,
///     requested_weeks: 39,
///     choice: DayChoice::income_only(5),
///     daily_rate: 789,
///     supplement: 3000,
///     child_allowance: 625,
///     multi_child_supplement: 0,
///     supplement_cap_weeks: 26,
///     income_days_available: 195,
///     min_days_available: 45,
/// };
/// let split = build_phases(&input, &RateConfig::default(), 1);
/// assert_eq!(split.with_supplement.weeks, 26);
/// assert_eq!(split.no_supplement.weeks, 13);
/// assert_eq!(split.no_supplement.start_week, 26);
/// assert!(split.minimum_rate.is_empty());
/// ```
pub fn build_phases(input: &PhaseInput, rates: &RateConfig, step_number: u32) -> PhaseSplitResult {
    let choice = input.choice;
    let start = input.start_week;

    if choice.days_per_week == 0 || input.requested_weeks == 0 {
        return PhaseSplitResult {
            with_supplement: Plan::empty(PhaseKind::WithSupplement, start),
            no_supplement: Plan::empty(PhaseKind::NoSupplement, start),
            minimum_rate: Plan::empty(PhaseKind::MinimumRate, start),
            truncated_weeks: input.requested_weeks,
            audit_step: split_step(input, 0, 0, 0, input.requested_weeks, step_number),
        };
    }

    let mixed_weeks = input
        .requested_weeks
        .min(weeks_covered(input.income_days_available, choice.income_days_per_week))
        .min(weeks_covered(input.min_days_available, choice.min_days_per_week));
    let rest = input.requested_weeks - mixed_weeks;

    let min_days_left = input
        .min_days_available
        .saturating_sub(mixed_weeks.saturating_mul(choice.min_days_per_week));
    let minimum_weeks = rest.min(min_days_left / choice.days_per_week);
    let truncated_weeks = rest - minimum_weeks;

    let supplement_weeks = mixed_weeks.min(input.supplement_cap_weeks);
    let no_supplement_weeks = mixed_weeks - supplement_weeks;

    let income_with = monthly_income_mixed(
        input.daily_rate,
        choice.income_days_per_week,
        choice.min_days_per_week,
        input.supplement,
        input.child_allowance,
        input.multi_child_supplement,
        rates,
    );
    let income_without = monthly_income_mixed(
        input.daily_rate,
        choice.income_days_per_week,
        choice.min_days_per_week,
        0,
        input.child_allowance,
        input.multi_child_supplement,
        rates,
    );

    let with_supplement = mixed_plan(
        PhaseKind::WithSupplement,
        start,
        supplement_weeks,
        choice,
        income_with,
        income_without,
        input.supplement,
    );
    let no_supplement = mixed_plan(
        PhaseKind::NoSupplement,
        start + supplement_weeks,
        no_supplement_weeks,
        choice,
        income_without,
        income_without,
        0,
    );

    let minimum_rate = if minimum_weeks == 0 {
        Plan::empty(PhaseKind::MinimumRate, start + mixed_weeks)
    } else {
        let income = monthly_income(
            rates.minimum_rate,
            choice.days_per_week,
            0,
            input.child_allowance,
            input.multi_child_supplement,
            rates,
        );
        Plan {
            phase: PhaseKind::MinimumRate,
            start_week: start + mixed_weeks,
            weeks: minimum_weeks,
            days_per_week: choice.days_per_week,
            income_days_per_week: 0,
            min_days_per_week: choice.days_per_week,
            income,
            income_without_supplement: income,
            supplement: 0,
            used_income_days: 0,
            used_min_days: minimum_weeks * choice.days_per_week,
        }
    };

    PhaseSplitResult {
        with_supplement,
        no_supplement,
        minimum_rate,
        truncated_weeks,
        audit_step: split_step(
            input,
            supplement_weeks,
            no_supplement_weeks,
            minimum_weeks,
            truncated_weeks,
            step_number,
        ),
    }
}

fn mixed_plan(
    phase: PhaseKind,
    start_week: u32,
    weeks: u32,
    choice: DayChoice,
    income: i64,
    income_without_supplement: i64,
    supplement: i64,
) -> Plan {
    if weeks == 0 {
        return Plan::empty(phase, start_week);
    }
    Plan {
        phase,
        start_week,
        weeks,
        days_per_week: choice.days_per_week,
        income_days_per_week: choice.income_days_per_week,
        min_days_per_week: choice.min_days_per_week,
        income,
        income_without_supplement,
        supplement,
        used_income_days: weeks * choice.income_days_per_week,
        used_min_days: weeks * choice.min_days_per_week,
    }
}

fn split_step(
    input: &PhaseInput,
    supplement_weeks: u32,
    no_supplement_weeks: u32,
    minimum_weeks: u32,
    truncated_weeks: u32,
    step_number: u32,
) -> AuditStep {
    let mut reasoning = format!(
        "{} weeks requested: {} with supplement, {} without supplement, {} at minimum rate",
        input.requested_weeks, supplement_weeks, no_supplement_weeks, minimum_weeks
    );
    if truncated_weeks > 0 {
        reasoning.push_str(&format!("; {} weeks not covered by available days", truncated_weeks));
    }

    AuditStep {
        step_number,
        rule_id: "phase_split".to_string(),
        rule_name: format!("Phase Split ({})", input.parent),
        input: serde_json::json!({
            "parent": input.parent,
            "start_week": input.start_week,
            "requested_weeks": input.requested_weeks,
            "days_per_week": input.choice.days_per_week,
            "income_days_per_week": input.choice.income_days_per_week,
            "min_days_per_week": input.choice.min_days_per_week,
            "supplement_cap_weeks": input.supplement_cap_weeks,
            "income_days_available": input.income_days_available,
            "min_days_available": input.min_days_available
        }),
        output: serde_json::json!({
            "with_supplement_weeks": supplement_weeks,
            "no_supplement_weeks": no_supplement_weeks,
            "minimum_rate_weeks": minimum_weeks,
            "truncated_weeks": truncated_weeks
        }),
        reasoning,
    }
}
