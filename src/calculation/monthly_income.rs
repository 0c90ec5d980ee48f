//! Monthly income while on leave.
//!
//! Weekly benefit is converted to a monthly amount with the configured weeks
//! per month and rounded to the rounding unit. The employer supplement and
//! the child allowance are added on top unrounded.

use rust_decimal::Decimal;

use crate::config::RateConfig;

use super::rounding::round_to_unit;

/// Converts a weekly benefit total to a rounded monthly benefit.
fn monthly_benefit(weekly_benefit: i64, rates: &RateConfig) -> i64 {
    round_to_unit(
        Decimal::from(weekly_benefit) * rates.weeks_per_month,
        rates.rounding_unit,
    )
}

/// Calculates the monthly income when every benefit day is paid at one rate.
///
/// `round(daily_rate * days_per_week * weeks_per_month / 100) * 100`
/// plus supplement, child allowance and multi-child supplement.
///
/// # Arguments
///
/// * `daily_rate` - Benefit per day, SEK
/// * `days_per_week` - Benefit days drawn per week
/// * `supplement` - Employer supplement, SEK per month
/// * `child_allowance` - Child allowance, SEK per month
/// * `multi_child_supplement` - Multi-child supplement, SEK per month
/// * `rates` - The rate constants
///
/// # Examples
///
/// ```
/// use parental_leave_planner::calculation::monthly_income;
/// use parental_leave_planner::config::RateConfig;
///
/// let rates = RateConfig::default();
/// // 789 * 1 * 4.3 = 3392.7, rounded to 3400
/// assert_eq!(monthly_income(789, 1, 0, 625, 0, &rates), 4025);
/// ```
pub fn monthly_income(
    daily_rate: i64,
    days_per_week: u32,
    supplement: i64,
    child_allowance: i64,
    multi_child_supplement: i64,
    rates: &RateConfig,
) -> i64 {
    let weekly = daily_rate.max(0).saturating_mul(i64::from(days_per_week));
    monthly_benefit(weekly, rates) + supplement + child_allowance + multi_child_supplement
}

/// Calculates the monthly income when the week mixes income-level and
/// minimum-level days.
///
/// `round((daily_rate * income_days + minimum_rate * min_days) * weeks_per_month / 100) * 100`
/// plus supplement, child allowance and multi-child supplement.
///
/// # Examples
///
/// ```
/// use parental_leave_planner::calculation::monthly_income_mixed;
/// use parental_leave_planner::config::RateConfig;
///
/// let rates = RateConfig::default();
/// // (789 * 3 + 180 * 2) * 4.3 = 11726.1, rounded to 11700
/// assert_eq!(monthly_income_mixed(789, 3, 2, 0, 625, 0, &rates), 12325);
/// ```
pub fn monthly_income_mixed(
    daily_rate: i64,
    income_days_per_week: u32,
    min_days_per_week: u32,
    supplement: i64,
    child_allowance: i64,
    multi_child_supplement: i64,
    rates: &RateConfig,
) -> i64 {
    let weekly = daily_rate
        .max(0)
        .saturating_mul(i64::from(income_days_per_week))
        .saturating_add(rates.minimum_rate.saturating_mul(i64::from(min_days_per_week)));
    monthly_benefit(weekly, rates) + supplement + child_allowance + multi_child_supplement
}
