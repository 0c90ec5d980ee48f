//! Daily benefit rate calculation.
//!
//! The daily rate is the benefit paid per income-level day. It replaces a
//! share of the income up to the income ceiling and is capped at the
//! highest daily benefit.

use rust_decimal::Decimal;

use crate::config::RateConfig;

use super::rounding::round_kronor;

/// Calculates the benefit per income-level day for a monthly income.
///
/// The income is capped at `sgi_cap`, annualised and spread over the year:
/// `round(min(income, sgi_cap) * replacement_rate * months_per_year / days_per_year)`,
/// then capped at `income_cap`. When `apply_basic_level_floor` is set the
/// result is raised to at least `basic_level_rate`.
///
/// # Arguments
///
/// * `monthly_income` - Gross monthly income in SEK
/// * `rates` - The rate constants
///
/// # Returns
///
/// The daily rate in SEK, or 0 for a non-positive income.
///
/// # Examples
///
/// ```
/// use parental_leave_planner::calculation::daily_rate;
/// use parental_leave_planner::config::RateConfig;
///
/// let rates = RateConfig::default();
/// assert_eq!(daily_rate(30000, &rates), 789);
/// assert_eq!(daily_rate(49000, &rates), 1250);
/// assert_eq!(daily_rate(0, &rates), 0);
/// ```
pub fn daily_rate(monthly_income: i64, rates: &RateConfig) -> i64 {
    if monthly_income <= 0 || rates.days_per_year == 0 {
        return 0;
    }

    let sgi = monthly_income.min(rates.sgi_cap);
    let annual = Decimal::from(sgi) * rates.replacement_rate * Decimal::from(rates.months_per_year);
    let rate = round_kronor(annual / Decimal::from(rates.days_per_year)).min(rates.income_cap);

    if rates.apply_basic_level_floor {
        rate.max(rates.basic_level_rate)
    } else {
        rate
    }
}
