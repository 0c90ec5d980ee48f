//! Employer supplement calculation.
//!
//! Collective agreements top up the statutory benefit with a supplement
//! (föräldralön) for a limited number of months. The amount follows one of
//! two policies selected in configuration:
//!
//! - `flat`: 10% of the income up to the threshold, a fixed cap above it
//! - `tiered`: 10% of the income up to the threshold plus 90% of the part
//!   above it

use rust_decimal::Decimal;

use crate::config::{SupplementConfig, SupplementPolicy};
use crate::models::Tenure;

use super::rounding::{months_to_weeks, round_kronor};

/// Calculates the monthly employer supplement for a monthly income.
///
/// # Arguments
///
/// * `monthly_income` - Gross monthly income in SEK
/// * `config` - The supplement rules, including the policy
///
/// # Returns
///
/// The supplement in SEK per month, or 0 for a non-positive income.
///
/// # Examples
///
/// ```
/// use parental_leave_planner::calculation::employer_supplement;
/// use parental_leave_planner::config::{SupplementConfig, SupplementPolicy};
///
/// let mut config = SupplementConfig::default();
/// assert_eq!(employer_supplement(30000, &config), 3000);
/// assert_eq!(employer_supplement(60000, &config), 14800);
///
/// config.policy = SupplementPolicy::Flat;
/// assert_eq!(employer_supplement(60000, &config), 4900);
/// ```
pub fn employer_supplement(monthly_income: i64, config: &SupplementConfig) -> i64 {
    if monthly_income <= 0 {
        return 0;
    }

    if monthly_income <= config.threshold {
        return round_kronor(Decimal::from(monthly_income) * config.base_rate);
    }

    match config.policy {
        SupplementPolicy::Flat => config.flat_cap,
        SupplementPolicy::Tiered => {
            let basal = Decimal::from(config.threshold) * config.base_rate;
            let excess = Decimal::from(monthly_income - config.threshold) * config.excess_rate;
            round_kronor(basal + excess)
        }
    }
}

/// Returns the supplement a parent actually receives.
///
/// No supplement is paid without a collective agreement or with less than
/// six months of employment.
pub fn supplement_for(
    monthly_income: i64,
    has_agreement: bool,
    tenure: Tenure,
    config: &SupplementConfig,
) -> i64 {
    if !has_agreement || tenure == Tenure::UnderSixMonths {
        return 0;
    }
    employer_supplement(monthly_income, config)
}

/// Returns the length of the supplement period in weeks.
///
/// Without a collective agreement there is no supplement period at all.
///
/// # Examples
///
/// ```
/// use parental_leave_planner::calculation::supplement_weeks;
/// use parental_leave_planner::config::SupplementConfig;
/// use parental_leave_planner::models::Tenure;
/// use rust_decimal::Decimal;
///
/// let config = SupplementConfig::default();
/// let wpm = Decimal::new(43, 1);
/// assert_eq!(supplement_weeks(true, Tenure::OverOneYear, &config, wpm), 26);
/// assert_eq!(supplement_weeks(true, Tenure::SixToTwelveMonths, &config, wpm), 9);
/// assert_eq!(supplement_weeks(true, Tenure::UnderSixMonths, &config, wpm), 0);
/// assert_eq!(supplement_weeks(false, Tenure::OverOneYear, &config, wpm), 0);
/// ```
pub fn supplement_weeks(
    has_agreement: bool,
    tenure: Tenure,
    config: &SupplementConfig,
    weeks_per_month: Decimal,
) -> u32 {
    if !has_agreement {
        return 0;
    }
    months_to_weeks(config.months_by_tenure.for_tenure(tenure), weeks_per_month)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiered() -> SupplementConfig {
        SupplementConfig::default()
    }

    fn flat() -> SupplementConfig {
        SupplementConfig {
            policy: SupplementPolicy::Flat,
            ..SupplementConfig::default()
        }
    }

    /// ES-001: 10% of the income up to the threshold under both policies
    #[test]
    fn test_es_001_below_threshold() {
        assert_eq!(employer_supplement(30000, &tiered()), 3000);
        assert_eq!(employer_supplement(30000, &flat()), 3000);
        assert_eq!(employer_supplement(33333, &tiered()), 3333);
    }

    /// ES-002: income exactly at the threshold
    #[test]
    fn test_es_002_at_threshold() {
        assert_eq!(employer_supplement(49000, &tiered()), 4900);
        assert_eq!(employer_supplement(49000, &flat()), 4900);
    }

    /// ES-003: tiered policy adds 90% of the income above the threshold
    #[test]
    fn test_es_003_tiered_above_threshold() {
        // 4900 + 11000 * 0.9 = 14800
        assert_eq!(employer_supplement(60000, &tiered()), 14800);
        // 4900 + 1 * 0.9 = 4900.9
        assert_eq!(employer_supplement(49001, &tiered()), 4901);
    }

    /// ES-004: flat policy caps the supplement above the threshold
    #[test]
    fn test_es_004_flat_above_threshold() {
        assert_eq!(employer_supplement(60000, &flat()), 4900);
        assert_eq!(employer_supplement(200000, &flat()), 4900);
    }

    /// ES-005: non-positive income gives no supplement
    #[test]
    fn test_es_005_non_positive_income() {
        assert_eq!(employer_supplement(0, &tiered()), 0);
        assert_eq!(employer_supplement(-100, &flat()), 0);
    }

    /// ES-006: agreement and tenure gate the supplement
    #[test]
    fn test_es_006_eligibility() {
        let config = tiered();
        assert_eq!(supplement_for(30000, true, Tenure::OverOneYear, &config), 3000);
        assert_eq!(supplement_for(30000, true, Tenure::SixToTwelveMonths, &config), 3000);
        assert_eq!(supplement_for(30000, false, Tenure::OverOneYear, &config), 0);
        assert_eq!(supplement_for(30000, true, Tenure::UnderSixMonths, &config), 0);
    }

    /// ES-007: supplement period by tenure
    #[test]
    fn test_es_007_supplement_weeks() {
        let config = tiered();
        let wpm = Decimal::new(43, 1);
        // 6 * 4.3 = 25.8 weeks
        assert_eq!(supplement_weeks(true, Tenure::OverOneYear, &config, wpm), 26);
        // 2 * 4.3 = 8.6 weeks
        assert_eq!(supplement_weeks(true, Tenure::SixToTwelveMonths, &config, wpm), 9);
        assert_eq!(supplement_weeks(true, Tenure::UnderSixMonths, &config, wpm), 0);
    }

    /// ES-008: no supplement period without a collective agreement
    #[test]
    fn test_es_008_no_agreement_no_supplement_weeks() {
        let config = tiered();
        let wpm = Decimal::new(43, 1);
        assert_eq!(supplement_weeks(false, Tenure::OverOneYear, &config, wpm), 0);
        assert_eq!(supplement_weeks(false, Tenure::SixToTwelveMonths, &config, wpm), 0);
    }
}
