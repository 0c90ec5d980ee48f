//! Rounding helpers shared by the benefit rules.
//!
//! All amounts are whole kronor, rounded half away from zero.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal amount to whole kronor.
///
/// Values outside the `i64` range saturate.
pub(crate) fn round_kronor(value: Decimal) -> i64 {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Rounds a decimal amount to a multiple of `unit` kronor.
pub(crate) fn round_to_unit(value: Decimal, unit: i64) -> i64 {
    if unit <= 1 {
        return round_kronor(value);
    }
    round_kronor(value / Decimal::from(unit)).saturating_mul(unit)
}

/// Converts a duration in months to whole weeks.
///
/// Durations too long to represent saturate.
pub(crate) fn months_to_weeks(months: Decimal, weeks_per_month: Decimal) -> u32 {
    let weeks = match months.checked_mul(weeks_per_month) {
        Some(weeks) => round_kronor(weeks),
        None if months.is_sign_negative() != weeks_per_month.is_sign_negative() => 0,
        None => i64::MAX,
    };
    u32::try_from(weeks.max(0)).unwrap_or(u32::MAX)
}

/// Converts whole weeks to months, rounded to one decimal.
pub(crate) fn weeks_to_months(weeks: u32, weeks_per_month: Decimal) -> Decimal {
    if weeks_per_month.is_zero() {
        return Decimal::ZERO;
    }
    (Decimal::from(weeks) / weeks_per_month)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_kronor_half_away_from_zero() {
        assert_eq!(round_kronor(dec("789.04")), 789);
        assert_eq!(round_kronor(dec("2.5")), 3);
        assert_eq!(round_kronor(dec("365.0")), 365);
        assert_eq!(round_kronor(dec("-2.5")), -3);
    }

    #[test]
    fn test_round_to_unit_of_hundred() {
        assert_eq!(round_to_unit(dec("3392.7"), 100), 3400);
        assert_eq!(round_to_unit(dec("26875"), 100), 26900);
        assert_eq!(round_to_unit(dec("5418"), 100), 5400);
        assert_eq!(round_to_unit(dec("5418"), 1), 5418);
    }

    #[test]
    fn test_months_to_weeks() {
        let wpm = dec("4.3");
        assert_eq!(months_to_weeks(dec("6"), wpm), 26);
        assert_eq!(months_to_weeks(dec("24"), wpm), 103);
        assert_eq!(months_to_weeks(dec("0"), wpm), 0);
        assert_eq!(months_to_weeks(dec("-1"), wpm), 0);
    }

    #[test]
    fn test_months_to_weeks_saturates() {
        let wpm = dec("4.3");
        assert_eq!(months_to_weeks(Decimal::MAX, wpm), u32::MAX);
        assert_eq!(months_to_weeks(Decimal::MIN, wpm), 0);
    }

    #[test]
    fn test_weeks_to_months() {
        let wpm = dec("4.3");
        assert_eq!(weeks_to_months(26, wpm), dec("6.0"));
        assert_eq!(weeks_to_months(33, wpm), dec("7.7"));
        assert_eq!(weeks_to_months(10, Decimal::ZERO), Decimal::ZERO);
    }
}
