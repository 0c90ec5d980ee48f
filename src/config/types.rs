//! Configuration types for the parental benefit scheme.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every type also has a
//! `Default` carrying the values of the Swedish scheme, so library callers
//! can allocate without any files on disk.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CustodyType, Tenure};

/// Metadata about the benefit scheme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SchemeMetadata {
    /// Short code for the scheme (e.g., "se-fp").
    pub code: String,
    /// The human-readable name of the scheme.
    pub name: String,
    /// The version or effective year of the constants.
    pub version: String,
    /// URL to the official scheme documentation.
    pub source_url: String,
}

impl Default for SchemeMetadata {
    fn default() -> Self {
        Self {
            code: "se-fp".to_string(),
            name: "Swedish parental benefit".to_string(),
            version: "2025".to_string(),
            source_url: "https://www.forsakringskassan.se/privatperson/foralder/foraldrapenning"
                .to_string(),
        }
    }
}

/// Constants for converting income into benefit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RateConfig {
    /// Highest benefit per income-level day, SEK.
    pub income_cap: i64,
    /// Highest monthly income the benefit is based on, SEK.
    pub sgi_cap: i64,
    /// Benefit per minimum-level day, SEK.
    pub minimum_rate: i64,
    /// Basic-level benefit per day, SEK.
    pub basic_level_rate: i64,
    /// Whether positive incomes are lifted to at least the basic level.
    #[serde(default)]
    pub apply_basic_level_floor: bool,
    /// Share of the income the benefit replaces.
    pub replacement_rate: Decimal,
    /// Months per year used to annualise the monthly income.
    pub months_per_year: u32,
    /// Days per year used to derive the daily rate.
    pub days_per_year: u32,
    /// Weeks per month used for every week/month conversion.
    pub weeks_per_month: Decimal,
    /// Monthly benefit amounts are rounded to this many kronor.
    pub rounding_unit: i64,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            income_cap: 1250,
            sgi_cap: 49000,
            minimum_rate: 180,
            basic_level_rate: 250,
            apply_basic_level_floor: false,
            replacement_rate: Decimal::new(80, 2),
            months_per_year: 12,
            days_per_year: 365,
            weeks_per_month: Decimal::new(43, 1),
            rounding_unit: 100,
        }
    }
}

/// How the employer supplement is derived from the monthly income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplementPolicy {
    /// `base_rate` of the income up to the threshold, `flat_cap` above it.
    Flat,
    /// `base_rate` of the income up to the threshold plus `excess_rate` of
    /// the income above it.
    #[default]
    Tiered,
}

/// Supplement period length per tenure bracket, in months.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SupplementMonths {
    /// Months for less than six months of employment.
    pub under_six_months: Decimal,
    /// Months for six to twelve months of employment.
    pub six_to_twelve_months: Decimal,
    /// Months for more than a year of employment.
    pub over_one_year: Decimal,
}

impl SupplementMonths {
    /// Returns the supplement period for the given tenure.
    pub fn for_tenure(&self, tenure: Tenure) -> Decimal {
        match tenure {
            Tenure::UnderSixMonths => self.under_six_months,
            Tenure::SixToTwelveMonths => self.six_to_twelve_months,
            Tenure::OverOneYear => self.over_one_year,
        }
    }
}

impl Default for SupplementMonths {
    fn default() -> Self {
        Self {
            under_six_months: Decimal::ZERO,
            six_to_twelve_months: Decimal::from(2),
            over_one_year: Decimal::from(6),
        }
    }
}

/// Employer supplement configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SupplementConfig {
    /// Which formula applies.
    #[serde(default)]
    pub policy: SupplementPolicy,
    /// Monthly income where the formula changes, SEK.
    pub threshold: i64,
    /// Share of the income up to the threshold.
    pub base_rate: Decimal,
    /// Share of the income above the threshold (tiered policy).
    pub excess_rate: Decimal,
    /// Supplement above the threshold (flat policy), SEK.
    pub flat_cap: i64,
    /// Supplement period length per tenure bracket.
    pub months_by_tenure: SupplementMonths,
}

impl Default for SupplementConfig {
    fn default() -> Self {
        Self {
            policy: SupplementPolicy::Tiered,
            threshold: 49000,
            base_rate: Decimal::new(10, 2),
            excess_rate: Decimal::new(90, 2),
            flat_cap: 4900,
            months_by_tenure: SupplementMonths::default(),
        }
    }
}

/// Child allowance configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChildAllowanceConfig {
    /// Allowance per child, SEK per month.
    pub per_child: i64,
    /// Allowance per parent when no child count is given, SEK per month.
    pub default_per_parent: i64,
    /// Multi-child supplement by total number of children, SEK per month.
    pub multi_child_supplement: BTreeMap<u32, i64>,
}

impl Default for ChildAllowanceConfig {
    fn default() -> Self {
        Self {
            per_child: 1250,
            default_per_parent: 625,
            multi_child_supplement: BTreeMap::from([
                (2, 150),
                (3, 730),
                (4, 1740),
                (5, 2990),
                (6, 4240),
            ]),
        }
    }
}

/// Starting day balances for one parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DayAllotment {
    /// Income-level days.
    pub income_days: u32,
    /// Minimum-level days.
    pub min_days: u32,
}

/// Benefit day configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DayConfig {
    /// Per-parent balances under joint custody.
    pub joint: DayAllotment,
    /// The custodial parent's balances under sole custody.
    pub sole: DayAllotment,
    /// Income-level days per parent that can never be transferred.
    pub reserved_days: u32,
    /// Income-level days a donor keeps back for the overlap period.
    pub overlap_reserve_days: u32,
    /// Days the partner draws during the overlap.
    pub overlap_days: u32,
    /// Weeks the overlap spans.
    pub overlap_weeks: u32,
    /// The partner's days per week during the overlap.
    pub overlap_days_per_week: u32,
    /// Days-per-week ceiling when leave is taken part time.
    pub part_time_max_days_per_week: u32,
    /// Days-per-week ceiling otherwise.
    pub full_time_max_days_per_week: u32,
}

impl DayConfig {
    /// Returns the starting balances of `(parent 1, parent 2)` for a custody
    /// arrangement.
    ///
    /// Under sole custody the custodial parent holds every day.
    pub fn allotments(&self, custody: CustodyType) -> (DayAllotment, DayAllotment) {
        match custody {
            CustodyType::Joint => (self.joint, self.joint),
            CustodyType::Sole => (
                self.sole,
                DayAllotment {
                    income_days: 0,
                    min_days: 0,
                },
            ),
        }
    }

    /// Returns the days-per-week ceiling.
    pub fn max_days_per_week(&self, part_time: bool) -> u32 {
        if part_time {
            self.part_time_max_days_per_week
        } else {
            self.full_time_max_days_per_week
        }
    }
}

impl Default for DayConfig {
    fn default() -> Self {
        Self {
            joint: DayAllotment {
                income_days: 195,
                min_days: 45,
            },
            sole: DayAllotment {
                income_days: 390,
                min_days: 90,
            },
            reserved_days: 90,
            overlap_reserve_days: 10,
            overlap_days: 10,
            overlap_weeks: 2,
            overlap_days_per_week: 5,
            part_time_max_days_per_week: 5,
            full_time_max_days_per_week: 7,
        }
    }
}

/// What happens when the requested leave needs more days than exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionPolicy {
    /// Shorten the leave to the weeks the days can cover.
    #[default]
    Truncate,
    /// Refuse the request with [`EngineError::ExhaustedDays`](crate::error::EngineError::ExhaustedDays).
    Fail,
}

/// Allocation and timeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AllocationConfig {
    /// Exhaustion handling.
    #[serde(default)]
    pub exhaustion: ExhaustionPolicy,
    /// The timeline always spans at least this many weeks.
    pub timeline_min_weeks: u32,
    /// Shortfall share of the floor above which a week is an error.
    pub severity_error_ratio: Decimal,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            exhaustion: ExhaustionPolicy::Truncate,
            timeline_min_weeks: 60,
            severity_error_ratio: Decimal::new(10, 2),
        }
    }
}

/// Structure of `benefits.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct BenefitsFile {
    /// Rate constants.
    pub rates: RateConfig,
    /// Employer supplement rules.
    pub supplement: SupplementConfig,
    /// Child allowance rules.
    pub child_allowance: ChildAllowanceConfig,
}

/// Structure of `days.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DaysFile {
    /// Day balances and limits.
    pub days: DayConfig,
    /// Allocation and timeline settings.
    pub allocation: AllocationConfig,
}

/// The complete scheme configuration.
///
/// Aggregates everything loaded from a scheme configuration directory.
///
/// # Example
///
/// ```
/// use parental_leave_planner::config::BenefitConfig;
///
/// let config = BenefitConfig::default();
/// assert_eq!(config.rates.income_cap, 1250);
/// assert_eq!(config.days.joint.income_days, 195);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BenefitConfig {
    /// Scheme metadata.
    pub metadata: SchemeMetadata,
    /// Rate constants.
    pub rates: RateConfig,
    /// Employer supplement rules.
    pub supplement: SupplementConfig,
    /// Child allowance rules.
    pub child_allowance: ChildAllowanceConfig,
    /// Day balances and limits.
    pub days: DayConfig,
    /// Allocation and timeline settings.
    pub allocation: AllocationConfig,
}

impl BenefitConfig {
    /// Creates a configuration from the parsed configuration files.
    pub fn new(metadata: SchemeMetadata, benefits: BenefitsFile, days: DaysFile) -> Self {
        Self {
            metadata,
            rates: benefits.rates,
            supplement: benefits.supplement,
            child_allowance: benefits.child_allowance,
            days: days.days,
            allocation: days.allocation,
        }
    }
}
