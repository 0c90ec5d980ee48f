//! Household and preference models.
//!
//! This module defines the immutable input records handed to the allocator:
//! who the parents are, what they earn, and how they want to take leave.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifies one of the two parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parent {
    /// The parent who starts the leave.
    First,
    /// The partner, whose leave follows the first parent's.
    Second,
}

impl Parent {
    /// Returns the other parent.
    ///
    /// # Examples
    ///
    /// ```
    /// use parental_leave_planner::models::Parent;
    ///
    /// assert_eq!(Parent::First.other(), Parent::Second);
    /// assert_eq!(Parent::Second.other(), Parent::First);
    /// ```
    pub fn other(self) -> Parent {
        match self {
            Parent::First => Parent::Second,
            Parent::Second => Parent::First,
        }
    }

    /// Returns the 1-based phase number used in feasibility messages.
    pub fn number(self) -> u8 {
        match self {
            Parent::First => 1,
            Parent::Second => 2,
        }
    }
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parent {}", self.number())
    }
}

/// The custody arrangement for the child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustodyType {
    /// Both parents share custody and each holds half of the benefit days.
    Joint,
    /// One parent has sole custody and holds every benefit day.
    Sole,
}

/// How the allocator seeds its days-per-week search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Start at one day per week to stretch the days over a longer period.
    #[default]
    Longer,
    /// Start at the rate that spreads the parent's income-level days evenly
    /// over the requested duration.
    Maximize,
}

/// Length of employment with the current employer.
///
/// Collective agreements tie the employer supplement to tenure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tenure {
    /// Less than six months: no employer supplement.
    UnderSixMonths,
    /// Six to twelve months: a short supplement period.
    SixToTwelveMonths,
    /// More than a year: the full supplement period.
    #[default]
    OverOneYear,
}

/// Requested leave duration per parent, in months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LeaveMonths {
    /// Months of leave for the first parent.
    pub parent1: Decimal,
    /// Months of leave for the second parent.
    #[serde(default)]
    pub parent2: Decimal,
}

impl LeaveMonths {
    /// Returns the requested months for the given parent.
    pub fn for_parent(&self, parent: Parent) -> Decimal {
        match parent {
            Parent::First => self.parent1,
            Parent::Second => self.parent2,
        }
    }
}

/// The household's leave preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Caps the weekly benefit days at the part-time ceiling when set.
    #[serde(default)]
    pub part_time: bool,
    /// Requested leave duration per parent.
    pub leave_months: LeaveMonths,
    /// The lowest acceptable combined household income, SEK per month.
    pub minimum_combined_income: i64,
    /// How the search is seeded.
    #[serde(default)]
    pub strategy: Strategy,
}

/// The household's incomes and circumstances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Household {
    /// Monthly income of the first parent, SEK.
    pub income1: i64,
    /// Monthly income of the second parent, SEK.
    #[serde(default)]
    pub income2: i64,
    /// The custody arrangement.
    pub custody: CustodyType,
    /// Whether the second parent's leave is planned as well.
    #[serde(default = "default_compute_partner")]
    pub compute_partner: bool,
    /// Whether the first parent is covered by a collective agreement.
    #[serde(default)]
    pub agreement1: bool,
    /// Whether the second parent is covered by a collective agreement.
    #[serde(default)]
    pub agreement2: bool,
    /// The first parent's tenure with their employer.
    #[serde(default)]
    pub tenure1: Tenure,
    /// The second parent's tenure with their employer.
    #[serde(default)]
    pub tenure2: Tenure,
    /// Total number of children, used to derive the child allowance.
    #[serde(default)]
    pub children: Option<u32>,
    /// Explicit child allowance per parent, SEK per month.
    #[serde(default)]
    pub child_allowance_per_parent: Option<i64>,
    /// Explicit multi-child supplement per parent, SEK per month.
    #[serde(default)]
    pub multi_child_supplement_per_parent: Option<i64>,
    /// The child's date of birth, used to date the timeline.
    #[serde(default)]
    pub child_date: Option<NaiveDate>,
}

fn default_compute_partner() -> bool {
    true
}

impl Household {
    /// Creates a household with the given incomes and custody and defaults
    /// for everything else.
    pub fn new(income1: i64, income2: i64, custody: CustodyType) -> Self {
        Self {
            income1,
            income2,
            custody,
            compute_partner: true,
            agreement1: false,
            agreement2: false,
            tenure1: Tenure::default(),
            tenure2: Tenure::default(),
            children: None,
            child_allowance_per_parent: None,
            multi_child_supplement_per_parent: None,
            child_date: None,
        }
    }

    /// Returns true if the second parent's leave is part of the plan.
    ///
    /// The partner is only planned for under joint custody.
    ///
    /// # Examples
    ///
    /// ```
    /// use parental_leave_planner::models::{CustodyType, Household};
    ///
    /// let household = Household::new(30000, 30000, CustodyType::Sole);
    /// assert!(!household.includes_partner());
    /// ```
    pub fn includes_partner(&self) -> bool {
        self.custody == CustodyType::Joint && self.compute_partner
    }

    /// Returns the monthly income of the given parent.
    pub fn income(&self, parent: Parent) -> i64 {
        match parent {
            Parent::First => self.income1,
            Parent::Second => self.income2,
        }
    }

    /// Returns whether the given parent has a collective agreement.
    pub fn agreement(&self, parent: Parent) -> bool {
        match parent {
            Parent::First => self.agreement1,
            Parent::Second => self.agreement2,
        }
    }

    /// Returns the given parent's tenure.
    pub fn tenure(&self, parent: Parent) -> Tenure {
        match parent {
            Parent::First => self.tenure1,
            Parent::Second => self.tenure2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn household_json() -> serde_json::Value {
        serde_json::json!({
            "income1": 30000,
            "custody": "joint"
        })
    }

    #[test]
    fn test_household_defaults_from_minimal_json() {
        let household: Household = serde_json::from_value(household_json()).unwrap();

        assert_eq!(household.income2, 0);
        assert!(household.compute_partner);
        assert!(!household.agreement1);
        assert_eq!(household.tenure1, Tenure::OverOneYear);
        assert_eq!(household.children, None);
        assert!(household.includes_partner());
    }

    #[test]
    fn test_joint_custody_without_partner_excludes_partner() {
        let mut household: Household = serde_json::from_value(household_json()).unwrap();
        household.compute_partner = false;
        assert!(!household.includes_partner());
    }

    #[test]
    fn test_preferences_deserialize_with_defaults() {
        let preferences: Preferences = serde_json::from_value(serde_json::json!({
            "leave_months": { "parent1": "6" },
            "minimum_combined_income": 10000
        }))
        .unwrap();

        assert!(!preferences.part_time);
        assert_eq!(preferences.strategy, Strategy::Longer);
        assert_eq!(preferences.leave_months.parent1, Decimal::from(6));
        assert_eq!(preferences.leave_months.parent2, Decimal::ZERO);
    }

    #[test]
    fn test_enums_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&Tenure::SixToTwelveMonths).unwrap(),
            "\"six_to_twelve_months\""
        );
        assert_eq!(serde_json::to_string(&CustodyType::Sole).unwrap(), "\"sole\"");
        assert_eq!(
            serde_json::to_string(&Strategy::Maximize).unwrap(),
            "\"maximize\""
        );
    }

    #[test]
    fn test_parent_accessors() {
        let household: Household = serde_json::from_value(serde_json::json!({
            "income1": 30000,
            "income2": 25000,
            "custody": "joint",
            "agreement2": true,
            "tenure2": "under_six_months"
        }))
        .unwrap();

        assert_eq!(household.income(Parent::Second), 25000);
        assert!(household.agreement(Parent::Second));
        assert!(!household.agreement(Parent::First));
        assert_eq!(household.tenure(Parent::Second), Tenure::UnderSixMonths);
        assert_eq!(Parent::Second.to_string(), "parent 2");
    }
}
