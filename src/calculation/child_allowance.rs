//! Child allowance calculation.
//!
//! The allowance is paid per child, with a multi-child supplement for
//! households with two or more children. Under joint custody each parent
//! receives half.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ChildAllowanceConfig;
use crate::models::{CustodyType, Household};

use super::rounding::round_kronor;

/// The child allowance paid to one parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChildAllowance {
    /// Base allowance, SEK per month.
    pub base: i64,
    /// Multi-child supplement, SEK per month.
    pub multi_child_supplement: i64,
    /// Sum of both, SEK per month.
    pub total: i64,
}

/// Calculates the child allowance per parent for a number of children.
///
/// # Arguments
///
/// * `total_children` - Number of children in the household
/// * `sole_custody` - True if one parent receives the whole allowance
/// * `config` - The allowance rules
///
/// # Returns
///
/// The per-parent allowance. Under joint custody both parts are halved and
/// rounded; `total` is always their sum.
///
/// # Examples
///
/// ```
/// use parental_leave_planner::calculation::child_allowance;
/// use parental_leave_planner::config::ChildAllowanceConfig;
///
/// let config = ChildAllowanceConfig::default();
/// let shared = child_allowance(3, false, &config);
/// assert_eq!(shared.base, 1875);
/// assert_eq!(shared.multi_child_supplement, 365);
/// assert_eq!(shared.total, 2240);
/// ```
pub fn child_allowance(
    total_children: u32,
    sole_custody: bool,
    config: &ChildAllowanceConfig,
) -> ChildAllowance {
    let base = config.per_child.saturating_mul(i64::from(total_children));
    let supplement = config
        .multi_child_supplement
        .get(&total_children)
        .copied()
        .unwrap_or(0);

    let (base, supplement) = if sole_custody {
        (base, supplement)
    } else {
        (halve(base), halve(supplement))
    };

    ChildAllowance {
        base,
        multi_child_supplement: supplement,
        total: base + supplement,
    }
}

fn halve(amount: i64) -> i64 {
    round_kronor(Decimal::from(amount) / Decimal::from(2))
}

/// Resolves the allowance each parent receives for a household.
///
/// Explicit per-parent amounts win over a child count; without either, the
/// configured default allowance and no multi-child supplement apply.
pub fn resolve_child_allowance(household: &Household, config: &ChildAllowanceConfig) -> ChildAllowance {
    let derived = household
        .children
        .map(|children| child_allowance(children, household.custody == CustodyType::Sole, config));

    let base = household
        .child_allowance_per_parent
        .or(derived.map(|a| a.base))
        .unwrap_or(config.default_per_parent);
    let multi_child_supplement = household
        .multi_child_supplement_per_parent
        .or(derived.map(|a| a.multi_child_supplement))
        .unwrap_or(0);

    ChildAllowance {
        base,
        multi_child_supplement,
        total: base + multi_child_supplement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ChildAllowanceConfig {
        ChildAllowanceConfig::default()
    }

    fn household(children: Option<u32>, custody: CustodyType) -> Household {
        Household {
            income1: 30000,
            income2: 30000,
            custody,
            compute_partner: true,
            agreement1: false,
            agreement2: false,
            tenure1: Default::default(),
            tenure2: Default::default(),
            children,
            child_allowance_per_parent: None,
            multi_child_supplement_per_parent: None,
            child_date: None,
        }
    }

    /// CA-001: three children shared between two parents
    #[test]
    fn test_ca_001_three_children_joint() {
        let allowance = child_allowance(3, false, &config());
        assert_eq!(allowance.base, 1875);
        assert_eq!(allowance.multi_child_supplement, 365);
        assert_eq!(allowance.total, 2240);
    }

    /// CA-002: sole custody keeps the whole allowance
    #[test]
    fn test_ca_002_sole_custody() {
        let allowance = child_allowance(3, true, &config());
        assert_eq!(allowance.base, 3750);
        assert_eq!(allowance.multi_child_supplement, 730);
        assert_eq!(allowance.total, 4480);
    }

    /// CA-003: one child has no multi-child supplement
    #[test]
    fn test_ca_003_single_child() {
        let allowance = child_allowance(1, false, &config());
        assert_eq!(allowance.base, 625);
        assert_eq!(allowance.multi_child_supplement, 0);
    }

    /// CA-004: every tier of the supplement table
    #[test]
    fn test_ca_004_supplement_tiers() {
        let expected = [(2, 150), (3, 730), (4, 1740), (5, 2990), (6, 4240)];
        for (children, supplement) in expected {
            assert_eq!(
                child_allowance(children, true, &config()).multi_child_supplement,
                supplement
            );
        }
        // Beyond the table there is no supplement
        assert_eq!(child_allowance(7, true, &config()).multi_child_supplement, 0);
    }

    /// CA-005: zero children is a valid input
    #[test]
    fn test_ca_005_zero_children() {
        assert_eq!(child_allowance(0, false, &config()), ChildAllowance::default());
    }

    /// CA-006: resolution prefers explicit amounts, then the child count
    #[test]
    fn test_ca_006_resolution_order() {
        let default = resolve_child_allowance(&household(None, CustodyType::Joint), &config());
        assert_eq!(default.base, 625);
        assert_eq!(default.multi_child_supplement, 0);

        let counted = resolve_child_allowance(&household(Some(2), CustodyType::Joint), &config());
        assert_eq!(counted.base, 1250);
        assert_eq!(counted.multi_child_supplement, 75);

        let mut explicit = household(Some(2), CustodyType::Joint);
        explicit.child_allowance_per_parent = Some(1000);
        let resolved = resolve_child_allowance(&explicit, &config());
        assert_eq!(resolved.base, 1000);
        assert_eq!(resolved.multi_child_supplement, 75);
        assert_eq!(resolved.total, 1075);
    }

    /// CA-007: sole custody child count is not halved
    #[test]
    fn test_ca_007_resolution_sole_custody() {
        let resolved = resolve_child_allowance(&household(Some(1), CustodyType::Sole), &config());
        assert_eq!(resolved.base, 1250);
    }
}
