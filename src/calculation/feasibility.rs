//! Final feasibility re-check.
//!
//! After every phase is built, the combined household income of each
//! non-empty phase is compared against the floor. The counterpart income
//! during a parent's phase is the other parent's working income. The phase
//! furthest below the floor decides the verdict.

use tracing::warn;

use crate::models::{AllocationResult, AuditStep, Parent, Shortfall};

/// The result of the re-check.
#[derive(Debug, Clone)]
pub struct FeasibilityCheck {
    /// The lowest combined phase income found, or `None` without any phase.
    pub worst_combined_income: Option<i64>,
    /// The worst phase, when it is below the floor.
    pub shortfall: Option<Shortfall>,
    /// The audit step recording the re-check.
    pub audit_step: AuditStep,
}

/// Finds the phase with the lowest combined household income.
///
/// Ties go to the phase found first: parent 1 before parent 2, earlier
/// phases before later ones.
///
/// # Arguments
///
/// * `result` - The allocation with all phases built
/// * `step_number` - The step number for audit trail sequencing
pub fn recheck_feasibility(result: &AllocationResult, step_number: u32) -> FeasibilityCheck {
    let mut worst: Option<(Parent, i64)> = None;
    let mut phases_checked: u32 = 0;

    for parent in [Parent::First, Parent::Second] {
        let counterpart = result.counterpart_income(parent);
        for plan in result.phases(parent).iter().filter(|plan| !plan.is_empty()) {
            phases_checked += 1;
            let combined = plan.income + counterpart;
            if worst.is_none_or(|(_, lowest)| combined < lowest) {
                worst = Some((parent, combined));
            }
        }
    }

    let required = result.minimum_combined_income;
    let shortfall = worst
        .filter(|(_, combined)| *combined < required)
        .map(|(parent, combined)| Shortfall {
            parent,
            phase: parent.number(),
            combined_income: combined,
            required_income: required,
        });

    let reasoning = match (&shortfall, worst) {
        (Some(shortfall), _) => shortfall.message(),
        (None, Some((_, combined))) => format!(
            "Lowest combined income {} kr/month meets the required {} kr/month",
            combined, required
        ),
        (None, None) => "No leave phases to check".to_string(),
    };

    FeasibilityCheck {
        worst_combined_income: worst.map(|(_, combined)| combined),
        shortfall,
        audit_step: AuditStep {
            step_number,
            rule_id: "feasibility_recheck".to_string(),
            rule_name: "Feasibility Re-check".to_string(),
            input: serde_json::json!({
                "minimum_combined_income": required,
                "phases_checked": phases_checked
            }),
            output: serde_json::json!({
                "worst_combined_income": worst.map(|(_, combined)| combined),
                "worst_parent": worst.map(|(parent, _)| parent),
                "is_feasible": shortfall.is_none()
            }),
            reasoning,
        },
    }
}

/// Runs the re-check and records it on the result.
///
/// A shortfall overwrites the verdict; a clean re-check leaves it as is.
pub(crate) fn apply_recheck(result: &mut AllocationResult) {
    let check = recheck_feasibility(result, result.audit_trace.next_step_number());
    if let Some(shortfall) = check.shortfall {
        warn!(
            parent = %shortfall.parent,
            combined_income = shortfall.combined_income,
            required_income = shortfall.required_income,
            "Combined income below the required minimum"
        );
        result.feasibility.mark_shortfall(shortfall);
    }
    result.audit_trace.steps.push(check.audit_step);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AuditTrace, CustodyType, DayChoice, FeasibilityVerdict, OverlapPlan, PhaseKind, Plan,
    };

    fn plan(phase: PhaseKind, start_week: u32, weeks: u32, income: i64) -> Plan {
        Plan {
            weeks,
            income,
            days_per_week: 5,
            income_days_per_week: 5,
            ..Plan::empty(phase, start_week)
        }
    }

    fn result(minimum_combined_income: i64) -> AllocationResult {
        AllocationResult {
            plan1: plan(PhaseKind::WithSupplement, 0, 26, 20000),
            plan1_no_extra: plan(PhaseKind::NoSupplement, 26, 4, 17000),
            plan2: plan(PhaseKind::WithSupplement, 30, 20, 18000),
            plan2_no_extra: Plan::empty(PhaseKind::NoSupplement, 50),
            plan1_min_days: Plan::empty(PhaseKind::MinimumRate, 30),
            plan2_min_days: Plan::empty(PhaseKind::MinimumRate, 50),
            overlap_plan: OverlapPlan::none(),
            feasibility: FeasibilityVerdict::feasible(12),
            daily_rate1: 1052,
            supplement1: 4000,
            daily_rate2: 789,
            supplement2: 3000,
            remaining_income_days1: 0,
            remaining_income_days2: 0,
            remaining_min_days1: 45,
            remaining_min_days2: 45,
            working_income1: 40625,
            working_income2: 30625,
            custody: CustodyType::Joint,
            includes_partner: true,
            minimum_combined_income,
            child_allowance_per_parent: 625,
            multi_child_supplement_per_parent: 0,
            day_choice1: DayChoice::income_only(5),
            day_choice2: DayChoice::income_only(5),
            requested_weeks1: 30,
            requested_weeks2: 20,
            truncated_weeks1: 0,
            truncated_weeks2: 0,
            supplement_weeks1: 26,
            supplement_weeks2: 26,
            received_days1: 0,
            received_days2: 0,
            audit_trace: AuditTrace::default(),
        }
    }

    /// FR-001: every phase above the floor is feasible
    #[test]
    fn test_fr_001_all_phases_meet_floor() {
        let check = recheck_feasibility(&result(40000), 1);
        assert!(check.shortfall.is_none());
        // 17000 + 30625
        assert_eq!(check.worst_combined_income, Some(47625));
    }

    /// FR-002: the worst phase decides the shortfall
    #[test]
    fn test_fr_002_worst_phase_reported() {
        // Parent 1 phases: 50625, 47625. Parent 2 phase: 18000 + 40625 = 58625
        let check = recheck_feasibility(&result(50000), 1);
        let shortfall = check.shortfall.unwrap();
        assert_eq!(shortfall.parent, Parent::First);
        assert_eq!(shortfall.phase, 1);
        assert_eq!(shortfall.combined_income, 47625);
        assert_eq!(shortfall.required_income, 50000);
    }

    /// FR-003: applying the re-check keeps the transfer count
    #[test]
    fn test_fr_003_apply_keeps_transfers() {
        let mut result = result(60000);
        apply_recheck(&mut result);

        assert!(!result.feasibility.is_feasible);
        assert_eq!(result.feasibility.transferred_days, 12);
        assert!(result.feasibility.message.contains("phase 1"));
        assert_eq!(result.audit_trace.steps.len(), 1);
        assert_eq!(result.audit_trace.steps[0].rule_id, "feasibility_recheck");
    }

    /// FR-004: no phases means nothing to fail
    #[test]
    fn test_fr_004_no_phases() {
        let mut result = result(100000);
        result.plan1 = Plan::empty(PhaseKind::WithSupplement, 0);
        result.plan1_no_extra = Plan::empty(PhaseKind::NoSupplement, 0);
        result.plan2 = Plan::empty(PhaseKind::WithSupplement, 0);

        let check = recheck_feasibility(&result, 1);
        assert!(check.shortfall.is_none());
        assert_eq!(check.worst_combined_income, None);
    }

    /// FR-005: equal incomes report parent 1
    #[test]
    fn test_fr_005_tie_goes_to_parent_one() {
        let mut result = result(100000);
        result.plan1_no_extra = Plan::empty(PhaseKind::NoSupplement, 26);
        result.working_income1 = 30625;
        result.plan2.income = 20000;

        let check = recheck_feasibility(&result, 1);
        assert_eq!(check.shortfall.map(|s| s.parent), Some(Parent::First));
    }
}
