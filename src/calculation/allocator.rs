//! Leave allocation.
//!
//! [`allocate`] runs the whole optimizer for one household: benefit
//! amounts, a parent-1 pass, the overlap period, a parent-2 pass and the
//! final feasibility re-check. Each run starts from a fresh [`DayPool`] and
//! records every decision in the result's audit trace.
//!
//! Unmet income floors never fail the run; they are reported in the
//! verdict. The run only fails on invalid input, or when the requested
//! days exceed the supply under the `fail` exhaustion policy.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::{BenefitConfig, ExhaustionPolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllocationResult, AuditStep, AuditTrace, AuditWarning, CustodyType, DayChoice,
    FeasibilityVerdict, Household, OverlapPlan, Parent, PhaseKind, Plan, Preferences, Shortfall,
};

use super::child_allowance::{ChildAllowance, resolve_child_allowance};
use super::daily_rate::daily_rate;
use super::day_pool::{DayKind, DayPool};
use super::day_search::{SearchInput, initial_days_per_week, search_days};
use super::employer_supplement::{supplement_for, supplement_weeks};
use super::feasibility::apply_recheck;
use super::monthly_income::monthly_income;
use super::phase_builder::{PhaseInput, PhaseSplitResult, build_phases};
use super::rounding::months_to_weeks;

/// Largest accepted monthly amount (income, floor or allowance), SEK.
pub const MAX_MONTHLY_AMOUNT: i64 = 10_000_000;

/// Largest accepted leave duration per parent, in months.
pub const MAX_LEAVE_MONTHS: Decimal = Decimal::from_parts(120, 0, 0, false, 0);

/// Per-parent figures fixed before any days are allocated.
#[derive(Debug, Clone, Copy)]
struct ParentTerms {
    parent: Parent,
    daily_rate: i64,
    supplement: i64,
    supplement_weeks: u32,
    working_income: i64,
    requested_weeks: u32,
    start_days_per_week: u32,
}

/// What one parent's pass produced.
#[derive(Debug, Clone)]
struct ParentOutcome {
    split: PhaseSplitResult,
    choice: DayChoice,
    received_days: u32,
}

/// Mutable state threaded through one allocation run.
struct Run<'a> {
    config: &'a BenefitConfig,
    preferences: &'a Preferences,
    allowance: ChildAllowance,
    includes_partner: bool,
    max_days_per_week: u32,
    pool: DayPool,
    verdict: FeasibilityVerdict,
    trace: AuditTrace,
}

/// Allocates leave for a household.
///
/// # Arguments
///
/// * `preferences` - Requested leave, income floor, strategy and part-time flag
/// * `household` - Incomes, custody, agreements and children
/// * `config` - The benefit scheme configuration
///
/// # Returns
///
/// The six plan segments, the overlap record, the verdict, the benefit
/// figures and the remaining days, or an error for invalid input or
/// exhausted days under the `fail` policy.
///
/// # Example
///
/// ```
/// use parental_leave_planner::calculation::allocate;
/// use parental_leave_planner::config::BenefitConfig;
/// use parental_leave_planner::models::{CustodyType, Household, LeaveMonths, Preferences};
/// use rust_decimal::Decimal;
///
/// let preferences = Preferences {
///     part_time: false,
///     leave_months: LeaveMonths {
///         parent1: Decimal::from(6),
///         parent2: Decimal::from(6),
///     },
///     minimum_combined_income: 10000,
///     strategy: Default::default(),
/// };
/// let household = Household::new(30000, 30000, CustodyType::Joint);
///
/// let result = allocate(&preferences, &household, &BenefitConfig::default()).unwrap();
/// assert_eq!(result.day_choice1.days_per_week, 1);
/// assert!(result.feasibility.is_feasible);
/// ```
pub fn allocate(
    preferences: &Preferences,
    household: &Household,
    config: &BenefitConfig,
) -> EngineResult<AllocationResult> {
    validate(preferences, household)?;

    let mut trace = AuditTrace::default();
    let includes_partner = household.includes_partner();

    let allowance = resolve_child_allowance(household, &config.child_allowance);
    let step_number = trace.next_step_number();
    trace.steps.push(allowance_step(household, allowance, step_number));

    let pool = DayPool::for_custody(household.custody, &config.days);
    let max_days_per_week = config.days.max_days_per_week(preferences.part_time);

    let terms1 = parent_terms(
        Parent::First,
        preferences,
        household,
        config,
        allowance,
        &pool,
        max_days_per_week,
        true,
    );
    let terms2 = parent_terms(
        Parent::Second,
        preferences,
        household,
        config,
        allowance,
        &pool,
        max_days_per_week,
        includes_partner,
    );
    for terms in [terms1, terms2] {
        let step_number = trace.next_step_number();
        trace.steps.push(benefit_step(&terms, household, step_number));
    }

    debug!(
        daily_rate1 = terms1.daily_rate,
        daily_rate2 = terms2.daily_rate,
        weeks1 = terms1.requested_weeks,
        weeks2 = terms2.requested_weeks,
        includes_partner,
        "Benefit figures resolved"
    );

    let mut run = Run {
        config,
        preferences,
        allowance,
        includes_partner,
        max_days_per_week,
        pool,
        verdict: FeasibilityVerdict::feasible(0),
        trace,
    };

    let partner_need = terms2
        .requested_weeks
        .saturating_mul(terms2.start_days_per_week);
    let outcome1 = run.plan_parent(&terms1, terms2.working_income, 0, partner_need)?;

    let overlap_plan = if includes_partner {
        run.plan_overlap(&outcome1, &terms1, &terms2)
    } else {
        OverlapPlan::none()
    };

    let start_week2 = outcome1.split.total_weeks();
    let outcome2 = if includes_partner {
        run.plan_parent(&terms2, terms1.working_income, start_week2, 0)?
    } else {
        empty_outcome(Parent::Second, start_week2)
    };

    let Run {
        pool,
        verdict,
        trace,
        ..
    } = run;

    let mut result = AllocationResult {
        plan1: outcome1.split.with_supplement,
        plan1_no_extra: outcome1.split.no_supplement,
        plan2: outcome2.split.with_supplement,
        plan2_no_extra: outcome2.split.no_supplement,
        plan1_min_days: outcome1.split.minimum_rate,
        plan2_min_days: outcome2.split.minimum_rate,
        overlap_plan,
        feasibility: verdict,
        daily_rate1: terms1.daily_rate,
        supplement1: terms1.supplement,
        daily_rate2: terms2.daily_rate,
        supplement2: terms2.supplement,
        remaining_income_days1: pool.income_days(Parent::First),
        remaining_income_days2: pool.income_days(Parent::Second),
        remaining_min_days1: pool.min_days(Parent::First),
        remaining_min_days2: pool.min_days(Parent::Second),
        working_income1: terms1.working_income,
        working_income2: terms2.working_income,
        custody: household.custody,
        includes_partner,
        minimum_combined_income: preferences.minimum_combined_income,
        child_allowance_per_parent: allowance.base,
        multi_child_supplement_per_parent: allowance.multi_child_supplement,
        day_choice1: outcome1.choice,
        day_choice2: outcome2.choice,
        requested_weeks1: terms1.requested_weeks,
        requested_weeks2: terms2.requested_weeks,
        truncated_weeks1: outcome1.split.truncated_weeks,
        truncated_weeks2: outcome2.split.truncated_weeks,
        supplement_weeks1: terms1.supplement_weeks,
        supplement_weeks2: terms2.supplement_weeks,
        received_days1: outcome1.received_days,
        received_days2: outcome2.received_days,
        audit_trace: trace,
    };

    apply_recheck(&mut result);

    debug!(
        is_feasible = result.feasibility.is_feasible,
        transferred_days = result.feasibility.transferred_days,
        weeks1 = result.total_weeks(Parent::First),
        weeks2 = result.total_weeks(Parent::Second),
        "Allocation complete"
    );

    Ok(result)
}

impl Run<'_> {
    /// Runs one parent's pass: transfer, search, exhaustion handling, phase
    /// split and day consumption.
    fn plan_parent(
        &mut self,
        terms: &ParentTerms,
        counterpart_income: i64,
        start_week: u32,
        donor_own_need: u32,
    ) -> EngineResult<ParentOutcome> {
        let parent = terms.parent;
        let weeks = terms.requested_weeks;
        if weeks == 0 {
            return Ok(empty_outcome(parent, start_week));
        }
        let mut received_days = 0;

        let tentative = weeks.saturating_mul(terms.start_days_per_week);
        received_days += self.borrow_days(parent, tentative, donor_own_need);

        let search = search_days(
            &SearchInput {
                parent,
                daily_rate: terms.daily_rate,
                supplement: terms.supplement,
                child_allowance: self.allowance.base,
                multi_child_supplement: self.allowance.multi_child_supplement,
                counterpart_income,
                weeks,
                min_days_available: self.pool.min_days(parent),
                start_days_per_week: terms.start_days_per_week,
                max_days_per_week: self.max_days_per_week,
                minimum_combined_income: self.preferences.minimum_combined_income,
            },
            &self.config.rates,
            self.trace.next_step_number(),
        );
        self.trace.steps.push(search.audit_step);
        let choice = search.choice;

        debug!(
            parent = %parent,
            days_per_week = choice.days_per_week,
            min_days_per_week = choice.min_days_per_week,
            combined_income = search.combined_income,
            found = search.found,
            "Day search finished"
        );

        if !search.found {
            warn!(
                parent = %parent,
                combined_income = search.combined_income,
                required_income = self.preferences.minimum_combined_income,
                "No day mix meets the income floor"
            );
            if self.verdict.is_feasible {
                self.verdict.mark_shortfall(Shortfall {
                    parent,
                    phase: parent.number(),
                    combined_income: search.combined_income,
                    required_income: self.preferences.minimum_combined_income,
                });
            }
        }

        let income_need = weeks.saturating_mul(choice.income_days_per_week);
        received_days += self.borrow_days(parent, income_need, donor_own_need);

        self.check_exhaustion(parent, weeks, choice)?;

        let split = build_phases(
            &PhaseInput {
                parent,
                start_week,
                requested_weeks: weeks,
                choice,
                daily_rate: terms.daily_rate,
                supplement: terms.supplement,
                child_allowance: self.allowance.base,
                multi_child_supplement: self.allowance.multi_child_supplement,
                supplement_cap_weeks: terms.supplement_weeks,
                income_days_available: self.pool.income_days(parent),
                min_days_available: self.pool.min_days(parent),
            },
            &self.config.rates,
            self.trace.next_step_number(),
        );
        self.trace.steps.push(split.audit_step.clone());

        if split.truncated_weeks > 0 {
            warn!(
                parent = %parent,
                requested_weeks = weeks,
                truncated_weeks = split.truncated_weeks,
                "Leave shortened to the available days"
            );
            self.trace.warnings.push(AuditWarning {
                code: "LEAVE_TRUNCATED".to_string(),
                message: format!(
                    "{} leave shortened by {} of {} requested weeks",
                    title(parent),
                    split.truncated_weeks,
                    weeks
                ),
                severity: "medium".to_string(),
            });
        }

        self.pool
            .consume(parent, DayKind::Income, 1, split.used_income_days());
        self.pool.consume(parent, DayKind::Minimum, 1, split.used_min_days());

        Ok(ParentOutcome {
            split,
            choice,
            received_days,
        })
    }

    /// Moves income-level days to `parent` from the other parent when `need`
    /// exceeds the parent's balance.
    fn borrow_days(&mut self, parent: Parent, need: u32, donor_own_need: u32) -> u32 {
        let have = self.pool.income_days(parent);
        if !self.includes_partner || need <= have {
            return 0;
        }

        let donor = parent.other();
        let requested = need - have;
        let moved = self.pool.transfer(donor, parent, requested, donor_own_need);
        self.verdict.transferred_days += moved;

        debug!(
            from = %donor,
            to = %parent,
            requested,
            moved,
            "Income-level days transferred"
        );

        let step_number = self.trace.next_step_number();
        self.trace.steps.push(AuditStep {
            step_number,
            rule_id: "day_transfer".to_string(),
            rule_name: format!("Day Transfer ({} to {})", donor, parent),
            input: serde_json::json!({
                "from": donor,
                "to": parent,
                "requested": requested,
                "donor_income_days": self.pool.income_days(donor) + moved,
                "donor_own_need": donor_own_need,
                "reserved_days": self.pool.reserved_days()
            }),
            output: serde_json::json!({
                "transferred": moved,
                "from_income_days": self.pool.income_days(donor),
                "to_income_days": self.pool.income_days(parent)
            }),
            reasoning: format!(
                "{} needs {} more income-level days; {} transferable from {}",
                title(parent),
                requested,
                moved,
                donor
            ),
        });

        moved
    }

    /// Applies the exhaustion policy when the request exceeds all days left.
    fn check_exhaustion(&mut self, parent: Parent, weeks: u32, choice: DayChoice) -> EngineResult<()> {
        let days_needed = weeks.saturating_mul(choice.days_per_week);
        let days_available = self.pool.income_days(parent) + self.pool.min_days(parent);
        if days_needed <= days_available {
            return Ok(());
        }

        let policy = self.config.allocation.exhaustion;
        let step_number = self.trace.next_step_number();
        self.trace.steps.push(AuditStep {
            step_number,
            rule_id: "day_exhaustion".to_string(),
            rule_name: format!("Day Exhaustion ({})", parent),
            input: serde_json::json!({
                "weeks": weeks,
                "days_per_week": choice.days_per_week,
                "days_needed": days_needed,
                "days_available": days_available
            }),
            output: serde_json::json!({ "policy": policy }),
            reasoning: format!(
                "{} weeks at {} days/week needs {} days, {} available",
                weeks, choice.days_per_week, days_needed, days_available
            ),
        });

        match policy {
            ExhaustionPolicy::Fail => Err(EngineError::ExhaustedDays {
                parent,
                weeks,
                days_per_week: choice.days_per_week,
                days_needed,
                days_available,
            }),
            ExhaustionPolicy::Truncate => {
                debug!(
                    parent = %parent,
                    days_needed,
                    days_available,
                    "Request exceeds available days, truncating"
                );
                Ok(())
            }
        }
    }

    /// Draws the overlap days from parent 2 and records the overlap period.
    fn plan_overlap(
        &mut self,
        outcome1: &ParentOutcome,
        terms1: &ParentTerms,
        terms2: &ParentTerms,
    ) -> OverlapPlan {
        let days = &self.config.days;
        let (income_days, min_days) = self.pool.draw_spilling(Parent::Second, days.overlap_days);

        let (days_per_week, income) = match outcome1.split.first_nonempty() {
            Some(plan) => (plan.days_per_week, plan.income),
            None => (0, terms1.working_income),
        };
        let partner_income = monthly_income(
            terms2.daily_rate,
            days.overlap_days_per_week,
            terms2.supplement,
            self.allowance.base,
            self.allowance.multi_child_supplement,
            &self.config.rates,
        );

        let overlap = OverlapPlan {
            start_week: 0,
            weeks: days.overlap_weeks,
            days_per_week,
            income,
            partner_days_per_week: days.overlap_days_per_week,
            partner_income,
            partner_income_days: income_days,
            partner_min_days: min_days,
        };

        debug!(
            weeks = overlap.weeks,
            partner_income_days = income_days,
            partner_min_days = min_days,
            "Overlap period recorded"
        );

        let step_number = self.trace.next_step_number();
        self.trace.steps.push(AuditStep {
            step_number,
            rule_id: "overlap".to_string(),
            rule_name: "Overlap Period".to_string(),
            input: serde_json::json!({
                "overlap_days": days.overlap_days,
                "overlap_weeks": days.overlap_weeks
            }),
            output: serde_json::json!({
                "parent1_income": income,
                "parent2_income": partner_income,
                "partner_income_days": income_days,
                "partner_min_days": min_days
            }),
            reasoning: format!(
                "Both parents on leave for the first {} weeks; parent 2 draws {} income-level and {} minimum-level days",
                overlap.weeks, income_days, min_days
            ),
        });

        overlap
    }
}

/// Rejects negative or out-of-range amounts before any day is moved.
fn validate(preferences: &Preferences, household: &Household) -> EngineResult<()> {
    fn non_negative_amount(field: &str, value: i64) -> EngineResult<()> {
        if value < 0 {
            return Err(EngineError::InvalidInput {
                field: field.to_string(),
                message: format!("must not be negative, got {}", value),
            });
        }
        if value > MAX_MONTHLY_AMOUNT {
            return Err(EngineError::InvalidInput {
                field: field.to_string(),
                message: format!("must not exceed {}, got {}", MAX_MONTHLY_AMOUNT, value),
            });
        }
        Ok(())
    }

    non_negative_amount("income1", household.income1)?;
    non_negative_amount("income2", household.income2)?;
    non_negative_amount(
        "minimum_combined_income",
        preferences.minimum_combined_income,
    )?;
    if let Some(amount) = household.child_allowance_per_parent {
        non_negative_amount("child_allowance_per_parent", amount)?;
    }
    if let Some(amount) = household.multi_child_supplement_per_parent {
        non_negative_amount("multi_child_supplement_per_parent", amount)?;
    }

    for (field, months) in [
        ("leave_months.parent1", preferences.leave_months.parent1),
        ("leave_months.parent2", preferences.leave_months.parent2),
    ] {
        if months < Decimal::ZERO {
            return Err(EngineError::InvalidInput {
                field: field.to_string(),
                message: format!("must not be negative, got {}", months),
            });
        }
        if months > MAX_LEAVE_MONTHS {
            return Err(EngineError::InvalidInput {
                field: field.to_string(),
                message: format!("must not exceed {} months, got {}", MAX_LEAVE_MONTHS, months),
            });
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn parent_terms(
    parent: Parent,
    preferences: &Preferences,
    household: &Household,
    config: &BenefitConfig,
    allowance: ChildAllowance,
    pool: &DayPool,
    max_days_per_week: u32,
    takes_leave: bool,
) -> ParentTerms {
    let income = household.income(parent);
    let working_income = match parent {
        Parent::First => income + allowance.total,
        Parent::Second if household.custody == CustodyType::Sole || income <= 0 => 0,
        Parent::Second => income + allowance.total,
    };
    let requested_weeks = if takes_leave {
        months_to_weeks(
            preferences.leave_months.for_parent(parent),
            config.rates.weeks_per_month,
        )
    } else {
        0
    };

    ParentTerms {
        parent,
        daily_rate: daily_rate(income, &config.rates),
        supplement: supplement_for(
            income,
            household.agreement(parent),
            household.tenure(parent),
            &config.supplement,
        ),
        supplement_weeks: supplement_weeks(
            household.agreement(parent),
            household.tenure(parent),
            &config.supplement,
            config.rates.weeks_per_month,
        ),
        working_income,
        requested_weeks,
        start_days_per_week: initial_days_per_week(
            preferences.strategy,
            max_days_per_week,
            pool.income_days(parent),
            requested_weeks,
        ),
    }
}

fn empty_outcome(parent: Parent, start_week: u32) -> ParentOutcome {
    ParentOutcome {
        split: PhaseSplitResult {
            with_supplement: Plan::empty(PhaseKind::WithSupplement, start_week),
            no_supplement: Plan::empty(PhaseKind::NoSupplement, start_week),
            minimum_rate: Plan::empty(PhaseKind::MinimumRate, start_week),
            truncated_weeks: 0,
            audit_step: AuditStep {
                step_number: 0,
                rule_id: "phase_split".to_string(),
                rule_name: format!("Phase Split ({})", parent),
                input: serde_json::Value::Null,
                output: serde_json::Value::Null,
                reasoning: format!("{} takes no leave", title(parent)),
            },
        },
        choice: DayChoice::default(),
        received_days: 0,
    }
}

fn allowance_step(household: &Household, allowance: ChildAllowance, step_number: u32) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "child_allowance".to_string(),
        rule_name: "Child Allowance".to_string(),
        input: serde_json::json!({
            "children": household.children,
            "custody": household.custody,
            "child_allowance_per_parent": household.child_allowance_per_parent,
            "multi_child_supplement_per_parent": household.multi_child_supplement_per_parent
        }),
        output: serde_json::to_value(allowance).unwrap_or_default(),
        reasoning: format!(
            "Each parent receives {} kr/month child allowance and {} kr/month multi-child supplement",
            allowance.base, allowance.multi_child_supplement
        ),
    }
}

fn benefit_step(terms: &ParentTerms, household: &Household, step_number: u32) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "benefit_rates".to_string(),
        rule_name: format!("Benefit Rates ({})", terms.parent),
        input: serde_json::json!({
            "monthly_income": household.income(terms.parent),
            "agreement": household.agreement(terms.parent),
            "tenure": household.tenure(terms.parent)
        }),
        output: serde_json::json!({
            "daily_rate": terms.daily_rate,
            "supplement": terms.supplement,
            "supplement_weeks": terms.supplement_weeks,
            "working_income": terms.working_income,
            "requested_weeks": terms.requested_weeks
        }),
        reasoning: format!(
            "{} kr/day benefit, {} kr/month supplement for up to {} weeks",
            terms.daily_rate, terms.supplement, terms.supplement_weeks
        ),
    }
}

fn title(parent: Parent) -> String {
    format!("Parent {}", parent.number())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LeaveMonths, Strategy};

    fn preferences(months1: i64, months2: i64, floor: i64) -> Preferences {
        Preferences {
            part_time: false,
            leave_months: LeaveMonths {
                parent1: Decimal::from(months1),
                parent2: Decimal::from(months2),
            },
            minimum_combined_income: floor,
            strategy: Strategy::Longer,
        }
    }

    fn config() -> BenefitConfig {
        BenefitConfig::default()
    }

    /// LA-001: a low floor is met at one day per week for both parents
    #[test]
    fn test_la_001_low_floor_one_day() {
        let household = Household::new(30000, 30000, CustodyType::Joint);
        let result = allocate(&preferences(6, 6, 10000), &household, &config()).unwrap();

        assert!(result.feasibility.is_feasible);
        assert_eq!(result.day_choice1.days_per_week, 1);
        assert_eq!(result.plan1_no_extra.days_per_week, 1);
        assert_eq!(result.plan1_no_extra.weeks, 26);
        assert_eq!(result.day_choice2.days_per_week, 1);
        assert_eq!(result.plan2_no_extra.start_week, 26);
        assert_eq!(result.feasibility.transferred_days, 0);
        assert_eq!(result.working_income1, 30625);
        assert_eq!(result.working_income2, 30625);
    }

    /// LA-002: the overlap draws ten days from parent 2
    #[test]
    fn test_la_002_overlap_from_partner_pool() {
        let household = Household::new(30000, 30000, CustodyType::Joint);
        let result = allocate(&preferences(6, 6, 10000), &household, &config()).unwrap();

        assert_eq!(result.overlap_plan.weeks, 2);
        assert_eq!(result.overlap_plan.partner_income_days, 10);
        assert_eq!(result.overlap_plan.income, result.plan1_no_extra.income);
        // 789 * 5 * 4.3 = 16963.5 -> 17000, plus 625
        assert_eq!(result.overlap_plan.partner_income, 17625);
        // Overlap days count as parent 2's used days
        assert_eq!(
            result.remaining_income_days2 + result.used_income_days(Parent::Second),
            195
        );
    }

    /// LA-003: sole custody plans parent 1 only with the full pool
    #[test]
    fn test_la_003_sole_custody() {
        let mut household = Household::new(49000, 0, CustodyType::Sole);
        household.compute_partner = false;
        let result = allocate(&preferences(12, 0, 0), &household, &config()).unwrap();

        assert_eq!(result.daily_rate1, 1250);
        assert_eq!(result.working_income2, 0);
        assert_eq!(result.total_weeks(Parent::Second), 0);
        assert_eq!(result.overlap_plan, OverlapPlan::none());
        assert_eq!(
            result.remaining_income_days1 + result.used_income_days(Parent::First),
            390
        );
        assert_eq!(result.remaining_income_days2, 0);
    }

    /// LA-004: maximize starts from the rate spreading the days over the leave
    #[test]
    fn test_la_004_maximize_strategy() {
        let household = Household::new(30000, 30000, CustodyType::Joint);
        let mut prefs = preferences(12, 2, 0);
        prefs.strategy = Strategy::Maximize;
        let result = allocate(&prefs, &household, &config()).unwrap();

        // 52 weeks: 195 / 52 = 3 days/week, 45 / 52 = 0 minimum-level days
        assert_eq!(result.day_choice1, DayChoice::income_only(3));
        assert_eq!(result.plan1.used_income_days, 0);
        assert_eq!(result.plan1_no_extra.used_income_days, 156);
        assert_eq!(result.received_days1, 0);

        prefs.leave_months.parent1 = Decimal::from(18);
        let result = allocate(&prefs, &household, &config()).unwrap();
        // 77 weeks: 195 / 77 = 2 days/week
        assert_eq!(result.day_choice1, DayChoice::income_only(2));
        assert_eq!(result.total_weeks(Parent::First), 77);
        assert_eq!(result.feasibility.transferred_days, 0);
    }

    /// LA-005: a high income floor borrows at the chosen rate
    #[test]
    fn test_la_005_transfer_after_search() {
        let household = Household::new(30000, 30000, CustodyType::Joint);
        // 12 months = 52 weeks. At 7 days/week the need is 364 income-level days.
        let result = allocate(&preferences(12, 1, 1_000_000), &household, &config()).unwrap();

        assert!(!result.feasibility.is_feasible);
        assert_eq!(result.day_choice1, DayChoice::income_only(7));
        // Parent 2 keeps 90 reserved, 10 overlap reserve and 4 weeks * 1 day
        assert_eq!(result.received_days1, 91);
        assert_eq!(result.feasibility.transferred_days, 91);
        assert_eq!(
            result.remaining_income_days1
                + result.remaining_income_days2
                + result.used_income_days(Parent::First)
                + result.used_income_days(Parent::Second),
            390
        );
    }

    /// LA-006: an unreachable floor is reported, never an error
    #[test]
    fn test_la_006_unreachable_floor_is_soft() {
        let household = Household::new(30000, 30000, CustodyType::Joint);
        let result = allocate(&preferences(6, 6, 1_000_000), &household, &config()).unwrap();

        assert!(!result.feasibility.is_feasible);
        assert!(result.feasibility.message.contains("1000000"));
        assert!(result.feasibility.shortfall.is_some());
        assert_eq!(result.day_choice1.days_per_week, 7);
    }

    /// LA-007: negative inputs are rejected
    #[test]
    fn test_la_007_negative_inputs_rejected() {
        let household = Household::new(-1, 30000, CustodyType::Joint);
        let err = allocate(&preferences(6, 6, 0), &household, &config()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { ref field, .. } if field == "income1"));

        let household = Household::new(30000, 30000, CustodyType::Joint);
        let err = allocate(&preferences(-1, 6, 0), &household, &config()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { ref field, .. } if field == "leave_months.parent1"));

        let err = allocate(&preferences(6, 6, -5), &household, &config()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { .. }));
    }

    /// LA-008: exhaustion fails under the fail policy
    #[test]
    fn test_la_008_exhaustion_fail_policy() {
        let mut household = Household::new(30000, 0, CustodyType::Joint);
        household.compute_partner = false;
        let mut config = config();
        config.allocation.exhaustion = ExhaustionPolicy::Fail;

        let err = allocate(&preferences(24, 0, 1_000_000), &household, &config).unwrap_err();
        match err {
            EngineError::ExhaustedDays {
                parent,
                weeks,
                days_per_week,
                days_needed,
                days_available,
            } => {
                assert_eq!(parent, Parent::First);
                assert_eq!(weeks, 103);
                assert_eq!(days_per_week, 7);
                assert_eq!(days_needed, 721);
                assert_eq!(days_available, 240);
            }
            other => panic!("expected ExhaustedDays, got {other:?}"),
        }
    }

    /// LA-009: exhaustion truncates under the default policy
    #[test]
    fn test_la_009_exhaustion_truncates() {
        let mut household = Household::new(30000, 0, CustodyType::Joint);
        household.compute_partner = false;
        let result = allocate(&preferences(24, 0, 1_000_000), &household, &config()).unwrap();

        assert_eq!(result.total_weeks(Parent::First), 33);
        assert_eq!(result.truncated_weeks1, 70);
        assert_eq!(result.plan1_min_days.weeks, 6);
        assert_eq!(result.remaining_income_days1, 6);
        assert_eq!(result.remaining_min_days1, 3);
        assert!(
            result
                .audit_trace
                .warnings
                .iter()
                .any(|w| w.code == "LEAVE_TRUNCATED")
        );
    }

    /// LA-010: the exhaustion step records the policy applied
    #[test]
    fn test_la_010_exhaustion_step_records_policy() {
        let mut household = Household::new(30000, 0, CustodyType::Joint);
        household.compute_partner = false;
        let result = allocate(&preferences(24, 0, 1_000_000), &household, &config()).unwrap();

        let step = result
            .audit_trace
            .steps
            .iter()
            .find(|s| s.rule_id == "day_exhaustion")
            .unwrap();
        assert_eq!(step.output["policy"], "truncate");
        assert_eq!(step.input["days_available"], 240);
    }

    /// LA-011: identical inputs give identical results
    #[test]
    fn test_la_011_allocation_is_deterministic() {
        let household = Household::new(30000, 30000, CustodyType::Joint);
        let first = allocate(&preferences(6, 6, 10000), &household, &config()).unwrap();
        let second = allocate(&preferences(6, 6, 10000), &household, &config()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.audit_trace.duration_us, 0);
    }

    /// LA-012: amounts and durations beyond the accepted range are rejected
    #[test]
    fn test_la_012_out_of_range_inputs_rejected() {
        let household = Household::new(i64::MAX, 30000, CustodyType::Joint);
        let err = allocate(&preferences(6, 6, 0), &household, &config()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { ref field, .. } if field == "income1"));

        let mut household = Household::new(30000, 30000, CustodyType::Joint);
        household.child_allowance_per_parent = Some(i64::MAX);
        let err = allocate(&preferences(6, 6, 0), &household, &config()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { ref field, .. } if field == "child_allowance_per_parent"));

        let household = Household::new(30000, 30000, CustodyType::Joint);
        let mut prefs = preferences(6, 6, 0);
        prefs.leave_months.parent1 = Decimal::MAX;
        let err = allocate(&prefs, &household, &config()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { ref field, .. } if field == "leave_months.parent1"));

        prefs.leave_months.parent1 = MAX_LEAVE_MONTHS;
        assert!(allocate(&prefs, &household, &config()).is_ok());
    }

    #[test]
    fn test_audit_trace_is_sequenced() {
        let household = Household::new(30000, 30000, CustodyType::Joint);
        let result = allocate(&preferences(6, 6, 10000), &household, &config()).unwrap();

        let steps = &result.audit_trace.steps;
        assert!(!steps.is_empty());
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.step_number, i as u32 + 1);
        }
        assert_eq!(steps.last().unwrap().rule_id, "feasibility_recheck");
        assert!(steps.iter().any(|s| s.rule_id == "overlap"));
    }
}
