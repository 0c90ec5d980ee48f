//! Allocation result models.
//!
//! This module contains the [`AllocationResult`] returned by the leave
//! allocator, the [`FeasibilityVerdict`] it carries, and the audit trace
//! recording every decision the allocator made.

use serde::{Deserialize, Serialize};

use super::{CustodyType, DayChoice, OverlapPlan, Parent, Plan};

/// A single step in the audit trace recording an allocation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during allocation.
///
/// Warnings indicate potential issues that don't prevent allocation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for an allocation.
///
/// # Example
///
/// ```
/// use parental_leave_planner::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of allocation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during allocation.
    pub warnings: Vec<AuditWarning>,
    /// The total allocation duration in microseconds, filled in by the
    /// caller that timed it. Zero when untimed.
    pub duration_us: u64,
}

impl AuditTrace {
    /// Returns the step number the next recorded step should carry.
    pub fn next_step_number(&self) -> u32 {
        self.steps.len() as u32 + 1
    }
}

/// The phase whose combined household income fell furthest below the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    /// The parent on leave during the failing phase.
    pub parent: Parent,
    /// The 1-based phase number (1 for parent 1's leave, 2 for parent 2's).
    pub phase: u8,
    /// Combined household income during the phase, SEK per month.
    pub combined_income: i64,
    /// The required minimum combined income, SEK per month.
    pub required_income: i64,
}

impl Shortfall {
    /// Returns the human-readable message for this shortfall.
    ///
    /// # Examples
    ///
    /// ```
    /// use parental_leave_planner::models::{Parent, Shortfall};
    ///
    /// let shortfall = Shortfall {
    ///     parent: Parent::Second,
    ///     phase: 2,
    ///     combined_income: 18400,
    ///     required_income: 20000,
    /// };
    /// assert_eq!(
    ///     shortfall.message(),
    ///     "Combined income 18400 kr/month in phase 2 is below the required 20000 kr/month."
    /// );
    /// ```
    pub fn message(&self) -> String {
        format!(
            "Combined income {} kr/month in phase {} is below the required {} kr/month.",
            self.combined_income, self.phase, self.required_income
        )
    }
}

/// Whether the allocation meets the household's income floor.
///
/// An unmet floor is never an error: the allocation still completes and the
/// verdict records the shortfall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeasibilityVerdict {
    /// True if every phase meets the income floor.
    pub is_feasible: bool,
    /// Description of the shortfall, empty when feasible.
    pub message: String,
    /// Income-level days moved between the parents during the run.
    pub transferred_days: u32,
    /// The structured shortfall, when infeasible.
    pub shortfall: Option<Shortfall>,
}

impl FeasibilityVerdict {
    /// Creates a feasible verdict with the given transfer count.
    pub fn feasible(transferred_days: u32) -> Self {
        Self {
            is_feasible: true,
            message: String::new(),
            transferred_days,
            shortfall: None,
        }
    }

    /// Marks the verdict infeasible with the given shortfall.
    ///
    /// The transfer count is kept.
    pub fn mark_shortfall(&mut self, shortfall: Shortfall) {
        self.is_feasible = false;
        self.message = shortfall.message();
        self.shortfall = Some(shortfall);
    }
}

impl Default for FeasibilityVerdict {
    fn default() -> Self {
        Self::feasible(0)
    }
}

/// The complete output of one allocation run.
///
/// The first block of fields is the contract consumed by presentation code:
/// the six plan segments, the overlap record, the verdict, rates, supplements,
/// remaining days and working incomes. The rest records the context the
/// timeline, the boundary drag and the strategy summary need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// Parent 1's phase with the employer supplement.
    pub plan1: Plan,
    /// Parent 1's phase after the supplement period.
    pub plan1_no_extra: Plan,
    /// Parent 2's phase with the employer supplement.
    pub plan2: Plan,
    /// Parent 2's phase after the supplement period.
    pub plan2_no_extra: Plan,
    /// Parent 1's minimum-rate phase.
    pub plan1_min_days: Plan,
    /// Parent 2's minimum-rate phase.
    pub plan2_min_days: Plan,
    /// The initial period where both parents are on leave.
    pub overlap_plan: OverlapPlan,
    /// Whether the income floor is met.
    pub feasibility: FeasibilityVerdict,
    /// Parent 1's benefit per income-level day, SEK.
    pub daily_rate1: i64,
    /// Parent 1's employer supplement, SEK per month.
    pub supplement1: i64,
    /// Parent 2's benefit per income-level day, SEK.
    pub daily_rate2: i64,
    /// Parent 2's employer supplement, SEK per month.
    pub supplement2: i64,
    /// Parent 1's income-level days left after the plan.
    pub remaining_income_days1: u32,
    /// Parent 2's income-level days left after the plan.
    pub remaining_income_days2: u32,
    /// Parent 1's minimum-level days left after the plan.
    pub remaining_min_days1: u32,
    /// Parent 2's minimum-level days left after the plan.
    pub remaining_min_days2: u32,
    /// Parent 1's monthly income while working, SEK.
    pub working_income1: i64,
    /// Parent 2's monthly income while working, SEK; 0 without a partner income.
    pub working_income2: i64,

    /// The custody arrangement the plan was made for.
    pub custody: CustodyType,
    /// Whether parent 2's leave is part of the plan.
    pub includes_partner: bool,
    /// The required minimum combined income, SEK per month.
    pub minimum_combined_income: i64,
    /// Child allowance paid to each parent, SEK per month.
    pub child_allowance_per_parent: i64,
    /// Multi-child supplement paid to each parent, SEK per month.
    pub multi_child_supplement_per_parent: i64,
    /// The day mix chosen for parent 1.
    pub day_choice1: DayChoice,
    /// The day mix chosen for parent 2.
    pub day_choice2: DayChoice,
    /// Weeks of leave requested for parent 1.
    pub requested_weeks1: u32,
    /// Weeks of leave requested for parent 2.
    pub requested_weeks2: u32,
    /// Requested weeks of parent 1 the day supply could not cover.
    pub truncated_weeks1: u32,
    /// Requested weeks of parent 2 the day supply could not cover.
    pub truncated_weeks2: u32,
    /// Length of parent 1's supplement period in weeks.
    pub supplement_weeks1: u32,
    /// Length of parent 2's supplement period in weeks.
    pub supplement_weeks2: u32,
    /// Income-level days parent 1 received from parent 2.
    pub received_days1: u32,
    /// Income-level days parent 2 received from parent 1.
    pub received_days2: u32,
    /// Every decision made during the run.
    pub audit_trace: AuditTrace,
}

impl AllocationResult {
    /// Returns the given parent's three phases in schedule order.
    pub fn phases(&self, parent: Parent) -> [Plan; 3] {
        match parent {
            Parent::First => [self.plan1, self.plan1_no_extra, self.plan1_min_days],
            Parent::Second => [self.plan2, self.plan2_no_extra, self.plan2_min_days],
        }
    }

    /// Returns the total weeks of leave scheduled for the given parent.
    pub fn total_weeks(&self, parent: Parent) -> u32 {
        self.phases(parent).iter().map(|plan| plan.weeks).sum()
    }

    /// Returns the week the given parent's leave starts.
    pub fn start_week(&self, parent: Parent) -> u32 {
        self.phases(parent)[0].start_week
    }

    /// Returns the income-level days used by the given parent, overlap included.
    pub fn used_income_days(&self, parent: Parent) -> u32 {
        let plans: u32 = self
            .phases(parent)
            .iter()
            .map(|plan| plan.used_income_days)
            .sum();
        match parent {
            Parent::First => plans,
            Parent::Second => plans + self.overlap_plan.partner_income_days,
        }
    }

    /// Returns the minimum-level days used by the given parent, overlap included.
    pub fn used_min_days(&self, parent: Parent) -> u32 {
        let plans: u32 = self
            .phases(parent)
            .iter()
            .map(|plan| plan.used_min_days)
            .sum();
        match parent {
            Parent::First => plans,
            Parent::Second => plans + self.overlap_plan.partner_min_days,
        }
    }

    /// Returns the given parent's remaining income-level days.
    pub fn remaining_income_days(&self, parent: Parent) -> u32 {
        match parent {
            Parent::First => self.remaining_income_days1,
            Parent::Second => self.remaining_income_days2,
        }
    }

    /// Returns the given parent's remaining minimum-level days.
    pub fn remaining_min_days(&self, parent: Parent) -> u32 {
        match parent {
            Parent::First => self.remaining_min_days1,
            Parent::Second => self.remaining_min_days2,
        }
    }

    /// Returns the given parent's daily benefit rate.
    pub fn daily_rate(&self, parent: Parent) -> i64 {
        match parent {
            Parent::First => self.daily_rate1,
            Parent::Second => self.daily_rate2,
        }
    }

    /// Returns the given parent's employer supplement.
    pub fn supplement(&self, parent: Parent) -> i64 {
        match parent {
            Parent::First => self.supplement1,
            Parent::Second => self.supplement2,
        }
    }

    /// Returns the given parent's working income.
    pub fn working_income(&self, parent: Parent) -> i64 {
        match parent {
            Parent::First => self.working_income1,
            Parent::Second => self.working_income2,
        }
    }

    /// Returns the income the other parent brings in while `parent` is on
    /// leave.
    pub fn counterpart_income(&self, parent: Parent) -> i64 {
        self.working_income(parent.other())
    }

    /// Returns the day mix chosen for the given parent.
    pub fn day_choice(&self, parent: Parent) -> DayChoice {
        match parent {
            Parent::First => self.day_choice1,
            Parent::Second => self.day_choice2,
        }
    }

    /// Returns the length of the given parent's supplement period in weeks.
    pub fn supplement_weeks(&self, parent: Parent) -> u32 {
        match parent {
            Parent::First => self.supplement_weeks1,
            Parent::Second => self.supplement_weeks2,
        }
    }

    /// Returns supplement weeks the given parent was entitled to but did not
    /// take.
    pub fn unused_supplement_weeks(&self, parent: Parent) -> u32 {
        let taken = self.phases(parent)[0].weeks;
        self.supplement_weeks(parent).saturating_sub(taken)
    }

    /// Returns the income-level days the given parent received by transfer.
    pub fn received_days(&self, parent: Parent) -> u32 {
        match parent {
            Parent::First => self.received_days1,
            Parent::Second => self.received_days2,
        }
    }
}
