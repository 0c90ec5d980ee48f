//! Interactive boundary dragging.
//!
//! The boundary between parent 1's and parent 2's leave can be dragged on
//! the timeline. Dragging never re-runs the day search: it re-slices parent
//! 1's phases under the original day mix, shifts parent 2's phases to start
//! right after, re-checks feasibility and regenerates the series.
//!
//! Pointer events drive a small state machine:
//!
//! ```text
//! Idle --Press on a handle--> Dragging --Release / Leave--> Idle
//!                              |    ^
//!                              +Move+
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::BenefitConfig;
use crate::models::{AllocationResult, FeasibilityVerdict, Parent, WeekEntry};

use super::feasibility::apply_recheck;
use super::phase_builder::{PhaseInput, build_phases};
use super::timeline::{TimelineOptions, generate, horizon};

/// Which side of the boundary a handle sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragBoundary {
    /// The last week of parent 1's leave.
    Parent1End,
    /// The first week of parent 2's leave.
    Parent2Start,
}

/// A draggable point on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragHandle {
    /// The week index of the point.
    pub point_id: u32,
    /// The boundary the point belongs to.
    pub boundary: DragBoundary,
}

/// The drag interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A handle is being dragged.
    Dragging {
        /// The week index of the dragged point.
        point_id: u32,
        /// The boundary being moved.
        boundary: DragBoundary,
    },
}

/// A pointer event on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DragEvent {
    /// The pointer was pressed on a week.
    Press {
        /// The week under the pointer.
        week: u32,
    },
    /// The pointer moved to a week.
    Move {
        /// The week under the pointer.
        week: u32,
    },
    /// The pointer was released.
    Release,
    /// The pointer left the timeline.
    Leave,
}

/// Returns the draggable points of an allocation.
///
/// No handle exists for a parent without leave.
pub fn drag_handles(result: &AllocationResult) -> Vec<DragHandle> {
    let weeks1 = result.total_weeks(Parent::First);
    let mut handles = Vec::with_capacity(2);
    if weeks1 > 0 {
        handles.push(DragHandle {
            point_id: weeks1 - 1,
            boundary: DragBoundary::Parent1End,
        });
    }
    if result.total_weeks(Parent::Second) > 0 {
        handles.push(DragHandle {
            point_id: weeks1,
            boundary: DragBoundary::Parent2Start,
        });
    }
    handles
}

/// Computes the next drag state.
///
/// # Examples
///
/// ```
/// use parental_leave_planner::calculation::{DragBoundary, DragEvent, DragHandle, DragState, transition};
///
/// let handles = [DragHandle { point_id: 25, boundary: DragBoundary::Parent1End }];
/// let state = transition(DragState::Idle, DragEvent::Press { week: 25 }, &handles);
/// assert_eq!(state, DragState::Dragging { point_id: 25, boundary: DragBoundary::Parent1End });
/// assert_eq!(transition(state, DragEvent::Release, &handles), DragState::Idle);
/// ```
pub fn transition(state: DragState, event: DragEvent, handles: &[DragHandle]) -> DragState {
    match (state, event) {
        (DragState::Idle, DragEvent::Press { week }) => handles
            .iter()
            .find(|handle| handle.point_id == week)
            .map_or(DragState::Idle, |handle| DragState::Dragging {
                point_id: handle.point_id,
                boundary: handle.boundary,
            }),
        (DragState::Idle, _) => DragState::Idle,
        (DragState::Dragging { .. }, DragEvent::Release | DragEvent::Leave) => DragState::Idle,
        (dragging @ DragState::Dragging { .. }, DragEvent::Press { .. } | DragEvent::Move { .. }) => dragging,
    }
}

/// Re-slices parent 1's leave to `parent1_weeks` under the original day mix.
///
/// Parent 1's days are returned to the balance and re-spent. Parent 2's
/// phases keep their lengths and start right after parent 1's. The
/// transfer count is kept and the feasibility re-check runs again.
///
/// # Arguments
///
/// * `original` - The allocation produced by the search
/// * `parent1_weeks` - The requested length of parent 1's leave
/// * `config` - The scheme configuration the allocation was made with
pub fn reslice_parent1(
    original: &AllocationResult,
    parent1_weeks: u32,
    config: &BenefitConfig,
) -> AllocationResult {
    let income_days = original.remaining_income_days1 + original.used_income_days(Parent::First);
    let min_days = original.remaining_min_days1 + original.used_min_days(Parent::First);

    let mut result = original.clone();
    let split = build_phases(
        &PhaseInput {
            parent: Parent::First,
            start_week: 0,
            requested_weeks: parent1_weeks,
            choice: original.day_choice1,
            daily_rate: original.daily_rate1,
            supplement: original.supplement1,
            child_allowance: original.child_allowance_per_parent,
            multi_child_supplement: original.multi_child_supplement_per_parent,
            supplement_cap_weeks: original.supplement_weeks1,
            income_days_available: income_days,
            min_days_available: min_days,
        },
        &config.rates,
        result.audit_trace.next_step_number(),
    );

    result.plan1 = split.with_supplement;
    result.plan1_no_extra = split.no_supplement;
    result.plan1_min_days = split.minimum_rate;
    result.requested_weeks1 = parent1_weeks;
    result.truncated_weeks1 = split.truncated_weeks;
    result.remaining_income_days1 = income_days - split.used_income_days();
    result.remaining_min_days1 = min_days - split.used_min_days();

    let start2 = split.total_weeks();
    result.plan2 = original.plan2.shifted_to(start2);
    result.plan2_no_extra = original.plan2_no_extra.shifted_to(result.plan2.end_week());
    result.plan2_min_days = original
        .plan2_min_days
        .shifted_to(result.plan2_no_extra.end_week());

    if original.includes_partner {
        match split.first_nonempty() {
            Some(plan) => {
                result.overlap_plan.days_per_week = plan.days_per_week;
                result.overlap_plan.income = plan.income;
            }
            None => {
                result.overlap_plan.days_per_week = 0;
                result.overlap_plan.income = original.working_income1;
            }
        }
    }

    result.audit_trace.steps.push(split.audit_step);
    result.feasibility = FeasibilityVerdict::feasible(original.feasibility.transferred_days);
    apply_recheck(&mut result);

    debug!(
        parent1_weeks = start2,
        truncated_weeks = result.truncated_weeks1,
        is_feasible = result.feasibility.is_feasible,
        "Parent 1 leave re-sliced"
    );

    result
}

/// Holds an allocation and its timeline while the boundary is dragged.
///
/// Every move re-slices from the original allocation, so the outcome of a
/// drag depends only on where the pointer ends up.
#[derive(Debug, Clone)]
pub struct TimelineEditor {
    config: BenefitConfig,
    options: TimelineOptions,
    original: AllocationResult,
    current: AllocationResult,
    entries: Vec<WeekEntry>,
    horizon: u32,
    state: DragState,
}

impl TimelineEditor {
    /// Creates an editor for an allocation.
    ///
    /// The horizon is fixed at creation time.
    pub fn new(original: AllocationResult, config: BenefitConfig, child_date: Option<NaiveDate>) -> Self {
        let horizon = horizon(&original, config.allocation.timeline_min_weeks);
        let options = TimelineOptions {
            min_weeks: horizon,
            child_date,
            severity_error_ratio: config.allocation.severity_error_ratio,
        };
        let entries = generate(&original, &options);
        Self {
            config,
            options,
            current: original.clone(),
            original,
            entries,
            horizon,
            state: DragState::Idle,
        }
    }

    /// Returns the current drag state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Returns the allocation as currently re-sliced.
    pub fn current(&self) -> &AllocationResult {
        &self.current
    }

    /// Returns the current timeline.
    pub fn entries(&self) -> &[WeekEntry] {
        &self.entries
    }

    /// Returns the fixed number of weeks in the timeline.
    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    /// Returns the draggable points of the current allocation.
    pub fn handles(&self) -> Vec<DragHandle> {
        drag_handles(&self.current)
    }

    /// Returns the allowed range for parent 1's leave length.
    ///
    /// The lower bound keeps parent 1 on leave through the overlap; the upper
    /// bound leaves room for parent 2's leave and one more week.
    pub fn parent1_bounds(&self) -> (u32, u32) {
        let lower = if self.original.includes_partner {
            self.config.days.overlap_weeks.max(1)
        } else {
            1
        };
        let upper = self
            .horizon
            .saturating_sub(self.original.total_weeks(Parent::Second))
            .saturating_sub(1);
        (lower, upper.max(lower))
    }

    /// Feeds a pointer event into the editor.
    ///
    /// # Returns
    ///
    /// True if the allocation and timeline were regenerated.
    pub fn handle_event(&mut self, event: DragEvent) -> bool {
        let handles = self.handles();
        let next = transition(self.state, event, &handles);

        let regenerated = match (next, event) {
            (DragState::Dragging { boundary, .. }, DragEvent::Move { week }) => {
                let requested = match boundary {
                    DragBoundary::Parent1End => week.saturating_add(1),
                    DragBoundary::Parent2Start => week,
                };
                let (lower, upper) = self.parent1_bounds();
                let parent1_weeks = requested.clamp(lower, upper);

                self.current = reslice_parent1(&self.original, parent1_weeks, &self.config);
                self.entries = generate(&self.current, &self.options);
                true
            }
            _ => false,
        };

        self.state = match next {
            DragState::Dragging { boundary, .. } if regenerated => {
                let weeks1 = self.current.total_weeks(Parent::First);
                let point_id = match boundary {
                    DragBoundary::Parent1End => weeks1.saturating_sub(1),
                    DragBoundary::Parent2Start => weeks1,
                };
                DragState::Dragging { point_id, boundary }
            }
            other => other,
        };

        regenerated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::allocate;
    use crate::models::{CustodyType, Household, LeaveMonths, PeriodLabel, Preferences, Strategy};
    use rust_decimal::Decimal;

    fn two_earners() -> AllocationResult {
        let preferences = Preferences {
            part_time: false,
            leave_months: LeaveMonths {
                parent1: Decimal::from(6),
                parent2: Decimal::from(6),
            },
            minimum_combined_income: 10000,
            strategy: Strategy::Longer,
        };
        let household = Household::new(30000, 30000, CustodyType::Joint);
        allocate(&preferences, &household, &BenefitConfig::default()).unwrap()
    }

    fn editor() -> TimelineEditor {
        TimelineEditor::new(two_earners(), BenefitConfig::default(), None)
    }

    fn leave_parent(entry: &WeekEntry) -> Option<Parent> {
        match entry.period {
            PeriodLabel::Leave { parent, .. } => Some(parent),
            _ => None,
        }
    }

    /// BD-001: shortening parent 1 returns days and moves parent 2 forward
    #[test]
    fn test_bd_001_reslice_shorter() {
        let original = two_earners();
        let resliced = reslice_parent1(&original, 20, &BenefitConfig::default());

        assert_eq!(resliced.total_weeks(Parent::First), 20);
        assert_eq!(resliced.plan2.start_week, 20);
        assert_eq!(
            resliced.total_weeks(Parent::Second),
            original.total_weeks(Parent::Second)
        );
        assert_eq!(resliced.day_choice1, original.day_choice1);
        assert_eq!(resliced.remaining_min_days1, 25);
        assert_eq!(
            resliced.remaining_min_days1 + resliced.used_min_days(Parent::First),
            original.remaining_min_days1 + original.used_min_days(Parent::First)
        );
    }

    /// BD-002: lengthening past the day supply truncates
    #[test]
    fn test_bd_002_reslice_beyond_supply() {
        let original = two_earners();
        // One minimum-level day per week, 45 available
        let resliced = reslice_parent1(&original, 50, &BenefitConfig::default());

        assert_eq!(resliced.total_weeks(Parent::First), 45);
        assert_eq!(resliced.plan1.weeks, 0);
        assert_eq!(resliced.plan1_no_extra.weeks, 45);
        assert_eq!(resliced.truncated_weeks1, 5);
        assert_eq!(resliced.remaining_min_days1, 0);
        assert_eq!(resliced.plan2.start_week, 45);
    }

    /// BD-003: the re-check runs again and keeps the transfer count
    #[test]
    fn test_bd_003_recheck_after_reslice() {
        let mut original = two_earners();
        original.feasibility.transferred_days = 7;
        original.minimum_combined_income = 35000;

        let resliced = reslice_parent1(&original, 20, &BenefitConfig::default());
        assert!(!resliced.feasibility.is_feasible);
        assert_eq!(resliced.feasibility.transferred_days, 7);
        assert_eq!(
            resliced.audit_trace.steps.last().map(|s| s.rule_id.as_str()),
            Some("feasibility_recheck")
        );
    }

    /// BD-004: state machine transitions
    #[test]
    fn test_bd_004_transitions() {
        let handles = drag_handles(&two_earners());
        assert_eq!(
            handles,
            vec![
                DragHandle {
                    point_id: 25,
                    boundary: DragBoundary::Parent1End,
                },
                DragHandle {
                    point_id: 26,
                    boundary: DragBoundary::Parent2Start,
                },
            ]
        );

        let idle = DragState::Idle;
        assert_eq!(transition(idle, DragEvent::Press { week: 10 }, &handles), idle);
        assert_eq!(transition(idle, DragEvent::Move { week: 26 }, &handles), idle);

        let dragging = transition(idle, DragEvent::Press { week: 26 }, &handles);
        assert_eq!(
            dragging,
            DragState::Dragging {
                point_id: 26,
                boundary: DragBoundary::Parent2Start,
            }
        );
        assert_eq!(transition(dragging, DragEvent::Move { week: 30 }, &handles), dragging);
        assert_eq!(transition(dragging, DragEvent::Leave, &handles), idle);
    }

    /// BD-005: dragging parent 1's end regenerates the timeline
    #[test]
    fn test_bd_005_drag_parent1_end() {
        let mut editor = editor();
        assert_eq!(editor.horizon(), 60);

        assert!(!editor.handle_event(DragEvent::Press { week: 25 }));
        assert!(editor.handle_event(DragEvent::Move { week: 29 }));
        assert_eq!(editor.current().total_weeks(Parent::First), 30);
        assert_eq!(
            editor.state(),
            DragState::Dragging {
                point_id: 29,
                boundary: DragBoundary::Parent1End,
            }
        );
        assert_eq!(leave_parent(&editor.entries()[29]), Some(Parent::First));
        assert_eq!(leave_parent(&editor.entries()[30]), Some(Parent::Second));

        assert!(!editor.handle_event(DragEvent::Release));
        assert_eq!(editor.state(), DragState::Idle);
        assert_eq!(editor.current().total_weeks(Parent::First), 30);
    }

    /// BD-006: the boundary is clamped to the allowed range
    #[test]
    fn test_bd_006_clamping() {
        let mut editor = editor();
        assert_eq!(editor.parent1_bounds(), (2, 33));

        editor.handle_event(DragEvent::Press { week: 26 });
        editor.handle_event(DragEvent::Move { week: 100 });
        assert_eq!(editor.current().total_weeks(Parent::First), 33);
        assert_eq!(editor.entries().len(), 60);

        editor.handle_event(DragEvent::Move { week: 0 });
        assert_eq!(editor.current().total_weeks(Parent::First), 2);
    }

    /// BD-008: a move at the last representable week clamps to the bound
    #[test]
    fn test_bd_008_move_at_week_limit() {
        let mut editor = editor();
        editor.handle_event(DragEvent::Press { week: 25 });

        assert!(editor.handle_event(DragEvent::Move { week: u32::MAX }));
        assert_eq!(editor.current().total_weeks(Parent::First), 33);
        assert_eq!(editor.entries().len(), 60);
    }

    /// BD-007: moves are independent of the path taken
    #[test]
    fn test_bd_007_path_independent() {
        let mut direct = editor();
        direct.handle_event(DragEvent::Press { week: 25 });
        direct.handle_event(DragEvent::Move { week: 19 });

        let mut wandering = editor();
        wandering.handle_event(DragEvent::Press { week: 25 });
        for week in [30, 5, 33, 12, 19] {
            wandering.handle_event(DragEvent::Move { week });
        }

        assert_eq!(direct.entries(), wandering.entries());
        assert_eq!(direct.current(), wandering.current());
    }

    #[test]
    fn test_moves_without_drag_are_ignored() {
        let mut editor = editor();
        let before = editor.entries().to_vec();
        assert!(!editor.handle_event(DragEvent::Move { week: 40 }));
        assert_eq!(editor.entries(), before.as_slice());
    }
}
