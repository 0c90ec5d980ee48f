//! Plan segment models.
//!
//! A parent's leave is a sequence of up to three contiguous [`Plan`]
//! segments, one per [`PhaseKind`]. Each segment is a half-open week range
//! `[start_week, start_week + weeks)`.

use serde::{Deserialize, Serialize};

/// The kind of a leave phase.
///
/// Phases always appear in the order listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// Benefit plus the employer supplement, capped by the supplement period.
    WithSupplement,
    /// Same day mix as the first phase, after the supplement period ended.
    NoSupplement,
    /// Minimum-level days only, once income-level days are spent.
    MinimumRate,
}

impl PhaseKind {
    /// All phase kinds in schedule order.
    pub const ALL: [PhaseKind; 3] = [
        PhaseKind::WithSupplement,
        PhaseKind::NoSupplement,
        PhaseKind::MinimumRate,
    ];
}

/// The weekly day mix chosen by the day-count search.
///
/// `days_per_week` always equals `income_days_per_week + min_days_per_week`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayChoice {
    /// Total benefit days drawn per week.
    pub days_per_week: u32,
    /// Income-level days drawn per week.
    pub income_days_per_week: u32,
    /// Minimum-level days drawn per week.
    pub min_days_per_week: u32,
}

impl DayChoice {
    /// Creates a choice splitting `days_per_week` into the given number of
    /// minimum-level days and income-level days for the rest.
    ///
    /// # Examples
    ///
    /// ```
    /// use parental_leave_planner::models::DayChoice;
    ///
    /// let choice = DayChoice::split(5, 2);
    /// assert_eq!(choice.income_days_per_week, 3);
    /// assert_eq!(choice.min_days_per_week, 2);
    /// ```
    pub fn split(days_per_week: u32, min_days_per_week: u32) -> Self {
        let min_days_per_week = min_days_per_week.min(days_per_week);
        Self {
            days_per_week,
            income_days_per_week: days_per_week - min_days_per_week,
            min_days_per_week,
        }
    }

    /// Creates a choice drawing only income-level days.
    pub fn income_only(days_per_week: u32) -> Self {
        Self::split(days_per_week, 0)
    }
}

/// One contiguous leave segment for one parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Which phase of the parent's schedule this segment is.
    pub phase: PhaseKind,
    /// First week of the segment (0-based, counted from the start of leave).
    pub start_week: u32,
    /// Number of weeks in the segment.
    pub weeks: u32,
    /// Total benefit days drawn per week.
    pub days_per_week: u32,
    /// Income-level days drawn per week.
    pub income_days_per_week: u32,
    /// Minimum-level days drawn per week.
    pub min_days_per_week: u32,
    /// Monthly income during the segment, SEK.
    pub income: i64,
    /// Monthly income during the segment without the employer supplement, SEK.
    pub income_without_supplement: i64,
    /// The employer supplement included in `income`, SEK per month.
    pub supplement: i64,
    /// Income-level days consumed by the segment.
    pub used_income_days: u32,
    /// Minimum-level days consumed by the segment.
    pub used_min_days: u32,
}

impl Plan {
    /// Creates an empty segment of the given phase starting at `start_week`.
    pub fn empty(phase: PhaseKind, start_week: u32) -> Self {
        Self {
            phase,
            start_week,
            weeks: 0,
            days_per_week: 0,
            income_days_per_week: 0,
            min_days_per_week: 0,
            income: 0,
            income_without_supplement: 0,
            supplement: 0,
            used_income_days: 0,
            used_min_days: 0,
        }
    }

    /// Returns true if the segment covers no weeks.
    pub fn is_empty(&self) -> bool {
        self.weeks == 0
    }

    /// Returns the first week after the segment.
    pub fn end_week(&self) -> u32 {
        self.start_week + self.weeks
    }

    /// Returns true if `week` falls inside the half-open range of the segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use parental_leave_planner::models::{Plan, PhaseKind};
    ///
    /// let mut plan = Plan::empty(PhaseKind::NoSupplement, 26);
    /// plan.weeks = 4;
    /// assert!(plan.contains_week(26));
    /// assert!(plan.contains_week(29));
    /// assert!(!plan.contains_week(30));
    /// ```
    pub fn contains_week(&self, week: u32) -> bool {
        week >= self.start_week && week < self.end_week()
    }

    /// Returns a copy of the segment moved to start at `start_week`.
    pub fn shifted_to(&self, start_week: u32) -> Self {
        Self {
            start_week,
            ..*self
        }
    }

    /// Returns the day mix of the segment.
    pub fn day_choice(&self) -> DayChoice {
        DayChoice {
            days_per_week: self.days_per_week,
            income_days_per_week: self.income_days_per_week,
            min_days_per_week: self.min_days_per_week,
        }
    }
}

/// The initial period where both parents are on leave at the same time.
///
/// Parent 1 keeps drawing days per their first phase; the partner draws
/// the overlap days from their own pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapPlan {
    /// First week of the overlap; always the start of leave.
    pub start_week: u32,
    /// Number of weeks the overlap spans.
    pub weeks: u32,
    /// Parent 1's benefit days per week during the overlap.
    pub days_per_week: u32,
    /// Parent 1's monthly income during the overlap, SEK.
    pub income: i64,
    /// The partner's benefit days per week during the overlap.
    pub partner_days_per_week: u32,
    /// The partner's monthly income during the overlap, SEK.
    pub partner_income: i64,
    /// Income-level days the partner spent on the overlap.
    pub partner_income_days: u32,
    /// Minimum-level days the partner spent on the overlap.
    pub partner_min_days: u32,
}

impl OverlapPlan {
    /// An overlap that covers no weeks.
    pub fn none() -> Self {
        Self {
            start_week: 0,
            weeks: 0,
            days_per_week: 0,
            income: 0,
            partner_days_per_week: 0,
            partner_income: 0,
            partner_income_days: 0,
            partner_min_days: 0,
        }
    }

    /// Returns true if `week` is part of the overlap.
    pub fn contains_week(&self, week: u32) -> bool {
        week >= self.start_week && week < self.start_week + self.weeks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_plan_has_no_weeks() {
        let plan = Plan::empty(PhaseKind::WithSupplement, 0);
        assert!(plan.is_empty());
        assert_eq!(plan.end_week(), 0);
        assert!(!plan.contains_week(0));
    }

    #[test]
    fn test_shifted_plan_keeps_length_and_days() {
        let mut plan = Plan::empty(PhaseKind::MinimumRate, 10);
        plan.weeks = 3;
        plan.days_per_week = 5;
        plan.min_days_per_week = 5;

        let shifted = plan.shifted_to(14);
        assert_eq!(shifted.start_week, 14);
        assert_eq!(shifted.end_week(), 17);
        assert_eq!(shifted.day_choice(), plan.day_choice());
    }

    #[test]
    fn test_split_clamps_minimum_days() {
        let choice = DayChoice::split(3, 5);
        assert_eq!(choice.min_days_per_week, 3);
        assert_eq!(choice.income_days_per_week, 0);
    }

    #[test]
    fn test_overlap_contains_first_weeks_only() {
        let overlap = OverlapPlan {
            weeks: 2,
            ..OverlapPlan::none()
        };
        assert!(overlap.contains_week(0));
        assert!(overlap.contains_week(1));
        assert!(!overlap.contains_week(2));
        assert!(!OverlapPlan::none().contains_week(0));
    }

    #[test]
    fn test_phase_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&PhaseKind::NoSupplement).unwrap(),
            "\"no_supplement\""
        );
        assert_eq!(PhaseKind::ALL[2], PhaseKind::MinimumRate);
    }
}
