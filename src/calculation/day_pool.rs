//! Benefit day ledger.
//!
//! The [`DayPool`] tracks each parent's remaining income-level and
//! minimum-level days during one allocation run. Days only move between the
//! parents through [`DayPool::transfer`] and only leave the pool through
//! [`DayPool::consume`] and [`DayPool::draw_spilling`]. Counters never go
//! below zero, and a transfer never takes the donor below the reserved
//! quota.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::DayConfig;
use crate::models::{CustodyType, Parent};

/// Which kind of benefit day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    /// Paid at the income-related daily rate.
    Income,
    /// Paid at the minimum rate.
    Minimum,
}

/// One parent's remaining days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayBalance {
    /// Remaining income-level days.
    pub income_days: u32,
    /// Remaining minimum-level days.
    pub min_days: u32,
}

impl DayBalance {
    fn get(&self, kind: DayKind) -> u32 {
        match kind {
            DayKind::Income => self.income_days,
            DayKind::Minimum => self.min_days,
        }
    }

    fn get_mut(&mut self, kind: DayKind) -> &mut u32 {
        match kind {
            DayKind::Income => &mut self.income_days,
            DayKind::Minimum => &mut self.min_days,
        }
    }
}

/// The per-parent day ledger for one allocation run.
///
/// # Example
///
/// ```
/// use parental_leave_planner::calculation::DayPool;
/// use parental_leave_planner::config::DayConfig;
/// use parental_leave_planner::models::{CustodyType, Parent};
///
/// let mut pool = DayPool::for_custody(CustodyType::Joint, &DayConfig::default());
/// // 195 - 90 reserved - 10 overlap reserve = 95 transferable
/// let moved = pool.transfer(Parent::Second, Parent::First, 120, 0);
/// assert_eq!(moved, 95);
/// assert_eq!(pool.income_days(Parent::First), 290);
/// assert_eq!(pool.income_days(Parent::Second), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPool {
    first: DayBalance,
    second: DayBalance,
    reserved_days: u32,
    overlap_reserve_days: u32,
}

impl DayPool {
    /// Creates a pool with explicit balances and transfer limits.
    pub fn new(
        first: DayBalance,
        second: DayBalance,
        reserved_days: u32,
        overlap_reserve_days: u32,
    ) -> Self {
        Self {
            first,
            second,
            reserved_days,
            overlap_reserve_days,
        }
    }

    /// Creates the starting pool for a custody arrangement.
    pub fn for_custody(custody: CustodyType, config: &DayConfig) -> Self {
        let (first, second) = config.allotments(custody);
        Self::new(
            DayBalance {
                income_days: first.income_days,
                min_days: first.min_days,
            },
            DayBalance {
                income_days: second.income_days,
                min_days: second.min_days,
            },
            config.reserved_days,
            config.overlap_reserve_days,
        )
    }

    fn balance_mut(&mut self, parent: Parent) -> &mut DayBalance {
        match parent {
            Parent::First => &mut self.first,
            Parent::Second => &mut self.second,
        }
    }

    /// Returns a parent's remaining days.
    pub fn balance(&self, parent: Parent) -> DayBalance {
        match parent {
            Parent::First => self.first,
            Parent::Second => self.second,
        }
    }

    /// Returns a parent's remaining income-level days.
    pub fn income_days(&self, parent: Parent) -> u32 {
        self.balance(parent).income_days
    }

    /// Returns a parent's remaining minimum-level days.
    pub fn min_days(&self, parent: Parent) -> u32 {
        self.balance(parent).min_days
    }

    /// Returns both parents' income-level days together.
    pub fn total_income_days(&self) -> u32 {
        self.first.income_days + self.second.income_days
    }

    /// Returns the reserved quota that can never be transferred.
    pub fn reserved_days(&self) -> u32 {
        self.reserved_days
    }

    /// Returns how many income-level days `from` could give away while
    /// keeping the reserved quota, its own need and the overlap reserve.
    pub fn transferable(&self, from: Parent, donor_own_need: u32) -> u32 {
        self.income_days(from)
            .saturating_sub(self.reserved_days)
            .saturating_sub(donor_own_need)
            .saturating_sub(self.overlap_reserve_days)
    }

    /// Moves income-level days from one parent to the other.
    ///
    /// The amount moved is `min(requested, transferable)`. A zero transfer
    /// is a valid outcome.
    ///
    /// # Arguments
    ///
    /// * `from` - The donating parent
    /// * `to` - The receiving parent
    /// * `requested` - Days the receiver is short
    /// * `donor_own_need` - Days the donor still needs for their own leave
    ///
    /// # Returns
    ///
    /// The number of days actually moved.
    pub fn transfer(&mut self, from: Parent, to: Parent, requested: u32, donor_own_need: u32) -> u32 {
        if from == to {
            return 0;
        }

        let actual = requested.min(self.transferable(from, donor_own_need));
        self.balance_mut(from).income_days -= actual;
        self.balance_mut(to).income_days += actual;
        actual
    }

    /// Consumes `days_per_week * weeks` days of one kind.
    ///
    /// Callers size the request to what is available; an oversized request
    /// is clamped to the balance and logged.
    ///
    /// # Returns
    ///
    /// The number of days actually consumed.
    pub fn consume(&mut self, parent: Parent, kind: DayKind, days_per_week: u32, weeks: u32) -> u32 {
        let requested = days_per_week.saturating_mul(weeks);
        let counter = self.balance_mut(parent).get_mut(kind);
        let actual = requested.min(*counter);
        if actual < requested {
            warn!(
                parent = %parent,
                kind = ?kind,
                requested,
                available = *counter,
                "Day consumption clamped to balance"
            );
        }
        *counter -= actual;
        actual
    }

    /// Draws `days` from a parent, taking income-level days first and
    /// spilling into minimum-level days.
    ///
    /// # Returns
    ///
    /// `(income_days, min_days)` actually drawn.
    pub fn draw_spilling(&mut self, parent: Parent, days: u32) -> (u32, u32) {
        let income = self.consume(parent, DayKind::Income, 1, days.min(self.income_days(parent)));
        let rest = days - income;
        let min = self.consume(parent, DayKind::Minimum, 1, rest.min(self.min_days(parent)));
        if income + min < days {
            warn!(
                parent = %parent,
                requested = days,
                drawn = income + min,
                "Not enough days left to draw"
            );
        }
        (income, min)
    }

    /// Returns how many days of `kind` a parent has.
    pub fn available(&self, parent: Parent, kind: DayKind) -> u32 {
        self.balance(parent).get(kind)
    }
}
