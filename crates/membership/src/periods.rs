//! Billing period calculation
//!
//! Periods are monthly windows anchored to a cycle's bill day. A period
//! boundary falls on the bill day of every month long enough to contain
//! it, and on the 1st of every month that follows a month too short for
//! it. That second rule is what makes the bill day "roll": a cycle
//! billing on the 31st runs 1/31-2/28, then 3/1-3/30, then re-acquires
//! the 31st with 3/31-4/30 instead of drifting to the 28th forever.
//!
//! Day-of-month arithmetic is done with an explicit month-length table
//! and min-clamping rather than date-library month increments, whose
//! overflow behavior at month ends is exactly the thing being modeled.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::cycle::BillingCycle;

/// One monthly billing window, both ends inclusive.
///
/// Derived on demand from a [`BillingCycle`] and a target date; never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    /// Inclusive day count, e.g. 31 for [2015-07-01, 2015-07-31].
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    // Callers clamp `day` to the month length, so this cannot fail.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

impl BillingCycle {
    /// The period boundaries inside one calendar month: the bill day when
    /// the month is long enough, and the 1st when the previous month was
    /// not (the rolling re-anchor).
    fn month_boundaries(&self, year: i32, month: u32) -> [Option<NaiveDate>; 2] {
        let (prev_year, prev_month) = previous_month(year, month);
        let rollover = (days_in_month(prev_year, prev_month) < self.bill_day())
            .then(|| ymd(year, month, 1));
        let nominal = (days_in_month(year, month) >= self.bill_day())
            .then(|| ymd(year, month, self.bill_day()));
        [rollover, nominal]
    }

    /// Most recent period boundary on or before `date`.
    fn boundary_on_or_before(&self, date: NaiveDate) -> NaiveDate {
        let (mut year, mut month) = (date.year(), date.month());
        for _ in 0..3 {
            let found = self
                .month_boundaries(year, month)
                .into_iter()
                .flatten()
                .filter(|b| *b <= date)
                .max();
            if let Some(boundary) = found {
                return boundary;
            }
            (year, month) = previous_month(year, month);
        }
        // A month with no boundary is always adjacent to months that have
        // one, so the scan above cannot fall through.
        ymd(year, month, 1)
    }

    /// Earliest period boundary strictly after `date`.
    fn boundary_after(&self, date: NaiveDate) -> NaiveDate {
        let (mut year, mut month) = (date.year(), date.month());
        for _ in 0..3 {
            let found = self
                .month_boundaries(year, month)
                .into_iter()
                .flatten()
                .filter(|b| *b > date)
                .min();
            if let Some(boundary) = found {
                return boundary;
            }
            (year, month) = next_month(year, month);
        }
        ymd(year, month, 1)
    }

    /// The billing period containing `target_date`, or `None` when the
    /// cycle is inactive at that date.
    ///
    /// The first period of a cycle that starts off-boundary is truncated
    /// to begin at `start_date` while still ending at the normal
    /// boundary. Period ends are never truncated by `end_date`; proration
    /// is where the active range is applied.
    pub fn period_for(&self, target_date: NaiveDate) -> Option<Period> {
        if !self.is_active(target_date) {
            return None;
        }
        let anchor = self.boundary_on_or_before(target_date);
        let start = anchor.max(self.start_date());
        let end = self.boundary_after(target_date) - Duration::days(1);
        Some(Period { start, end })
    }

    /// True iff `target_date` is the last day of the period containing it.
    pub fn is_period_boundary(&self, target_date: NaiveDate) -> bool {
        self.period_for(target_date)
            .is_some_and(|period| period.end == target_date)
    }

    /// Start date of the period immediately following the one containing
    /// `from_date`.
    ///
    /// A cycle that has not started yet activates from its own start
    /// date. Returns `None` when the cycle has no period reachable from
    /// `from_date`: it ended before `from_date`, or the next period would
    /// begin after `end_date`.
    pub fn next_period_start(&self, from_date: NaiveDate) -> Option<NaiveDate> {
        if self.in_future(from_date) {
            return Some(self.start_date());
        }
        let period = self.period_for(from_date)?;
        let next = period.end + Duration::days(1);
        if self.end_date().is_some_and(|end| next > end) {
            return None;
        }
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_days_in_month_table() {
        assert_eq!(days_in_month(2015, 1), 31);
        assert_eq!(days_in_month(2015, 2), 28);
        assert_eq!(days_in_month(2016, 2), 29);
        assert_eq!(days_in_month(2015, 4), 30);
        assert_eq!(days_in_month(2015, 12), 31);
    }

    #[test]
    fn test_leap_year_rules() {
        assert!(is_leap_year(2016));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2017));
    }

    #[test]
    fn test_period_num_days_inclusive() {
        let period = Period {
            start: d(2015, 7, 1),
            end: d(2015, 7, 31),
        };
        assert_eq!(period.num_days(), 31);
        assert!(period.contains(d(2015, 7, 1)));
        assert!(period.contains(d(2015, 7, 31)));
        assert!(!period.contains(d(2015, 8, 1)));
    }

    #[test]
    fn test_inactive_before_start() {
        let cycle = BillingCycle::new(d(2016, 6, 1), None).unwrap();
        assert_eq!(cycle.period_for(d(2016, 5, 31)), None);
    }

    #[test]
    fn test_inactive_after_end() {
        let cycle = BillingCycle::new(d(2016, 1, 1), Some(d(2016, 3, 31))).unwrap();
        assert_eq!(cycle.period_for(d(2016, 4, 1)), None);
    }

    #[test]
    fn test_period_for_is_idempotent() {
        let cycle = BillingCycle::new(d(2017, 1, 31), None).unwrap();
        let first = cycle.period_for(d(2017, 3, 2));
        let second = cycle.period_for(d(2017, 3, 2));
        assert_eq!(first, second);
    }

    #[test]
    fn test_truncated_first_period() {
        // Bill day 1, but service starts mid-month: the first period runs
        // from the start date to the normal month-end boundary.
        let cycle = BillingCycle::with_bill_day(d(2016, 1, 15), None, 1).unwrap();
        let period = cycle.period_for(d(2016, 1, 20)).unwrap();
        assert_eq!(period.start, d(2016, 1, 15));
        assert_eq!(period.end, d(2016, 1, 31));

        // The second period is a full one.
        let period = cycle.period_for(d(2016, 2, 1)).unwrap();
        assert_eq!(period.start, d(2016, 2, 1));
        assert_eq!(period.end, d(2016, 2, 29));
    }

    #[test]
    fn test_period_end_not_truncated_by_cycle_end() {
        // The cycle ends mid-period; the period itself still runs to its
        // boundary. Proration handles the partial coverage.
        let cycle = BillingCycle::new(d(2016, 2, 1), Some(d(2016, 10, 18))).unwrap();
        let period = cycle.period_for(d(2016, 10, 18)).unwrap();
        assert_eq!(period.start, d(2016, 10, 1));
        assert_eq!(period.end, d(2016, 10, 31));
    }

    #[test]
    fn test_next_period_start_for_future_cycle() {
        let cycle = BillingCycle::new(d(2017, 3, 1), Some(d(2017, 3, 31))).unwrap();
        assert_eq!(cycle.next_period_start(d(2016, 8, 24)), Some(d(2017, 3, 1)));
    }

    #[test]
    fn test_next_period_start_none_after_cycle_end() {
        let cycle = BillingCycle::new(d(2016, 1, 1), Some(d(2016, 3, 31))).unwrap();
        // From within the final period there is no next period.
        assert_eq!(cycle.next_period_start(d(2016, 3, 15)), None);
        // From past the end of the cycle there is no period at all.
        assert_eq!(cycle.next_period_start(d(2016, 4, 15)), None);
    }

    #[test]
    fn test_next_period_start_lands_on_end_date() {
        // Cycle ends exactly where the next period would begin: that
        // final one-day period is still reachable.
        let cycle = BillingCycle::new(d(2016, 1, 1), Some(d(2016, 2, 1))).unwrap();
        assert_eq!(cycle.next_period_start(d(2016, 1, 15)), Some(d(2016, 2, 1)));
        assert_eq!(cycle.next_period_start(d(2016, 2, 1)), None);
    }
}
