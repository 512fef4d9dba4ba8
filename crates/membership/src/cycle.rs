//! Billing cycle model
//!
//! A [`BillingCycle`] is the value the period calculator operates on: an
//! active date range plus the nominal day-of-month billing rolls on. It is
//! validated once at construction; the period queries in
//! [`crate::periods`] never re-validate.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{CycleError, CycleResult};

/// A membership's active date range and its nominal monthly bill day.
///
/// Both `start_date` and `end_date` are inclusive. A missing `end_date`
/// means the cycle is ongoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BillingCycle {
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    bill_day: u32,
}

impl BillingCycle {
    /// Create a cycle whose bill day is the day-of-month of `start_date`.
    pub fn new(start_date: NaiveDate, end_date: Option<NaiveDate>) -> CycleResult<Self> {
        Self::with_bill_day(start_date, end_date, start_date.day())
    }

    /// Create a cycle with an explicit bill day (1-31).
    pub fn with_bill_day(
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        bill_day: u32,
    ) -> CycleResult<Self> {
        if !(1..=31).contains(&bill_day) {
            return Err(CycleError::BillDayOutOfRange(bill_day));
        }
        if let Some(end) = end_date {
            if end < start_date {
                return Err(CycleError::EndBeforeStart {
                    start: start_date,
                    end,
                });
            }
        }
        Ok(Self {
            start_date,
            end_date,
            bill_day,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// The day-of-month periods nominally roll on. Clamped to the last
    /// valid day in months too short to contain it.
    pub fn bill_day(&self) -> u32 {
        self.bill_day
    }

    /// Close an ongoing cycle. The last day of service is `end_date`.
    pub fn close(&mut self, end_date: NaiveDate) -> CycleResult<()> {
        if end_date < self.start_date {
            return Err(CycleError::EndBeforeStart {
                start: self.start_date,
                end: end_date,
            });
        }
        self.end_date = Some(end_date);
        Ok(())
    }

    /// True iff `as_of` falls within the cycle's inclusive active range.
    pub fn is_active(&self, as_of: NaiveDate) -> bool {
        if as_of < self.start_date {
            return false;
        }
        match self.end_date {
            Some(end) => as_of <= end,
            None => true,
        }
    }

    /// True iff the cycle has not started yet as of `as_of`.
    pub fn in_future(&self, as_of: NaiveDate) -> bool {
        self.start_date > as_of
    }
}
