//! Membership error types

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised when constructing or closing a billing cycle.
///
/// These are programming errors at the call site: period queries on a
/// validated cycle never fail, they signal inactive cycles with `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CycleError {
    #[error("bill day {0} is outside 1-31")]
    BillDayOutOfRange(u32),

    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

pub type CycleResult<T> = Result<T, CycleError>;
