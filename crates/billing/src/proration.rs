//! Prorated billing arithmetic
//!
//! Scales a monthly rate by the fraction of a billing period actually
//! covered by an active date range, so partial periods at subscription
//! start and end are billed fairly.
//!
//! All arithmetic is exact decimal arithmetic; a range covering every day
//! of a period yields a factor of exactly `1` and a disjoint range yields
//! exactly `0`.

use chrono::NaiveDate;
use deskhub_membership::{BillingCycle, Period};
use rust_decimal::Decimal;

/// Fraction of `period` covered by the inclusive range
/// `[active_start, active_end]`, open-ended when `active_end` is `None`.
///
/// Both day counts are inclusive: a cycle ending on the last day of the
/// period covers the whole period.
pub fn coverage_factor(
    active_start: NaiveDate,
    active_end: Option<NaiveDate>,
    period: &Period,
) -> Decimal {
    let overlap_start = active_start.max(period.start);
    let overlap_end = match active_end {
        Some(end) => end.min(period.end),
        None => period.end,
    };
    if overlap_start > overlap_end {
        return Decimal::ZERO;
    }
    let covered = (overlap_end - overlap_start).num_days() + 1;
    Decimal::from(covered) / Decimal::from(period.num_days())
}

/// `full_rate` scaled by the fraction of `period` covered by the cycle's
/// active range. Returns `full_rate` unchanged for full coverage and zero
/// for none.
pub fn prorate_for_period(cycle: &BillingCycle, period: &Period, full_rate: Decimal) -> Decimal {
    full_rate * coverage_factor(cycle.start_date(), cycle.end_date(), period)
}
