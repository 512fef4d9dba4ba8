//! Bill generation
//!
//! A [`Membership`] groups a billing cycle with the resource subscriptions
//! billed on it (desks, keys, mail service). Generating a bill for a
//! target date produces one prorated line item per subscription that
//! overlaps the period containing that date.
//!
//! Bills are plain values returned to the caller; storing or invoicing
//! them is someone else's job.

use chrono::NaiveDate;
use deskhub_membership::{BillingCycle, Period};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::proration::coverage_factor;

/// A recurring monthly charge for one resource within a membership.
///
/// A subscription has its own active range: resources can be added or
/// dropped mid-cycle, in which case their line items are prorated
/// independently of the cycle itself.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceSubscription {
    /// What the member is paying for, e.g. "Desk" or "Key".
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub monthly_rate: Decimal,
}

impl ResourceSubscription {
    pub fn is_active(&self, as_of: NaiveDate) -> bool {
        if as_of < self.start_date {
            return false;
        }
        match self.end_date {
            Some(end) => as_of <= end,
            None => true,
        }
    }

    /// Fraction of `period` this subscription's active range covers.
    pub fn coverage_for(&self, period: &Period) -> Decimal {
        coverage_factor(self.start_date, self.end_date, period)
    }

    /// This subscription's charge for `period`: the monthly rate scaled
    /// by coverage.
    pub fn prorated_amount(&self, period: &Period) -> Decimal {
        self.monthly_rate * self.coverage_for(period)
    }
}

/// One charge on a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub description: String,
    pub amount: Decimal,
}

/// A bill for one billing period.
#[derive(Debug, Clone, Serialize)]
pub struct Bill {
    pub period: Period,
    pub line_items: Vec<LineItem>,
}

impl Bill {
    pub fn total(&self) -> Decimal {
        self.line_items.iter().map(|item| item.amount).sum()
    }
}

/// A membership: one billing cycle plus the resource subscriptions billed
/// on it.
#[derive(Debug, Clone, Serialize)]
pub struct Membership {
    pub cycle: BillingCycle,
    pub subscriptions: Vec<ResourceSubscription>,
}

impl Membership {
    pub fn new(cycle: BillingCycle) -> Self {
        Self {
            cycle,
            subscriptions: Vec::new(),
        }
    }

    pub fn with_subscriptions(cycle: BillingCycle, subscriptions: Vec<ResourceSubscription>) -> Self {
        Self {
            cycle,
            subscriptions,
        }
    }

    /// Sum of the monthly rates of subscriptions active on `as_of`.
    pub fn monthly_rate(&self, as_of: NaiveDate) -> Decimal {
        self.subscriptions
            .iter()
            .filter(|sub| sub.is_active(as_of))
            .map(|sub| sub.monthly_rate)
            .sum()
    }

    /// Build the bill for the period containing `target_date`, or `None`
    /// when the cycle is inactive at that date.
    ///
    /// Subscriptions that do not overlap the period contribute no line
    /// item; partial overlaps are prorated by inclusive day counts.
    pub fn generate_bill(&self, target_date: NaiveDate) -> Option<Bill> {
        let period = self.cycle.period_for(target_date)?;

        let line_items: Vec<LineItem> = self
            .subscriptions
            .iter()
            .filter(|sub| sub.coverage_for(&period) > Decimal::ZERO)
            .map(|sub| LineItem {
                description: sub.description.clone(),
                amount: sub.prorated_amount(&period),
            })
            .collect();

        let bill = Bill { period, line_items };

        tracing::debug!(
            period_start = %period.start,
            period_end = %period.end,
            line_items = bill.line_items.len(),
            total = %bill.total(),
            "Generated bill"
        );

        Some(bill)
    }
}
