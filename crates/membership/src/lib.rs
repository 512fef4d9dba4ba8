// Test code patterns (expected in test files):
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Deskhub Membership Module
//!
//! The billing-period calculator behind membership billing.
//!
//! ## Features
//!
//! - **Billing Cycles**: Validated start/end/bill-day values
//! - **Period Calculation**: Monthly windows with correct 28/29/30/31-day
//!   handling and rolling bill-day re-anchoring after short months
//! - **Period Walking**: Gap-free, overlap-free `next_period_start`
//! - **Activity Checks**: `is_active` / `in_future` against any date
//!
//! Everything here is a pure function of its inputs: no clock, no I/O, no
//! shared state. Callers pass "today" explicitly.

pub mod cycle;
pub mod error;
pub mod periods;


// Cycle
pub use cycle::BillingCycle;

// Error
pub use error::{CycleError, CycleResult};

// Periods
pub use periods::Period;
