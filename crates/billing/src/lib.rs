// Test code patterns (expected in test files):
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Deskhub Billing Module
//!
//! Pure billing arithmetic on top of the membership period calculator.
//!
//! ## Features
//!
//! - **Proration**: Scale a monthly rate by the fraction of a period a
//!   subscription's active range actually covers
//! - **Bill Generation**: Prorated line items and totals for the period
//!   containing a target date
//!
//! Like the calculator underneath, everything here is a deterministic
//! function of its inputs. Persistence and invoicing live elsewhere.

pub mod bill;
pub mod proration;

// Bill
pub use bill::{Bill, LineItem, Membership, ResourceSubscription};

// Proration
pub use proration::{coverage_factor, prorate_for_period};
