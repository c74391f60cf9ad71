//! Billing Schedule
//!
//! Period arithmetic from the scheme start date and cycle, and the single
//! derivation rule that reconciles the card-level payment status with the
//! period-by-period payment records. The card-level status is a projection
//! of the record set; it is never written independently.

use crate::types::card::PaymentStatus;
use crate::types::scheme::Scheme;
use chrono::{DateTime, Datelike, Utc};
use std::collections::BTreeSet;

/// The period index that is currently due for a scheme, clamped to
/// `1..=duration_periods`.
///
/// A period covers `cycle.months()` calendar months starting at the scheme
/// start date; a month only counts as elapsed once its day-of-month has been
/// reached.
pub fn expected_period(scheme: &Scheme, now: DateTime<Utc>) -> u32 {
    if now <= scheme.start_date {
        return 1;
    }

    let mut elapsed_months = (now.year() - scheme.start_date.year()) * 12
        + (now.month() as i32 - scheme.start_date.month() as i32);
    if now.day() < scheme.start_date.day() {
        elapsed_months -= 1;
    }
    let elapsed_months = elapsed_months.max(0) as u32;

    let period = elapsed_months / scheme.cycle.months() + 1;
    period.min(scheme.duration_periods)
}

/// Derive the card-level payment status from the completed-period set.
///
/// - `paid`: fully paid, or every period up to `due` completed
/// - `failed`: the most recent attempt failed and its period is still open
/// - `pending`: nothing paid yet and only the current period is outstanding
/// - `partial`: earlier periods paid, only the current one outstanding
/// - `overdue`: any period before the current one is missing
pub fn derive_payment_status(
    duration_periods: u32,
    due_period: u32,
    completed: &BTreeSet<u32>,
    last_attempt_failed: bool,
) -> PaymentStatus {
    if completed.len() as u32 >= duration_periods {
        return PaymentStatus::Paid;
    }

    let missing: Vec<u32> = (1..=due_period)
        .filter(|p| !completed.contains(p))
        .collect();

    if missing.is_empty() {
        return PaymentStatus::Paid;
    }
    if last_attempt_failed {
        return PaymentStatus::Failed;
    }
    if missing.len() == 1 && missing[0] == due_period {
        if completed.is_empty() {
            PaymentStatus::Pending
        } else {
            PaymentStatus::Partial
        }
    } else {
        PaymentStatus::Overdue
    }
}
