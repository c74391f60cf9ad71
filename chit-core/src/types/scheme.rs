//! Scheme Catalog Types
//!
//! A scheme is a subscription product: amount per period, billing cycle,
//! number of periods, and prize structure. Scheme status is monotonic:
//! draft -> active -> (paused <-> active) -> completed | cancelled, with no
//! way back out of a terminal status.

use super::common::{Money, SchemeId};
use crate::error::{ChitError, ChitResult};
use crate::types::commission::CommissionRates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Billing cycle of a scheme
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionCycle {
    Monthly,
    Quarterly,
    Yearly,
}

impl SubscriptionCycle {
    /// Calendar months per billing period
    pub fn months(&self) -> u32 {
        match self {
            SubscriptionCycle::Monthly => 1,
            SubscriptionCycle::Quarterly => 3,
            SubscriptionCycle::Yearly => 12,
        }
    }
}

/// Scheme lifecycle status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeStatus {
    Draft,
    Active,
    Paused,
    Completed,
    Cancelled,
}

impl SchemeStatus {
    /// Check if a status transition is allowed by the monotonic table
    pub fn is_valid_transition(&self, new_status: &SchemeStatus) -> bool {
        match (self, new_status) {
            (SchemeStatus::Draft, SchemeStatus::Active) => true,
            (SchemeStatus::Draft, SchemeStatus::Cancelled) => true,
            (SchemeStatus::Active, SchemeStatus::Paused) => true,
            (SchemeStatus::Active, SchemeStatus::Completed) => true,
            (SchemeStatus::Active, SchemeStatus::Cancelled) => true,
            (SchemeStatus::Paused, SchemeStatus::Active) => true,
            (SchemeStatus::Paused, SchemeStatus::Cancelled) => true,
            _ => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SchemeStatus::Completed | SchemeStatus::Cancelled)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SchemeStatus::Draft => "draft",
            SchemeStatus::Active => "active",
            SchemeStatus::Paused => "paused",
            SchemeStatus::Completed => "completed",
            SchemeStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for SchemeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Subscription product definition
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scheme {
    pub scheme_id: SchemeId,
    pub name: String,
    /// Amount due per period, in minor units
    pub subscription_amount: Money,
    pub cycle: SubscriptionCycle,
    /// Number of billing periods in the scheme
    pub duration_periods: u32,
    pub number_of_winners: u32,
    pub status: SchemeStatus,
    pub start_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    /// Per-scheme commission override; engine defaults apply when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission_rates: Option<CommissionRates>,
    pub created_at: DateTime<Utc>,
}

impl Scheme {
    /// Create a new scheme in draft status.
    ///
    /// Invariants checked here: `number_of_winners >= 1`,
    /// `duration_periods >= 1`, positive subscription amount.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        scheme_id: SchemeId,
        name: impl Into<String>,
        subscription_amount: Money,
        cycle: SubscriptionCycle,
        duration_periods: u32,
        number_of_winners: u32,
        start_date: DateTime<Utc>,
    ) -> ChitResult<Self> {
        if !subscription_amount.is_positive() {
            return Err(ChitError::InvalidAmount {
                reason: "subscription amount must be positive".to_string(),
            });
        }
        if duration_periods == 0 {
            return Err(ChitError::invalid_state("scheme duration must be at least 1 period"));
        }
        if number_of_winners == 0 {
            return Err(ChitError::invalid_state("scheme must have at least 1 winner"));
        }

        Ok(Self {
            scheme_id,
            name: name.into(),
            subscription_amount,
            cycle,
            duration_periods,
            number_of_winners,
            status: SchemeStatus::Draft,
            start_date,
            end_date: None,
            commission_rates: None,
            created_at: Utc::now(),
        })
    }

    /// Attach a per-scheme commission override
    pub fn with_commission_rates(mut self, rates: CommissionRates) -> Self {
        self.commission_rates = Some(rates);
        self
    }

    /// Apply a status transition, enforcing the monotonic table
    pub fn transition(&mut self, new_status: SchemeStatus) -> ChitResult<()> {
        if !self.status.is_valid_transition(&new_status) {
            return Err(ChitError::InvalidSchemeTransition {
                from: self.status.to_string(),
                to: new_status.to_string(),
            });
        }
        if new_status.is_terminal() {
            self.end_date = Some(Utc::now());
        }
        self.status = new_status;
        Ok(())
    }

    /// Cards may only be issued against an active scheme
    pub fn is_open_for_enrollment(&self) -> bool {
        self.status == SchemeStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_scheme() -> Scheme {
        Scheme::new(
            SchemeId::new("scheme_1"),
            "Gold Monthly",
            Money::from_minor(100_000),
            SubscriptionCycle::Monthly,
            12,
            3,
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_scheme_starts_draft() {
        let scheme = test_scheme();
        assert_eq!(scheme.status, SchemeStatus::Draft);
        assert!(!scheme.is_open_for_enrollment());
    }

    #[test]
    fn test_rejects_zero_winners() {
        let result = Scheme::new(
            SchemeId::new("scheme_1"),
            "Bad",
            Money::from_minor(100_000),
            SubscriptionCycle::Monthly,
            12,
            0,
            Utc::now(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut scheme = test_scheme();
        scheme.transition(SchemeStatus::Active).unwrap();
        assert!(scheme.is_open_for_enrollment());
        scheme.transition(SchemeStatus::Paused).unwrap();
        scheme.transition(SchemeStatus::Active).unwrap();
        scheme.transition(SchemeStatus::Completed).unwrap();
        assert!(scheme.end_date.is_some());
    }

    #[test]
    fn test_terminal_is_terminal() {
        let mut scheme = test_scheme();
        scheme.transition(SchemeStatus::Active).unwrap();
        scheme.transition(SchemeStatus::Cancelled).unwrap();
        let err = scheme.transition(SchemeStatus::Active).unwrap_err();
        assert_eq!(err.kind(), "invalid_scheme_transition");
    }

    #[test]
    fn test_draft_cannot_pause() {
        let mut scheme = test_scheme();
        assert!(scheme.transition(SchemeStatus::Paused).is_err());
    }

    #[test]
    fn test_cycle_months() {
        assert_eq!(SubscriptionCycle::Monthly.months(), 1);
        assert_eq!(SubscriptionCycle::Quarterly.months(), 3);
        assert_eq!(SubscriptionCycle::Yearly.months(), 12);
    }
}
