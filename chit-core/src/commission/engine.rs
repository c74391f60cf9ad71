//! Commission calculation logic.

use super::CommissionAward;
use crate::types::card::Card;
use crate::types::commission::{CommissionLevel, CommissionRates};
use crate::types::payment::PaymentRecord;
use crate::types::scheme::Scheme;

/// Commission engine
///
/// Holds the system-level rates; a scheme may carry its own override which
/// takes precedence.
pub struct CommissionEngine {
    rates: CommissionRates,
}

impl CommissionEngine {
    /// Create engine with the platform rates
    pub fn new(rates: CommissionRates) -> Self {
        Self { rates }
    }

    /// Create engine with custom rates
    pub fn with_rates(mut self, rates: CommissionRates) -> Self {
        self.rates = rates;
        self
    }

    /// Effective rates for a scheme (scheme override beats platform rates)
    pub fn rates_for(&self, scheme: &Scheme) -> CommissionRates {
        scheme.commission_rates.unwrap_or(self.rates)
    }

    /// Assess the awards owed for one completed payment.
    ///
    /// Reads the paying card's frozen L1/L2 user ids; the chain is never
    /// re-resolved, so payouts always go to whoever referred the card at
    /// signup time. Rates apply to the scheme's subscription amount, not to
    /// the record amount (they are equal for a completed payment, but the
    /// subscription amount is the authoritative base).
    pub fn assess(&self, card: &Card, payment: &PaymentRecord, scheme: &Scheme) -> Vec<CommissionAward> {
        if !payment.is_completed() {
            return Vec::new();
        }

        let rates = self.rates_for(scheme);
        let mut awards = Vec::with_capacity(2);

        if let Some(l1) = &card.referrer_l1 {
            awards.push(CommissionAward {
                beneficiary: l1.clone(),
                level: CommissionLevel::Direct,
                amount: rates.direct_bps.apply_to(scheme.subscription_amount),
            });
        }
        if let Some(l2) = &card.referrer_l2 {
            awards.push(CommissionAward {
                beneficiary: l2.clone(),
                level: CommissionLevel::Indirect,
                amount: rates.indirect_bps.apply_to(scheme.subscription_amount),
            });
        }

        awards
    }
}

impl Default for CommissionEngine {
    fn default() -> Self {
        Self::new(CommissionRates::default())
    }
}
