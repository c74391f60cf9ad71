//! Commission entry queries

use crate::store::Tables;
use chit_core::types::{CommissionEntry, CommissionLevel, Money, PaymentId, UserId};

impl Tables {
    pub fn insert_commission(&mut self, entry: CommissionEntry) {
        self.commissions.insert(entry.entry_id.clone(), entry);
    }

    /// The entry for one (payment, level), if any. This is the pay-once
    /// guard.
    pub fn commission_for_payment_level(
        &self,
        payment_id: &PaymentId,
        level: CommissionLevel,
    ) -> Option<&CommissionEntry> {
        self.commissions
            .values()
            .find(|e| &e.source_payment == payment_id && e.level == level)
    }

    /// All entries sourced from one payment
    pub fn commissions_for_payment(&self, payment_id: &PaymentId) -> Vec<&CommissionEntry> {
        self.commissions
            .values()
            .filter(|e| &e.source_payment == payment_id)
            .collect()
    }

    /// A beneficiary's entries, most recent first
    pub fn commissions_for_beneficiary(&self, user_id: &UserId) -> Vec<&CommissionEntry> {
        let mut entries: Vec<&CommissionEntry> = self
            .commissions
            .values()
            .filter(|e| &e.beneficiary == user_id)
            .collect();
        entries.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(a.entry_id.cmp(&b.entry_id))
        });
        entries
    }

    /// Lifetime commission earned by a beneficiary
    pub fn total_commission_for(&self, user_id: &UserId) -> Money {
        let total: i64 = self
            .commissions
            .values()
            .filter(|e| &e.beneficiary == user_id)
            .map(|e| e.amount.minor_units())
            .sum();
        Money::from_minor(total)
    }
}
