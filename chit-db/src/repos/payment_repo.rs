//! Payment record queries

use crate::store::Tables;
use chit_core::types::{CardId, PaymentRecord, SchemeId};
use std::collections::BTreeSet;

impl Tables {
    pub fn insert_payment(&mut self, record: PaymentRecord) {
        self.payments.insert(record.payment_id.clone(), record);
    }

    /// Completed period indices for a card
    pub fn completed_periods(&self, card_id: &CardId) -> BTreeSet<u32> {
        self.payments
            .values()
            .filter(|p| &p.card_id == card_id && p.is_completed())
            .map(|p| p.period_index)
            .collect()
    }

    /// The completed record for one (card, period), if any. This is the
    /// double-payment guard.
    pub fn completed_payment_for(&self, card_id: &CardId, period_index: u32) -> Option<&PaymentRecord> {
        self.payments
            .values()
            .find(|p| &p.card_id == card_id && p.period_index == period_index && p.is_completed())
    }

    /// Count of completed records for a card
    pub fn completed_count_for(&self, card_id: &CardId) -> u32 {
        self.payments
            .values()
            .filter(|p| &p.card_id == card_id && p.is_completed())
            .count() as u32
    }

    /// The most recent attempt (completed or failed) for a card
    pub fn last_attempt_for(&self, card_id: &CardId) -> Option<&PaymentRecord> {
        self.payments
            .values()
            .filter(|p| &p.card_id == card_id)
            .max_by(|a, b| {
                a.completed_at
                    .cmp(&b.completed_at)
                    .then(a.payment_id.cmp(&b.payment_id))
            })
    }

    /// All records for a card, most recent first
    pub fn payments_for_card(&self, card_id: &CardId) -> Vec<&PaymentRecord> {
        let mut records: Vec<&PaymentRecord> = self
            .payments
            .values()
            .filter(|p| &p.card_id == card_id)
            .collect();
        records.sort_by(|a, b| {
            b.completed_at
                .cmp(&a.completed_at)
                .then(a.payment_id.cmp(&b.payment_id))
        });
        records
    }

    /// Completed records of one scheme period
    pub fn completed_in_period(&self, scheme_id: &SchemeId, period_index: u32) -> Vec<&PaymentRecord> {
        self.payments
            .values()
            .filter(|p| {
                &p.scheme_id == scheme_id && p.period_index == period_index && p.is_completed()
            })
            .collect()
    }
}
