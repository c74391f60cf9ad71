//! Payment Record Types
//!
//! One record per payment attempt against a (card, period). At most one
//! completed record may exist per (card, period); failed attempts are kept
//! for reporting but never count toward `total_payments_made`.

use super::card::PaymentMethod;
use super::common::{CardId, Money, PaymentId, SchemeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a payment attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentRecordStatus {
    Completed,
    Failed,
}

/// Caller context for `record_payment`.
///
/// Payment confirmations arrive at-least-once from the gateway callback, so
/// replays from that path return the existing record; a direct API caller
/// double-submitting gets the period-already-paid error instead. Same code
/// path, different replay answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentSource {
    GatewayCallback,
    DirectApi,
}

/// A payment attempt against one period of one card
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub payment_id: PaymentId,
    pub card_id: CardId,
    pub scheme_id: SchemeId,
    /// 1-based period index, always <= scheme duration
    pub period_index: u32,
    pub amount: Money,
    pub method: PaymentMethod,
    pub status: PaymentRecordStatus,
    pub completed_at: DateTime<Utc>,
}

impl PaymentRecord {
    pub fn is_completed(&self) -> bool {
        self.status == PaymentRecordStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_source_serde_shape() {
        let json = serde_json::to_string(&PaymentSource::GatewayCallback).unwrap();
        assert_eq!(json, "\"gateway_callback\"");
    }

    #[test]
    fn test_is_completed() {
        let record = PaymentRecord {
            payment_id: PaymentId::new("pay_1"),
            card_id: CardId::new("card_1"),
            scheme_id: SchemeId::new("scheme_1"),
            period_index: 1,
            amount: Money::from_minor(100_000),
            method: PaymentMethod::UpiOnetime,
            status: PaymentRecordStatus::Completed,
            completed_at: Utc::now(),
        };
        assert!(record.is_completed());
    }
}
