//! Payment/Period Tracker Service
//!
//! Records completed payments against (card, period), keeps the ledger
//! counter and derived payment status in step, and pays the referral chain
//! in the same transaction. A period can never be double-paid: the
//! uniqueness check and the ledger update commit together or not at all.

use crate::sequence::IdSequence;
use crate::store::{MemoryDatastore, Tables};
use chit_core::commission::CommissionEngine;
use chit_core::error::{ChitError, ChitResult};
use chit_core::gateway::{PaymentGateway, PaymentInitiation};
use chit_core::schedule;
use chit_core::types::{
    CardId, CardStatus, CommissionEntry, EntryId, Money, PaymentId, PaymentMethod, PaymentRecord,
    PaymentRecordStatus, PaymentSource, PaymentStatus, SchemeId, UserId,
};
use chrono::Utc;
use std::collections::BTreeSet;
use std::sync::Arc;

/// One row of the downline payment report
#[derive(Clone, Debug, serde::Serialize)]
pub struct DownlinePayment {
    pub card_id: CardId,
    pub holder_name: String,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<chrono::DateTime<Utc>>,
}

/// Payment tracker service
pub struct PaymentService {
    datastore: Arc<MemoryDatastore>,
    ids: IdSequence,
    entry_ids: IdSequence,
    engine: CommissionEngine,
}

impl PaymentService {
    pub fn new(datastore: Arc<MemoryDatastore>, engine: CommissionEngine) -> Self {
        Self {
            datastore,
            ids: IdSequence::new("pay"),
            entry_ids: IdSequence::new("comm"),
            engine,
        }
    }

    /// Record a completed payment for one period of a card.
    ///
    /// All validation happens before any mutation; the payment record, the
    /// ledger counter, the derived payment status, the auto-completion and
    /// the commission entries commit in one transaction.
    ///
    /// A replay for an already-completed period returns the existing record
    /// when the caller is the at-least-once gateway callback, and raises
    /// `PeriodAlreadyPaid` for direct API callers.
    pub async fn record_payment(
        &self,
        card_id: &CardId,
        period_index: u32,
        amount: Money,
        method: PaymentMethod,
        source: PaymentSource,
    ) -> ChitResult<PaymentRecord> {
        let payment_id = PaymentId::new(self.ids.generate_id());
        let entry_id_seed = [
            EntryId::new(self.entry_ids.generate_id()),
            EntryId::new(self.entry_ids.generate_id()),
        ];
        let engine = &self.engine;
        let card_id = card_id.clone();

        let (record, replayed) = self
            .datastore
            .transaction(move |t| {
                let card = t.card(&card_id)?.clone();
                let scheme = t.scheme(&card.scheme_id)?.clone();

                if period_index == 0 || period_index > scheme.duration_periods {
                    return Err(ChitError::PeriodOutOfRange {
                        period_index,
                        duration: scheme.duration_periods,
                    });
                }

                // The replay answer comes before any status check: a card
                // auto-completes on its final period, and the gateway may
                // still redeliver that period's callback afterwards.
                if let Some(existing) = t.completed_payment_for(&card_id, period_index) {
                    return match source {
                        PaymentSource::GatewayCallback => Ok((existing.clone(), true)),
                        PaymentSource::DirectApi => Err(ChitError::PeriodAlreadyPaid {
                            card_id: card_id.to_string(),
                            period_index,
                        }),
                    };
                }

                if !card.accepts_payments() {
                    return Err(ChitError::invalid_state(format!(
                        "card {} does not accept payments in status {}",
                        card.card_id, card.status
                    )));
                }

                if amount != scheme.subscription_amount {
                    return Err(ChitError::AmountMismatch {
                        amount,
                        expected: scheme.subscription_amount,
                    });
                }

                let record = PaymentRecord {
                    payment_id: payment_id.clone(),
                    card_id: card_id.clone(),
                    scheme_id: scheme.scheme_id.clone(),
                    period_index,
                    amount,
                    method,
                    status: PaymentRecordStatus::Completed,
                    completed_at: Utc::now(),
                };
                t.insert_payment(record.clone());

                let completed = t.completed_periods(&card_id);
                Self::apply_to_ledger(t, &card_id, &scheme.scheme_id, &completed)?;

                for (award, entry_id) in engine
                    .assess(&card, &record, &scheme)
                    .into_iter()
                    .zip(entry_id_seed.into_iter())
                {
                    if t
                        .commission_for_payment_level(&record.payment_id, award.level)
                        .is_some()
                    {
                        continue;
                    }
                    let entry = CommissionEntry {
                        entry_id,
                        beneficiary: award.beneficiary.clone(),
                        source_payment: record.payment_id.clone(),
                        level: award.level,
                        amount: award.amount,
                        created_at: Utc::now(),
                    };
                    t.insert_commission(entry);
                    Self::credit_beneficiary(t, &award.beneficiary, &scheme.scheme_id, award.amount)?;
                }

                Ok((record, false))
            })
            .await?;

        if replayed {
            tracing::warn!(
                card_id = %record.card_id,
                period_index,
                payment_id = %record.payment_id,
                "Replayed gateway callback for an already-completed period"
            );
        } else {
            tracing::info!(
                card_id = %record.card_id,
                period_index,
                amount = record.amount.minor_units(),
                payment_id = %record.payment_id,
                "Payment recorded"
            );
        }
        Ok(record)
    }

    /// Record a failed payment attempt reported by the gateway.
    ///
    /// Failed attempts never touch `total_payments_made`; they only feed
    /// the derived card-level payment status.
    pub async fn record_failure(
        &self,
        card_id: &CardId,
        period_index: u32,
        method: PaymentMethod,
    ) -> ChitResult<PaymentRecord> {
        let payment_id = PaymentId::new(self.ids.generate_id());
        let card_id = card_id.clone();

        let record = self
            .datastore
            .transaction(move |t| {
                let card = t.card(&card_id)?.clone();
                let scheme = t.scheme(&card.scheme_id)?.clone();
                if period_index == 0 || period_index > scheme.duration_periods {
                    return Err(ChitError::PeriodOutOfRange {
                        period_index,
                        duration: scheme.duration_periods,
                    });
                }

                let record = PaymentRecord {
                    payment_id: payment_id.clone(),
                    card_id: card_id.clone(),
                    scheme_id: scheme.scheme_id.clone(),
                    period_index,
                    amount: scheme.subscription_amount,
                    method,
                    status: PaymentRecordStatus::Failed,
                    completed_at: Utc::now(),
                };
                t.insert_payment(record.clone());

                let completed = t.completed_periods(&card_id);
                Self::apply_to_ledger(t, &card_id, &scheme.scheme_id, &completed)?;

                Ok(record)
            })
            .await?;

        tracing::warn!(
            card_id = %record.card_id,
            period_index,
            "Payment attempt failed"
        );
        Ok(record)
    }

    /// Completed period indices for a card
    pub async fn completed_periods(&self, card_id: &CardId) -> ChitResult<BTreeSet<u32>> {
        let card_id = card_id.clone();
        self.datastore
            .read(move |t| {
                t.card(&card_id)?;
                Ok(t.completed_periods(&card_id))
            })
            .await
    }

    /// Downline payment report for one scheme period: all cards whose
    /// frozen L1 or L2 points at `user_id`, paid rows first
    /// (most-recently-paid leading), unpaid rows after in issuance order.
    pub async fn list_downline_payments(
        &self,
        user_id: &UserId,
        scheme_id: &SchemeId,
        period_index: u32,
    ) -> ChitResult<Vec<DownlinePayment>> {
        let user_id = user_id.clone();
        let scheme_id = scheme_id.clone();
        self.datastore
            .read(move |t| {
                t.scheme(&scheme_id)?;

                let mut paid: Vec<(DownlinePayment, chrono::DateTime<Utc>, u64)> = Vec::new();
                let mut unpaid: Vec<(DownlinePayment, u64)> = Vec::new();

                for card in t.downline_cards(&user_id, &scheme_id) {
                    match t.completed_payment_for(&card.card_id, period_index) {
                        Some(record) => paid.push((
                            DownlinePayment {
                                card_id: card.card_id.clone(),
                                holder_name: card.holder_name.clone(),
                                payment_method: record.method,
                                payment_status: PaymentStatus::Paid,
                                paid_at: Some(record.completed_at),
                            },
                            record.completed_at,
                            card.sequence,
                        )),
                        None => unpaid.push((
                            DownlinePayment {
                                card_id: card.card_id.clone(),
                                holder_name: card.holder_name.clone(),
                                payment_method: card.payment_method,
                                payment_status: card.payment_status,
                                paid_at: None,
                            },
                            card.sequence,
                        )),
                    }
                }

                paid.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
                unpaid.sort_by_key(|(_, seq)| *seq);

                Ok(paid
                    .into_iter()
                    .map(|(row, _, _)| row)
                    .chain(unpaid.into_iter().map(|(row, _)| row))
                    .collect())
            })
            .await
    }

    /// Ask the gateway to start a payment for one open period.
    ///
    /// The period is validated the same way `record_payment` validates it,
    /// so a redirect is never handed out for a period that could not be
    /// recorded later.
    pub async fn initiate_payment(
        &self,
        gateway: &dyn PaymentGateway,
        card_id: &CardId,
        period_index: u32,
    ) -> ChitResult<PaymentInitiation> {
        let lookup_card_id = card_id.clone();
        let amount = self
            .datastore
            .read(move |t| {
                let card = t.card(&lookup_card_id)?;
                if !card.accepts_payments() {
                    return Err(ChitError::invalid_state(format!(
                        "card {} does not accept payments in status {}",
                        card.card_id, card.status
                    )));
                }
                let scheme = t.scheme(&card.scheme_id)?;
                if period_index == 0 || period_index > scheme.duration_periods {
                    return Err(ChitError::PeriodOutOfRange {
                        period_index,
                        duration: scheme.duration_periods,
                    });
                }
                if t.completed_payment_for(&lookup_card_id, period_index).is_some() {
                    return Err(ChitError::PeriodAlreadyPaid {
                        card_id: lookup_card_id.to_string(),
                        period_index,
                    });
                }
                Ok(scheme.subscription_amount)
            })
            .await?;

        let initiation = gateway.initiate(card_id, period_index, amount).await?;
        tracing::info!(
            card_id = %card_id,
            period_index,
            gateway_ref = %initiation.gateway_ref,
            "Payment initiated"
        );
        Ok(initiation)
    }

    /// Re-derive the ledger fields of a card from its payment records:
    /// counter, payment status, and the automatic completion of a fully
    /// paid active card.
    fn apply_to_ledger(
        t: &mut Tables,
        card_id: &CardId,
        scheme_id: &SchemeId,
        completed: &BTreeSet<u32>,
    ) -> ChitResult<()> {
        let scheme = t.scheme(scheme_id)?.clone();
        let due = schedule::expected_period(&scheme, Utc::now());
        let last_failed = t
            .last_attempt_for(card_id)
            .map(|p| p.status == PaymentRecordStatus::Failed)
            .unwrap_or(false);
        let total = completed.len() as u32;
        if total > scheme.duration_periods {
            return Err(ChitError::Internal(format!(
                "card {} holds {} completed periods for a {}-period scheme",
                card_id, total, scheme.duration_periods
            )));
        }

        let card = t.card_mut(card_id)?;
        card.total_payments_made = total;
        card.payment_status =
            schedule::derive_payment_status(scheme.duration_periods, due, completed, last_failed);

        if total == scheme.duration_periods && card.status == CardStatus::Active {
            card.transition(CardStatus::Completed, Some("all periods paid"))?;
        }
        Ok(())
    }

    /// Pay a commission into the beneficiary's wallet: their open card in
    /// the paying scheme when one exists, else their earliest open card.
    /// The commission entry stands even when no open card remains.
    fn credit_beneficiary(
        t: &mut Tables,
        user_id: &UserId,
        scheme_id: &SchemeId,
        amount: Money,
    ) -> ChitResult<()> {
        let target: Option<CardId> = t
            .open_card_for(user_id, scheme_id)
            .map(|c| c.card_id.clone())
            .or_else(|| {
                t.open_cards_for_user(user_id)
                    .first()
                    .map(|c| c.card_id.clone())
            });

        match target {
            Some(card_id) => {
                let card = t.card_mut(&card_id)?;
                card.credit_commission(amount)?;
                Ok(())
            }
            None => {
                tracing::warn!(
                    user_id = %user_id,
                    amount = amount.minor_units(),
                    "Commission earned but beneficiary has no open card to credit"
                );
                Ok(())
            }
        }
    }

    /// Full payment history of a card, most recent first
    pub async fn history(&self, card_id: &CardId) -> ChitResult<Vec<PaymentRecord>> {
        let card_id = card_id.clone();
        self.datastore
            .read(move |t| {
                t.card(&card_id)?;
                Ok(t.payments_for_card(&card_id).into_iter().cloned().collect())
            })
            .await
    }

    #[cfg(test)]
    pub(crate) async fn card_snapshot(&self, card_id: &CardId) -> chit_core::types::Card {
        let card_id = card_id.clone();
        self.datastore
            .read(move |t| t.card(&card_id).cloned())
            .await
            .unwrap()
    }
}
