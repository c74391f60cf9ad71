//! Card Ledger Service
//!
//! Card issuance and administration. Issuance is where the referral
//! linkage is resolved and frozen: the chosen referrer card's owner becomes
//! L1 and that card's own L1 becomes L2, and neither is ever re-resolved.

use crate::sequence::IdSequence;
use crate::store::MemoryDatastore;
use chit_core::error::{ChitError, ChitResult};
use chit_core::referral::ReferralLink;
use chit_core::types::{
    Card, CardId, CardStatus, KycStatus, Money, PaymentMethod, PaymentStatus, SchemeId, UserId,
};
use chrono::Utc;
use std::sync::Arc;

/// Parameters for issuing a card
#[derive(Clone, Debug)]
pub struct IssueCard {
    pub user_id: UserId,
    pub scheme_id: SchemeId,
    pub holder_name: String,
    pub holder_phone: String,
    pub payment_method: PaymentMethod,
    pub referrer_card_id: Option<CardId>,
}

/// Card ledger service
pub struct CardService {
    datastore: Arc<MemoryDatastore>,
    ids: IdSequence,
}

impl CardService {
    pub fn new(datastore: Arc<MemoryDatastore>) -> Self {
        Self {
            datastore,
            ids: IdSequence::new("card"),
        }
    }

    /// Issue a card against an active scheme.
    ///
    /// Fails with `InvalidScheme` when the scheme is not active,
    /// `DuplicateEnrollment` when the user already holds an open card for
    /// the scheme, and `ReferrerNotFound` when the referrer card does not
    /// resolve.
    pub async fn issue_card(&self, params: IssueCard) -> ChitResult<Card> {
        let card_id = CardId::new(self.ids.generate_id());

        let issued = self
            .datastore
            .transaction(move |t| {
                let scheme = t.scheme(&params.scheme_id)?;
                if !scheme.is_open_for_enrollment() {
                    return Err(ChitError::InvalidScheme {
                        scheme_id: params.scheme_id.to_string(),
                        status: scheme.status.to_string(),
                    });
                }

                if t.open_card_for(&params.user_id, &params.scheme_id).is_some() {
                    return Err(ChitError::DuplicateEnrollment {
                        user_id: params.user_id.to_string(),
                        scheme_id: params.scheme_id.to_string(),
                    });
                }

                let link = match &params.referrer_card_id {
                    Some(referrer_id) => {
                        let referrer =
                            t.cards.get(referrer_id).ok_or(ChitError::ReferrerNotFound {
                                card_id: referrer_id.to_string(),
                            })?;
                        ReferralLink::resolve(Some(referrer))
                    }
                    None => ReferralLink::none(),
                };

                let card = Card {
                    card_id: card_id.clone(),
                    user_id: params.user_id.clone(),
                    scheme_id: params.scheme_id.clone(),
                    holder_name: params.holder_name.clone(),
                    holder_phone: params.holder_phone.clone(),
                    payment_method: params.payment_method,
                    status: CardStatus::Active,
                    kyc_status: KycStatus::Pending,
                    payment_status: PaymentStatus::Pending,
                    wallet_balance: Money::ZERO,
                    commission_balance: Money::ZERO,
                    total_payments_made: 0,
                    referrer_l1: link.l1,
                    referrer_l2: link.l2,
                    sequence: t.next_card_sequence(),
                    status_reason: None,
                    created_at: Utc::now(),
                };
                t.insert_card(card.clone());
                Ok(card)
            })
            .await?;

        tracing::info!(
            card_id = %issued.card_id,
            user_id = %issued.user_id,
            scheme_id = %issued.scheme_id,
            referred = issued.referrer_l1.is_some(),
            "Card issued"
        );
        Ok(issued)
    }

    /// Admin status override; the transition table and reason requirement
    /// are enforced by the domain type
    pub async fn set_status(
        &self,
        card_id: &CardId,
        status: CardStatus,
        reason: Option<String>,
    ) -> ChitResult<Card> {
        let card_id = card_id.clone();
        let updated = self
            .datastore
            .transaction(move |t| {
                let card = t.card_mut(&card_id)?;
                card.transition(status, reason.as_deref())?;
                Ok(card.clone())
            })
            .await?;

        tracing::info!(card_id = %updated.card_id, status = %updated.status, "Card status changed");
        Ok(updated)
    }

    /// KYC verdict update
    pub async fn set_kyc(&self, card_id: &CardId, kyc_status: KycStatus) -> ChitResult<Card> {
        let card_id = card_id.clone();
        let updated = self
            .datastore
            .transaction(move |t| {
                let card = t.card_mut(&card_id)?;
                card.kyc_status = kyc_status;
                Ok(card.clone())
            })
            .await?;

        tracing::info!(card_id = %updated.card_id, kyc = ?updated.kyc_status, "Card KYC updated");
        Ok(updated)
    }

    pub async fn get(&self, card_id: &CardId) -> ChitResult<Card> {
        self.datastore.read(|t| t.card(card_id).cloned()).await
    }

    pub async fn for_user(&self, user_id: &UserId) -> Vec<Card> {
        self.datastore
            .read(|t| t.cards_for_user(user_id).into_iter().cloned().collect())
            .await
    }
}
