//! Referral Linkage
//!
//! The referral graph is never stored or walked as a graph. At issuance
//! time exactly two hops are resolved from the chosen referrer card and
//! frozen onto the new card: L1 is the referrer card's owner, L2 is the
//! referrer card's own L1. Commission computation at payment time is O(1)
//! because nothing deeper is ever materialized.

use crate::types::card::Card;
use crate::types::common::UserId;
use serde::{Deserialize, Serialize};

/// Frozen two-hop referral snapshot for a new card
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralLink {
    /// Direct (level-1) referrer
    pub l1: Option<UserId>,
    /// Indirect (level-2) referrer
    pub l2: Option<UserId>,
}

impl ReferralLink {
    /// Organic signup: no referral chain
    pub fn none() -> Self {
        Self::default()
    }

    /// Resolve the two tracked levels from the referrer's card.
    ///
    /// The referrer card's own L2 is deliberately ignored: only two levels
    /// are ever tracked, so the new card's L2 is the referrer's L1 and the
    /// chain stops there.
    pub fn resolve(referrer: Option<&Card>) -> Self {
        match referrer {
            Some(card) => Self {
                l1: Some(card.user_id.clone()),
                l2: card.referrer_l1.clone(),
            },
            None => Self::none(),
        }
    }

    pub fn has_upstream(&self) -> bool {
        self.l1.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::card::{CardStatus, KycStatus, PaymentMethod, PaymentStatus};
    use crate::types::common::{CardId, Money, SchemeId};
    use chrono::Utc;

    fn card_with_refs(user: &str, l1: Option<&str>, l2: Option<&str>) -> Card {
        Card {
            card_id: CardId::new(format!("card_{user}")),
            user_id: UserId::new(user),
            scheme_id: SchemeId::new("scheme_1"),
            holder_name: user.to_string(),
            holder_phone: "9000000000".to_string(),
            payment_method: PaymentMethod::UpiMandate,
            status: CardStatus::Active,
            kyc_status: KycStatus::Verified,
            payment_status: PaymentStatus::Pending,
            wallet_balance: Money::ZERO,
            commission_balance: Money::ZERO,
            total_payments_made: 0,
            referrer_l1: l1.map(UserId::new),
            referrer_l2: l2.map(UserId::new),
            sequence: 0,
            status_reason: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_organic_signup_has_no_upstream() {
        let link = ReferralLink::resolve(None);
        assert_eq!(link, ReferralLink::none());
        assert!(!link.has_upstream());
    }

    #[test]
    fn test_single_hop() {
        let referrer = card_with_refs("r1", None, None);
        let link = ReferralLink::resolve(Some(&referrer));
        assert_eq!(link.l1, Some(UserId::new("r1")));
        assert_eq!(link.l2, None);
    }

    #[test]
    fn test_two_hops() {
        let referrer = card_with_refs("r2", Some("r1"), None);
        let link = ReferralLink::resolve(Some(&referrer));
        assert_eq!(link.l1, Some(UserId::new("r2")));
        assert_eq!(link.l2, Some(UserId::new("r1")));
    }

    #[test]
    fn test_third_hop_is_not_tracked() {
        // r3 was referred by r2, who was referred by r1; a card referred by
        // r3 sees r3 and r2 only.
        let referrer = card_with_refs("r3", Some("r2"), Some("r1"));
        let link = ReferralLink::resolve(Some(&referrer));
        assert_eq!(link.l1, Some(UserId::new("r3")));
        assert_eq!(link.l2, Some(UserId::new("r2")));
    }
}
