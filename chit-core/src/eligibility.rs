//! Winner Eligibility & Selection
//!
//! A card is eligible for a scheme's draw iff:
//! - its subscription status is active or completed,
//! - it is fully paid up (`total_payments_made == duration_periods`),
//! - it holds no non-cancelled winner record for the scheme.
//!
//! Ordering policy (deliberate, covered by tests, not to be changed
//! silently): `total_payments_made` descending, then card creation order
//! ascending, then card id for determinism.

use crate::error::{ChitError, ChitResult};
use crate::types::card::{Card, CardStatus};
use crate::types::common::CardId;
use crate::types::scheme::Scheme;
use crate::types::winner::Winner;
use std::collections::{BTreeSet, HashSet};

/// A validated (card, rank) pair ready to be persisted as a winner row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankAssignment {
    pub card_id: CardId,
    pub rank: u32,
}

/// Compute the ordered eligible set for a scheme's draw.
pub fn eligible_cards<'a>(
    scheme: &Scheme,
    cards: impl IntoIterator<Item = &'a Card>,
    winners: &[Winner],
) -> Vec<CardId> {
    let blocked: HashSet<&CardId> = winners
        .iter()
        .filter(|w| w.scheme_id == scheme.scheme_id && w.occupies_slot())
        .map(|w| &w.card_id)
        .collect();

    let mut eligible: Vec<&Card> = cards
        .into_iter()
        .filter(|c| c.scheme_id == scheme.scheme_id)
        .filter(|c| matches!(c.status, CardStatus::Active | CardStatus::Completed))
        .filter(|c| c.total_payments_made == scheme.duration_periods)
        .filter(|c| !blocked.contains(&c.card_id))
        .collect();

    eligible.sort_by(|a, b| {
        b.total_payments_made
            .cmp(&a.total_payments_made)
            .then(a.sequence.cmp(&b.sequence))
            .then(a.card_id.cmp(&b.card_id))
    });

    eligible.into_iter().map(|c| c.card_id.clone()).collect()
}

/// Validate a winner batch and assign ranks.
///
/// The whole batch is validated before any rank is assigned, so the service
/// layer can persist the result all-or-nothing. Freed ranks (from cancelled
/// winners) are reassigned lowest-first, keeping non-cancelled ranks unique
/// and contiguous from 1.
pub fn validate_selection(
    scheme: &Scheme,
    winners: &[Winner],
    eligible: &[CardId],
    selected: &[CardId],
) -> ChitResult<Vec<RankAssignment>> {
    let occupying: Vec<&Winner> = winners
        .iter()
        .filter(|w| w.scheme_id == scheme.scheme_id && w.occupies_slot())
        .collect();

    let already_won: HashSet<&CardId> = occupying.iter().map(|w| &w.card_id).collect();
    let eligible_set: HashSet<&CardId> = eligible.iter().collect();

    let mut seen: HashSet<&CardId> = HashSet::new();
    for card_id in selected {
        if !seen.insert(card_id) || already_won.contains(card_id) {
            return Err(ChitError::DuplicateWinner {
                card_id: card_id.to_string(),
                scheme_id: scheme.scheme_id.to_string(),
            });
        }
        if !eligible_set.contains(card_id) {
            return Err(ChitError::NotEligible {
                card_id: card_id.to_string(),
                scheme_id: scheme.scheme_id.to_string(),
            });
        }
    }

    let occupied = occupying.len() as u32;
    let requested = selected.len() as u32;
    if requested + occupied > scheme.number_of_winners {
        return Err(ChitError::TooManyWinners {
            requested,
            remaining: scheme.number_of_winners.saturating_sub(occupied),
        });
    }

    let used_ranks: BTreeSet<u32> = occupying.iter().map(|w| w.rank).collect();
    let mut free_ranks = (1..=scheme.number_of_winners).filter(|r| !used_ranks.contains(r));

    let assignments = selected
        .iter()
        .map(|card_id| RankAssignment {
            card_id: card_id.clone(),
            // capacity was checked above, a free rank always exists
            rank: free_ranks.next().expect("rank capacity exhausted"),
        })
        .collect();

    Ok(assignments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::card::{KycStatus, PaymentMethod, PaymentStatus};
    use crate::types::common::{Money, SchemeId, UserId, WinnerId};
    use crate::types::scheme::SubscriptionCycle;
    use crate::types::winner::WinnerStatus;
    use chrono::Utc;

    fn test_scheme(winners: u32) -> Scheme {
        Scheme::new(
            SchemeId::new("scheme_1"),
            "Gold",
            Money::from_minor(100_000),
            SubscriptionCycle::Monthly,
            3,
            winners,
            Utc::now(),
        )
        .unwrap()
    }

    fn card(id: &str, seq: u64, status: CardStatus, paid: u32) -> Card {
        Card {
            card_id: CardId::new(id),
            user_id: UserId::new(format!("user_{id}")),
            scheme_id: SchemeId::new("scheme_1"),
            holder_name: id.to_string(),
            holder_phone: "9000000000".to_string(),
            payment_method: PaymentMethod::UpiMandate,
            status,
            kyc_status: KycStatus::Verified,
            payment_status: PaymentStatus::Paid,
            wallet_balance: Money::ZERO,
            commission_balance: Money::ZERO,
            total_payments_made: paid,
            referrer_l1: None,
            referrer_l2: None,
            sequence: seq,
            status_reason: None,
            created_at: Utc::now(),
        }
    }

    fn winner(id: &str, card_id: &str, rank: u32, status: WinnerStatus) -> Winner {
        Winner {
            winner_id: WinnerId::new(id),
            scheme_id: SchemeId::new("scheme_1"),
            card_id: CardId::new(card_id),
            rank,
            status,
            won_at: Utc::now(),
        }
    }

    #[test]
    fn test_only_fully_paid_open_cards_are_eligible() {
        let scheme = test_scheme(2);
        let cards = vec![
            card("card_a", 1, CardStatus::Active, 3),
            card("card_b", 2, CardStatus::Active, 2),
            card("card_c", 3, CardStatus::Cancelled, 3),
            card("card_d", 4, CardStatus::Completed, 3),
        ];
        let eligible = eligible_cards(&scheme, &cards, &[]);
        assert_eq!(eligible, vec![CardId::new("card_a"), CardId::new("card_d")]);
    }

    #[test]
    fn test_existing_winner_blocks_eligibility() {
        let scheme = test_scheme(2);
        let cards = vec![
            card("card_a", 1, CardStatus::Active, 3),
            card("card_b", 2, CardStatus::Active, 3),
        ];
        let winners = vec![winner("win_1", "card_a", 1, WinnerStatus::Pending)];
        let eligible = eligible_cards(&scheme, &cards, &winners);
        assert_eq!(eligible, vec![CardId::new("card_b")]);
    }

    #[test]
    fn test_cancelled_winner_does_not_block() {
        let scheme = test_scheme(2);
        let cards = vec![card("card_a", 1, CardStatus::Active, 3)];
        let winners = vec![winner("win_1", "card_a", 1, WinnerStatus::Cancelled)];
        let eligible = eligible_cards(&scheme, &cards, &winners);
        assert_eq!(eligible, vec![CardId::new("card_a")]);
    }

    #[test]
    fn test_ordering_earliest_enrollee_first() {
        let scheme = test_scheme(3);
        let cards = vec![
            card("card_late", 9, CardStatus::Active, 3),
            card("card_early", 1, CardStatus::Active, 3),
        ];
        let eligible = eligible_cards(&scheme, &cards, &[]);
        assert_eq!(
            eligible,
            vec![CardId::new("card_early"), CardId::new("card_late")]
        );
    }

    #[test]
    fn test_selection_assigns_contiguous_ranks() {
        let scheme = test_scheme(3);
        let eligible = vec![CardId::new("card_a"), CardId::new("card_b")];
        let selected = vec![CardId::new("card_a"), CardId::new("card_b")];
        let assignments = validate_selection(&scheme, &[], &eligible, &selected).unwrap();
        assert_eq!(assignments[0].rank, 1);
        assert_eq!(assignments[1].rank, 2);
    }

    #[test]
    fn test_selection_reuses_freed_rank() {
        let scheme = test_scheme(2);
        let winners = vec![
            winner("win_1", "card_a", 1, WinnerStatus::Cancelled),
            winner("win_2", "card_b", 2, WinnerStatus::Pending),
        ];
        let eligible = vec![CardId::new("card_c")];
        let selected = vec![CardId::new("card_c")];
        let assignments = validate_selection(&scheme, &winners, &eligible, &selected).unwrap();
        assert_eq!(assignments[0].rank, 1);
    }

    #[test]
    fn test_duplicate_in_batch_rejected() {
        let scheme = test_scheme(3);
        let eligible = vec![CardId::new("card_a")];
        let selected = vec![CardId::new("card_a"), CardId::new("card_a")];
        let err = validate_selection(&scheme, &[], &eligible, &selected).unwrap_err();
        assert_eq!(err.kind(), "duplicate_winner");
    }

    #[test]
    fn test_not_eligible_rejected() {
        let scheme = test_scheme(3);
        let eligible = vec![CardId::new("card_a")];
        let selected = vec![CardId::new("card_x")];
        let err = validate_selection(&scheme, &[], &eligible, &selected).unwrap_err();
        assert_eq!(err.kind(), "not_eligible");
    }

    #[test]
    fn test_capacity_exceeded_rejected() {
        let scheme = test_scheme(1);
        let winners = vec![winner("win_1", "card_a", 1, WinnerStatus::Pending)];
        let eligible = vec![CardId::new("card_b")];
        let selected = vec![CardId::new("card_b")];
        let err = validate_selection(&scheme, &winners, &eligible, &selected).unwrap_err();
        assert_eq!(err.kind(), "too_many_winners");
    }
}
