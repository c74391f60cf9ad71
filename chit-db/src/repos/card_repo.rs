//! Card queries

use crate::store::Tables;
use chit_core::error::{ChitError, ChitResult};
use chit_core::types::{Card, CardId, SchemeId, UserId};

impl Tables {
    pub fn insert_card(&mut self, card: Card) {
        self.cards.insert(card.card_id.clone(), card);
    }

    pub fn card(&self, id: &CardId) -> ChitResult<&Card> {
        self.cards
            .get(id)
            .ok_or_else(|| ChitError::not_found("Card", id.as_str()))
    }

    pub fn card_mut(&mut self, id: &CardId) -> ChitResult<&mut Card> {
        self.cards
            .get_mut(id)
            .ok_or_else(|| ChitError::not_found("Card", id.as_str()))
    }

    /// The user's non-terminal card for a scheme, if any (the duplicate
    /// enrollment guard)
    pub fn open_card_for(&self, user_id: &UserId, scheme_id: &SchemeId) -> Option<&Card> {
        self.cards
            .values()
            .find(|c| &c.user_id == user_id && &c.scheme_id == scheme_id && c.is_open())
    }

    /// All cards of a user, in issuance order
    pub fn cards_for_user(&self, user_id: &UserId) -> Vec<&Card> {
        let mut cards: Vec<&Card> = self
            .cards
            .values()
            .filter(|c| &c.user_id == user_id)
            .collect();
        cards.sort_by_key(|c| c.sequence);
        cards
    }

    /// The user's open cards, in issuance order
    pub fn open_cards_for_user(&self, user_id: &UserId) -> Vec<&Card> {
        let mut cards: Vec<&Card> = self
            .cards
            .values()
            .filter(|c| &c.user_id == user_id && c.is_open())
            .collect();
        cards.sort_by_key(|c| c.sequence);
        cards
    }

    /// All cards enrolled in a scheme, in issuance order
    pub fn cards_in_scheme(&self, scheme_id: &SchemeId) -> Vec<&Card> {
        let mut cards: Vec<&Card> = self
            .cards
            .values()
            .filter(|c| &c.scheme_id == scheme_id)
            .collect();
        cards.sort_by_key(|c| c.sequence);
        cards
    }

    /// Cards in a scheme whose frozen L1 or L2 referrer is `user_id`, in
    /// issuance order
    pub fn downline_cards(&self, user_id: &UserId, scheme_id: &SchemeId) -> Vec<&Card> {
        let mut cards: Vec<&Card> = self
            .cards
            .values()
            .filter(|c| &c.scheme_id == scheme_id)
            .filter(|c| {
                c.referrer_l1.as_ref() == Some(user_id) || c.referrer_l2.as_ref() == Some(user_id)
            })
            .collect();
        cards.sort_by_key(|c| c.sequence);
        cards
    }

    /// Next issuance sequence number
    pub fn next_card_sequence(&self) -> u64 {
        self.cards.values().map(|c| c.sequence).max().unwrap_or(0) + 1
    }
}
