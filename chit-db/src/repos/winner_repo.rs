//! Winner queries

use crate::store::Tables;
use chit_core::error::{ChitError, ChitResult};
use chit_core::types::{CardId, SchemeId, Winner, WinnerId};

impl Tables {
    pub fn insert_winner(&mut self, winner: Winner) {
        self.winners.insert(winner.winner_id.clone(), winner);
    }

    pub fn winner_mut(&mut self, id: &WinnerId) -> ChitResult<&mut Winner> {
        self.winners
            .get_mut(id)
            .ok_or_else(|| ChitError::not_found("Winner", id.as_str()))
    }

    /// All winner rows of a scheme, by rank then win date
    pub fn winners_for_scheme(&self, scheme_id: &SchemeId) -> Vec<&Winner> {
        let mut winners: Vec<&Winner> = self
            .winners
            .values()
            .filter(|w| &w.scheme_id == scheme_id)
            .collect();
        winners.sort_by(|a, b| a.rank.cmp(&b.rank).then(a.won_at.cmp(&b.won_at)));
        winners
    }

    /// The card's non-cancelled winner row for a scheme, if any
    pub fn occupying_winner_for_card(
        &self,
        scheme_id: &SchemeId,
        card_id: &CardId,
    ) -> Option<&Winner> {
        self.winners
            .values()
            .find(|w| &w.scheme_id == scheme_id && &w.card_id == card_id && w.occupies_slot())
    }
}
