//! Winner Eligibility & Selection Service
//!
//! Eligibility is recomputed inside the selection transaction, so a card
//! that lost eligibility between listing and selection is caught, and the
//! whole batch commits or nothing does.

use crate::sequence::IdSequence;
use crate::store::MemoryDatastore;
use chit_core::eligibility;
use chit_core::error::ChitResult;
use chit_core::types::{CardId, SchemeId, Winner, WinnerId, WinnerStatus};
use chrono::Utc;
use std::sync::Arc;

/// Winner selection service
pub struct WinnerService {
    datastore: Arc<MemoryDatastore>,
    ids: IdSequence,
}

impl WinnerService {
    pub fn new(datastore: Arc<MemoryDatastore>) -> Self {
        Self {
            datastore,
            ids: IdSequence::new("win"),
        }
    }

    /// The ordered eligible set for a scheme's draw.
    ///
    /// Ordering: `total_payments_made` descending, then earliest enrollee
    /// first. This is a policy choice; tests pin it.
    pub async fn list_eligible(&self, scheme_id: &SchemeId) -> ChitResult<Vec<CardId>> {
        let scheme_id = scheme_id.clone();
        self.datastore
            .read(move |t| {
                let scheme = t.scheme(&scheme_id)?;
                let winners: Vec<Winner> =
                    t.winners_for_scheme(&scheme_id).into_iter().cloned().collect();
                Ok(eligibility::eligible_cards(
                    scheme,
                    t.cards_in_scheme(&scheme_id),
                    &winners,
                ))
            })
            .await
    }

    /// Record an admin-selected winner batch, all-or-nothing.
    pub async fn select_winners(
        &self,
        scheme_id: &SchemeId,
        selected: Vec<CardId>,
    ) -> ChitResult<Vec<Winner>> {
        let winner_ids: Vec<WinnerId> = selected
            .iter()
            .map(|_| WinnerId::new(self.ids.generate_id()))
            .collect();
        let log_scheme_id = scheme_id.clone();
        let scheme_id = scheme_id.clone();

        let created = self
            .datastore
            .transaction(move |t| {
                let scheme = t.scheme(&scheme_id)?.clone();
                let winners: Vec<Winner> =
                    t.winners_for_scheme(&scheme_id).into_iter().cloned().collect();
                let eligible =
                    eligibility::eligible_cards(&scheme, t.cards_in_scheme(&scheme_id), &winners);

                let assignments =
                    eligibility::validate_selection(&scheme, &winners, &eligible, &selected)?;

                let won_at = Utc::now();
                let mut created = Vec::with_capacity(assignments.len());
                for (assignment, winner_id) in assignments.into_iter().zip(winner_ids) {
                    let winner = Winner {
                        winner_id,
                        scheme_id: scheme_id.clone(),
                        card_id: assignment.card_id,
                        rank: assignment.rank,
                        status: WinnerStatus::Pending,
                        won_at,
                    };
                    t.insert_winner(winner.clone());
                    created.push(winner);
                }
                Ok(created)
            })
            .await?;

        tracing::info!(
            scheme_id = %log_scheme_id,
            count = created.len(),
            "Winners selected"
        );
        Ok(created)
    }

    /// Progress a winner along pending -> claimed -> delivered, or cancel
    pub async fn set_status(&self, winner_id: &WinnerId, status: WinnerStatus) -> ChitResult<Winner> {
        let winner_id = winner_id.clone();
        let updated = self
            .datastore
            .transaction(move |t| {
                let winner = t.winner_mut(&winner_id)?;
                winner.transition(status)?;
                Ok(winner.clone())
            })
            .await?;

        tracing::info!(winner_id = %updated.winner_id, status = %updated.status, "Winner status changed");
        Ok(updated)
    }

    pub async fn for_scheme(&self, scheme_id: &SchemeId) -> ChitResult<Vec<Winner>> {
        let scheme_id = scheme_id.clone();
        self.datastore
            .read(move |t| {
                t.scheme(&scheme_id)?;
                Ok(t.winners_for_scheme(&scheme_id).into_iter().cloned().collect())
            })
            .await
    }
}
