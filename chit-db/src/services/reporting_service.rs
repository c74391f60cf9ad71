//! Dashboard Aggregator
//!
//! Read-only rollups consumed by the UI. Pure projections over the tables;
//! no invariants of their own.

use crate::store::MemoryDatastore;
use chit_core::error::ChitResult;
use chit_core::types::{CardStatus, CommissionEntry, Money, SchemeId, UserId};
use serde::Serialize;
use std::sync::Arc;

/// Per-user rollup for the member dashboard
#[derive(Clone, Debug, Serialize)]
pub struct UserDashboard {
    pub user_id: UserId,
    pub total_cards: u32,
    pub active_cards: u32,
    pub total_wallet: Money,
    pub commission_wallet: Money,
    pub total_payments_made: u32,
    pub total_commission_earned: Money,
    pub commission_entries: u32,
    pub wins: u32,
}

/// Per-period collection counts for the admin dashboard
#[derive(Clone, Debug, Serialize)]
pub struct PeriodCollection {
    pub period_index: u32,
    pub payments: u32,
    pub collected: Money,
}

/// Per-scheme rollup for the admin dashboard
#[derive(Clone, Debug, Serialize)]
pub struct SchemeDashboard {
    pub scheme_id: SchemeId,
    pub total_cards: u32,
    pub active_cards: u32,
    pub completed_cards: u32,
    pub fully_paid_cards: u32,
    pub winners_selected: u32,
    pub total_collected: Money,
    pub collections_by_period: Vec<PeriodCollection>,
}

/// Reporting service
pub struct ReportingService {
    datastore: Arc<MemoryDatastore>,
}

impl ReportingService {
    pub fn new(datastore: Arc<MemoryDatastore>) -> Self {
        Self { datastore }
    }

    /// Member dashboard rollup
    pub async fn user_dashboard(&self, user_id: &UserId) -> UserDashboard {
        let user_id = user_id.clone();
        self.datastore
            .read(move |t| {
                let cards = t.cards_for_user(&user_id);
                let total_wallet = Money::from_minor(
                    cards.iter().map(|c| c.wallet_balance.minor_units()).sum(),
                );
                let commission_wallet = Money::from_minor(
                    cards.iter().map(|c| c.commission_balance.minor_units()).sum(),
                );
                let entries = t.commissions_for_beneficiary(&user_id);
                let wins = t
                    .winners
                    .values()
                    .filter(|w| {
                        w.occupies_slot()
                            && cards.iter().any(|c| c.card_id == w.card_id)
                    })
                    .count() as u32;

                UserDashboard {
                    total_cards: cards.len() as u32,
                    active_cards: cards
                        .iter()
                        .filter(|c| c.status == CardStatus::Active)
                        .count() as u32,
                    total_wallet,
                    commission_wallet,
                    total_payments_made: cards.iter().map(|c| c.total_payments_made).sum(),
                    total_commission_earned: t.total_commission_for(&user_id),
                    commission_entries: entries.len() as u32,
                    wins,
                    user_id,
                }
            })
            .await
    }

    /// Admin dashboard rollup for one scheme
    pub async fn scheme_dashboard(&self, scheme_id: &SchemeId) -> ChitResult<SchemeDashboard> {
        let scheme_id = scheme_id.clone();
        self.datastore
            .read(move |t| {
                let scheme = t.scheme(&scheme_id)?;
                let cards = t.cards_in_scheme(&scheme_id);

                let collections_by_period = (1..=scheme.duration_periods)
                    .map(|period_index| {
                        let records = t.completed_in_period(&scheme_id, period_index);
                        PeriodCollection {
                            period_index,
                            payments: records.len() as u32,
                            collected: Money::from_minor(
                                records.iter().map(|r| r.amount.minor_units()).sum(),
                            ),
                        }
                    })
                    .collect::<Vec<_>>();

                let total_collected = Money::from_minor(
                    collections_by_period
                        .iter()
                        .map(|p| p.collected.minor_units())
                        .sum(),
                );

                Ok(SchemeDashboard {
                    total_cards: cards.len() as u32,
                    active_cards: cards
                        .iter()
                        .filter(|c| c.status == CardStatus::Active)
                        .count() as u32,
                    completed_cards: cards
                        .iter()
                        .filter(|c| c.status == CardStatus::Completed)
                        .count() as u32,
                    fully_paid_cards: cards
                        .iter()
                        .filter(|c| c.total_payments_made == scheme.duration_periods)
                        .count() as u32,
                    winners_selected: t
                        .winners_for_scheme(&scheme_id)
                        .iter()
                        .filter(|w| w.occupies_slot())
                        .count() as u32,
                    total_collected,
                    collections_by_period,
                    scheme_id,
                })
            })
            .await
    }

    /// A user's commission history, most recent first
    pub async fn commission_history(&self, user_id: &UserId) -> Vec<CommissionEntry> {
        let user_id = user_id.clone();
        self.datastore
            .read(move |t| {
                t.commissions_for_beneficiary(&user_id)
                    .into_iter()
                    .cloned()
                    .collect()
            })
            .await
    }
}
