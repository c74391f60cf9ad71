//! In-Process Datastore
//!
//! The persistence engine proper is an external collaborator; this store is
//! the in-process reference implementation of the transactional contract
//! the service layer needs:
//!
//! - **Atomicity**: a transaction stages its writes on a snapshot and
//!   commits only on success, so a failed operation leaves no partial
//!   card/payment/commission state behind.
//! - **Write serialization**: one writer at a time, so two concurrent
//!   `record_payment` calls for the same (card, period) cannot both pass
//!   the uniqueness check.

use chit_core::error::ChitResult;
use chit_core::types::{
    Card, CardId, CommissionEntry, EntryId, PaymentId, PaymentRecord, Scheme, SchemeId, Winner,
    WinnerId,
};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// All entity tables
#[derive(Clone, Debug, Default)]
pub struct Tables {
    pub(crate) schemes: HashMap<SchemeId, Scheme>,
    pub(crate) cards: HashMap<CardId, Card>,
    pub(crate) payments: HashMap<PaymentId, PaymentRecord>,
    pub(crate) commissions: HashMap<EntryId, CommissionEntry>,
    pub(crate) winners: HashMap<WinnerId, Winner>,
}

/// In-memory datastore with snapshot-commit transactions
#[derive(Debug, Default)]
pub struct MemoryDatastore {
    inner: RwLock<Tables>,
}

impl MemoryDatastore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a read-only projection over the tables
    pub async fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> T {
        let guard = self.inner.read().await;
        f(&guard)
    }

    /// Run a transaction: the closure works on a staged snapshot which is
    /// committed only when it returns `Ok`. An `Err` discards every staged
    /// write.
    pub async fn transaction<T>(
        &self,
        f: impl FnOnce(&mut Tables) -> ChitResult<T>,
    ) -> ChitResult<T> {
        let mut guard = self.inner.write().await;
        let mut staged = guard.clone();
        match f(&mut staged) {
            Ok(value) => {
                *guard = staged;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }

    /// Row counts per table
    pub async fn stats(&self) -> StoreStats {
        let guard = self.inner.read().await;
        StoreStats {
            schemes: guard.schemes.len(),
            cards: guard.cards.len(),
            payments: guard.payments.len(),
            commissions: guard.commissions.len(),
            winners: guard.winners.len(),
        }
    }
}

/// Row counts per table
#[derive(Clone, Copy, Debug, Default, serde::Serialize)]
pub struct StoreStats {
    pub schemes: usize,
    pub cards: usize,
    pub payments: usize,
    pub commissions: usize,
    pub winners: usize,
}
