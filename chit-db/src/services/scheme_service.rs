//! Scheme Catalog Service
//!
//! Admin-facing scheme lifecycle: create in draft, activate, pause, resume,
//! complete, cancel. The monotonic transition table is enforced by the
//! domain type.

use crate::sequence::IdSequence;
use crate::store::MemoryDatastore;
use chit_core::error::ChitResult;
use chit_core::types::{
    CommissionRates, Money, Scheme, SchemeId, SchemeStatus, SubscriptionCycle,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Parameters for creating a scheme
#[derive(Clone, Debug)]
pub struct NewScheme {
    pub name: String,
    pub subscription_amount: Money,
    pub cycle: SubscriptionCycle,
    pub duration_periods: u32,
    pub number_of_winners: u32,
    pub start_date: DateTime<Utc>,
    pub commission_rates: Option<CommissionRates>,
}

/// Scheme catalog service
pub struct SchemeService {
    datastore: Arc<MemoryDatastore>,
    ids: IdSequence,
}

impl SchemeService {
    pub fn new(datastore: Arc<MemoryDatastore>) -> Self {
        Self {
            datastore,
            ids: IdSequence::new("scheme"),
        }
    }

    /// Create a scheme in draft status
    pub async fn create(&self, params: NewScheme) -> ChitResult<Scheme> {
        let scheme_id = SchemeId::new(self.ids.generate_id());
        let mut scheme = Scheme::new(
            scheme_id.clone(),
            params.name,
            params.subscription_amount,
            params.cycle,
            params.duration_periods,
            params.number_of_winners,
            params.start_date,
        )?;
        if let Some(rates) = params.commission_rates {
            rates.validate()?;
            scheme = scheme.with_commission_rates(rates);
        }

        let created = self
            .datastore
            .transaction(move |t| {
                t.insert_scheme(scheme.clone());
                Ok(scheme)
            })
            .await?;

        tracing::info!(
            scheme_id = %created.scheme_id,
            duration = created.duration_periods,
            winners = created.number_of_winners,
            "Scheme created"
        );
        Ok(created)
    }

    /// Move a scheme along its lifecycle
    pub async fn set_status(&self, scheme_id: &SchemeId, status: SchemeStatus) -> ChitResult<Scheme> {
        let scheme_id = scheme_id.clone();
        let updated = self
            .datastore
            .transaction(move |t| {
                let scheme = t.scheme_mut(&scheme_id)?;
                scheme.transition(status)?;
                Ok(scheme.clone())
            })
            .await?;

        tracing::info!(scheme_id = %updated.scheme_id, status = %updated.status, "Scheme status changed");
        Ok(updated)
    }

    pub async fn get(&self, scheme_id: &SchemeId) -> ChitResult<Scheme> {
        self.datastore
            .read(|t| t.scheme(scheme_id).cloned())
            .await
    }

    pub async fn list(&self) -> Vec<Scheme> {
        self.datastore
            .read(|t| t.list_schemes().into_iter().cloned().collect())
            .await
    }
}
