//! Chit DB - Datastore and Service Layer
//!
//! Persistence and orchestration for the chitcore platform. The backing
//! store is an in-process datastore with snapshot-commit transactions; the
//! services implement the public operation groups on top of it:
//!
//! - `SchemeService` - scheme catalog administration
//! - `CardService` - card issuance and status administration
//! - `PaymentService` - period payments, downline reporting, gateway seam
//! - `WinnerService` - draw eligibility and winner selection
//! - `ReportingService` - dashboard rollups
//!
//! # Usage Example
//!
//! ```ignore
//! use chit_db::ChitDatabase;
//! use chit_core::EngineConfig;
//!
//! let db = ChitDatabase::new(EngineConfig::default());
//! let scheme = db.schemes.create(new_scheme).await?;
//! ```

pub mod repos;
pub mod sequence;
pub mod services;
pub mod store;

pub use sequence::IdSequence;
pub use services::{
    CardService, DownlinePayment, IssueCard, NewScheme, PaymentService, PeriodCollection,
    ReportingService, SchemeDashboard, SchemeService, UserDashboard, WinnerService,
};
pub use store::{MemoryDatastore, StoreStats, Tables};

use chit_core::commission::CommissionEngine;
use chit_core::config::EngineConfig;
use std::sync::Arc;

/// Database facade
///
/// Bundles the datastore with one instance of every service, all sharing
/// the same tables.
pub struct ChitDatabase {
    datastore: Arc<MemoryDatastore>,
    pub schemes: SchemeService,
    pub cards: CardService,
    pub payments: PaymentService,
    pub winners: WinnerService,
    pub reports: ReportingService,
}

impl ChitDatabase {
    /// Create a fresh database with the given engine configuration
    pub fn new(config: EngineConfig) -> Self {
        let datastore = Arc::new(MemoryDatastore::new());
        Self {
            schemes: SchemeService::new(datastore.clone()),
            cards: CardService::new(datastore.clone()),
            payments: PaymentService::new(datastore.clone(), CommissionEngine::new(config.rates)),
            winners: WinnerService::new(datastore.clone()),
            reports: ReportingService::new(datastore.clone()),
            datastore,
        }
    }

    /// The underlying datastore (read projections, tests)
    pub fn datastore(&self) -> &Arc<MemoryDatastore> {
        &self.datastore
    }
}

impl Default for ChitDatabase {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
