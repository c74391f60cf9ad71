//! Chit Core - Subscription, Referral Commission and Winner Engine
//!
//! Domain layer of the chitcore platform. It provides:
//! - **Card Ledger**: one enrollment record per user per scheme, with closed
//!   status transition tables
//! - **Referral Linkage**: a two-hop snapshot frozen at issuance
//! - **Commission Engine**: direct/indirect payouts per completed payment
//! - **Billing Schedule**: period arithmetic and derived payment status
//! - **Winner Eligibility**: the draw predicate, ordering policy and batch
//!   rank assignment
//!
//! # Core Invariants
//!
//! | Invariant | Requirement |
//! |-----------|-------------|
//! | **Frozen linkage** | A card's scheme id and L1/L2 referrers never change after issuance |
//! | **One payment per period** | At most one completed payment record per (card, period) |
//! | **Pay once** | At most one direct and one indirect commission entry per source payment |
//! | **Bounded counter** | `total_payments_made` never exceeds the scheme duration |
//! | **Closed transitions** | Scheme, card and winner statuses only move along their tables |
//! | **Unique ranks** | Non-cancelled winner ranks are unique and contiguous from 1 |
//!
//! Monetary amounts are integer minor units (paise); rates are basis
//! points. Persistence and HTTP surfaces live in the `chit-db` and
//! `chit-api` crates.

pub mod commission;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod referral;
pub mod schedule;
pub mod types;

pub use commission::{CommissionAward, CommissionEngine};
pub use config::EngineConfig;
pub use error::{ChitError, ChitResult};
pub use gateway::{PaymentGateway, PaymentInitiation};
pub use logging::LogLevel;
pub use referral::ReferralLink;
pub use types::*;
