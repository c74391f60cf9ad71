//! Commission Engine
//!
//! Pays the referral chain exactly once per qualifying payment:
//! - at most one direct award to the frozen L1 referrer
//! - at most one indirect award to the frozen L2 referrer
//! - organic signups produce nothing
//!
//! The engine is pure; the service layer is responsible for running the
//! assessment inside the same transaction as the ledger update and for the
//! replay guard (an already-completed period never reaches the engine
//! twice).

mod engine;

pub use engine::CommissionEngine;

use crate::types::commission::CommissionLevel;
use crate::types::common::{Money, UserId};
use serde::{Deserialize, Serialize};

/// One award computed from a payment, before ids are assigned
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionAward {
    pub beneficiary: UserId,
    pub level: CommissionLevel,
    pub amount: Money,
}
