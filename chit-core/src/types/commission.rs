//! Commission Types
//!
//! A commission entry is an immutable record of one payout triggered by one
//! payment. For a given source payment at most one direct and at most one
//! indirect entry may exist.

use super::common::{BasisPoints, EntryId, Money, PaymentId, UserId};
use crate::error::{ChitError, ChitResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Referral level the entry pays out
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommissionLevel {
    /// Level-1 (direct) referrer
    Direct,
    /// Level-2 (indirect) referrer
    Indirect,
}

impl CommissionLevel {
    pub fn name(&self) -> &'static str {
        match self {
            CommissionLevel::Direct => "direct",
            CommissionLevel::Indirect => "indirect",
        }
    }
}

/// Immutable payout record, created exactly once per qualifying payment
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommissionEntry {
    pub entry_id: EntryId,
    pub beneficiary: UserId,
    pub source_payment: PaymentId,
    pub level: CommissionLevel,
    pub amount: Money,
    pub created_at: DateTime<Utc>,
}

/// Commission rates in basis points over the scheme subscription amount
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionRates {
    pub direct_bps: BasisPoints,
    pub indirect_bps: BasisPoints,
}

impl CommissionRates {
    pub fn new(direct_bps: u32, indirect_bps: u32) -> Self {
        Self {
            direct_bps: BasisPoints::new(direct_bps),
            indirect_bps: BasisPoints::new(indirect_bps),
        }
    }

    /// Rates above 100% each, or combined, are configuration mistakes
    pub fn validate(&self) -> ChitResult<()> {
        let combined = self.direct_bps.value() as u64 + self.indirect_bps.value() as u64;
        if combined > BasisPoints::SCALE as u64 {
            return Err(ChitError::InvalidAmount {
                reason: format!(
                    "combined commission rate {}bps exceeds 10000bps",
                    combined
                ),
            });
        }
        Ok(())
    }
}

impl Default for CommissionRates {
    /// Platform defaults: 5% direct, 2% indirect
    fn default() -> Self {
        Self::new(500, 200)
    }
}
