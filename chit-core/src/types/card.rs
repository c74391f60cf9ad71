//! Card (Subscription) Ledger Types
//!
//! A card is one user's enrollment in one scheme. The scheme id and the
//! frozen L1/L2 referral linkage never change after issuance; the only
//! mutations are payment completion (counter, derived payment status,
//! wallet credits) and status changes through the closed transition table.

use super::common::{CardId, Money, SchemeId, UserId};
use crate::error::{ChitError, ChitResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the subscription is collected
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    UpiOnetime,
    UpiMandate,
}

/// Card subscription status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    Active,
    Paused,
    Cancelled,
    Expired,
    Completed,
}

impl CardStatus {
    /// Check if a status transition is allowed.
    ///
    /// active -> paused | cancelled | completed | expired
    /// paused -> active | cancelled
    /// cancelled / expired / completed are terminal.
    pub fn is_valid_transition(&self, new_status: &CardStatus) -> bool {
        match (self, new_status) {
            (CardStatus::Active, CardStatus::Paused) => true,
            (CardStatus::Active, CardStatus::Cancelled) => true,
            (CardStatus::Active, CardStatus::Completed) => true,
            (CardStatus::Active, CardStatus::Expired) => true,
            (CardStatus::Paused, CardStatus::Active) => true,
            (CardStatus::Paused, CardStatus::Cancelled) => true,
            _ => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CardStatus::Cancelled | CardStatus::Expired | CardStatus::Completed
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            CardStatus::Active => "active",
            CardStatus::Paused => "paused",
            CardStatus::Cancelled => "cancelled",
            CardStatus::Expired => "expired",
            CardStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for CardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// KYC verification status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    Pending,
    Verified,
    Rejected,
    Incomplete,
}

/// Card-level payment status, derived from the payment-record set and the
/// schedule position (see `schedule::derive_payment_status`). Never mutated
/// independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Partial,
    Overdue,
    Failed,
}

/// One user's enrollment in one scheme
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    pub card_id: CardId,
    pub user_id: UserId,
    /// Immutable after issuance
    pub scheme_id: SchemeId,
    pub holder_name: String,
    pub holder_phone: String,
    pub payment_method: PaymentMethod,
    pub status: CardStatus,
    pub kyc_status: KycStatus,
    pub payment_status: PaymentStatus,
    pub wallet_balance: Money,
    pub commission_balance: Money,
    /// Count of completed payment records; never exceeds the scheme duration
    pub total_payments_made: u32,
    /// Direct (level-1) referrer, frozen at issuance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer_l1: Option<UserId>,
    /// Indirect (level-2) referrer, frozen at issuance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer_l2: Option<UserId>,
    /// Issuance order within the store; used for creation-time tie-breaks
    pub sequence: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Card {
    /// Apply a status transition, enforcing the transition table.
    ///
    /// A reason is required when transitioning to cancelled or when leaving
    /// active/paused.
    pub fn transition(&mut self, new_status: CardStatus, reason: Option<&str>) -> ChitResult<()> {
        if !self.status.is_valid_transition(&new_status) {
            return Err(ChitError::InvalidTransition {
                from: self.status.to_string(),
                to: new_status.to_string(),
            });
        }

        let reason_required = new_status == CardStatus::Cancelled
            || matches!(self.status, CardStatus::Active | CardStatus::Paused);
        if reason_required && reason.map_or(true, |r| r.trim().is_empty()) {
            return Err(ChitError::ReasonRequired {
                status: self.status.to_string(),
            });
        }

        self.status = new_status;
        self.status_reason = reason.map(|r| r.to_string());
        Ok(())
    }

    /// A card is open while it has not reached a terminal status
    pub fn is_open(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Cards accept payments while active or paused (catch-up is legal)
    pub fn accepts_payments(&self) -> bool {
        matches!(self.status, CardStatus::Active | CardStatus::Paused)
    }

    /// Credit the commission wallet (read-modify-write, checked)
    pub fn credit_commission(&mut self, amount: Money) -> ChitResult<()> {
        self.commission_balance = self.commission_balance.checked_add(amount)?;
        self.wallet_balance = self.wallet_balance.checked_add(amount)?;
        Ok(())
    }

    /// Credit the main wallet (read-modify-write, checked)
    pub fn credit_wallet(&mut self, amount: Money) -> ChitResult<()> {
        self.wallet_balance = self.wallet_balance.checked_add(amount)?;
        Ok(())
    }
}
