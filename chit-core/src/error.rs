//! Error Code Registry
//!
//! Error code format: CHIT-{module}-{sequence}
//! - CHIT-SCHEME: Scheme catalog errors
//! - CHIT-CARD: Card ledger errors
//! - CHIT-REF: Referral graph errors
//! - CHIT-PAY: Payment/period tracker errors
//! - CHIT-WIN: Winner eligibility/selection errors
//!
//! Every variant is a caller error unless noted otherwise; callers receive
//! the stable machine-readable kind via [`ChitError::kind`] alongside the
//! human message.

use crate::types::common::Money;
use thiserror::Error;

/// Core result type
pub type ChitResult<T> = Result<T, ChitError>;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChitError {
    // ============================================================
    // Scheme Errors (CHIT-SCHEME-*)
    // ============================================================
    /// [CHIT-SCHEME-001] Scheme is not open for enrollment
    #[error("[CHIT-SCHEME-001] Scheme {scheme_id} is not open for enrollment (status {status})")]
    InvalidScheme { scheme_id: String, status: String },

    /// [CHIT-SCHEME-002] Scheme status transition violates the monotonic table
    #[error("[CHIT-SCHEME-002] Invalid scheme status transition: {from} -> {to}")]
    InvalidSchemeTransition { from: String, to: String },

    // ============================================================
    // Card Errors (CHIT-CARD-*)
    // ============================================================
    /// [CHIT-CARD-001] User already holds a non-terminal card for the scheme
    #[error("[CHIT-CARD-001] User {user_id} already holds an open card for scheme {scheme_id}")]
    DuplicateEnrollment { user_id: String, scheme_id: String },

    /// [CHIT-CARD-002] Card status transition violates the transition table
    #[error("[CHIT-CARD-002] Invalid card status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// [CHIT-CARD-003] A reason is required for this status change
    #[error("[CHIT-CARD-003] A reason is required when moving a card out of {status}")]
    ReasonRequired { status: String },

    // ============================================================
    // Referral Errors (CHIT-REF-*)
    // ============================================================
    /// [CHIT-REF-001] Referrer card does not resolve to an existing card
    #[error("[CHIT-REF-001] Referrer card {card_id} not found")]
    ReferrerNotFound { card_id: String },

    // ============================================================
    // Payment Errors (CHIT-PAY-*)
    // ============================================================
    /// [CHIT-PAY-001] A completed payment already exists for this period
    #[error("[CHIT-PAY-001] Period {period_index} of card {card_id} is already paid")]
    PeriodAlreadyPaid { card_id: String, period_index: u32 },

    /// [CHIT-PAY-002] Period index outside 1..=duration
    #[error("[CHIT-PAY-002] Period {period_index} is outside the scheme duration of {duration} periods")]
    PeriodOutOfRange { period_index: u32, duration: u32 },

    /// [CHIT-PAY-003] Payment amount does not equal the subscription amount
    #[error("[CHIT-PAY-003] Payment amount {amount} does not match the subscription amount {expected}")]
    AmountMismatch { amount: Money, expected: Money },

    // ============================================================
    // Winner Errors (CHIT-WIN-*)
    // ============================================================
    /// [CHIT-WIN-001] Card is not in the eligible set for the draw
    #[error("[CHIT-WIN-001] Card {card_id} is not eligible for the draw of scheme {scheme_id}")]
    NotEligible { card_id: String, scheme_id: String },

    /// [CHIT-WIN-002] Selection would exceed the configured winner count
    #[error("[CHIT-WIN-002] Selecting {requested} winners exceeds the remaining capacity of {remaining}")]
    TooManyWinners { requested: u32, remaining: u32 },

    /// [CHIT-WIN-003] Card repeated in the batch or already a winner
    #[error("[CHIT-WIN-003] Card {card_id} already holds a winner slot for scheme {scheme_id}")]
    DuplicateWinner { card_id: String, scheme_id: String },

    /// [CHIT-WIN-004] Winner status transition violates the transition table
    #[error("[CHIT-WIN-004] Invalid winner status transition: {from} -> {to}")]
    InvalidWinnerTransition { from: String, to: String },

    // ============================================================
    // General Errors
    // ============================================================
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Invalid monetary amount
    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    /// Operation not valid in the current state
    #[error("Invalid state: {reason}")]
    InvalidState { reason: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChitError {
    /// Stable machine-readable kind for API consumers
    pub fn kind(&self) -> &'static str {
        match self {
            ChitError::InvalidScheme { .. } => "invalid_scheme",
            ChitError::InvalidSchemeTransition { .. } => "invalid_scheme_transition",
            ChitError::DuplicateEnrollment { .. } => "duplicate_enrollment",
            ChitError::InvalidTransition { .. } => "invalid_transition",
            ChitError::ReasonRequired { .. } => "reason_required",
            ChitError::ReferrerNotFound { .. } => "referrer_not_found",
            ChitError::PeriodAlreadyPaid { .. } => "period_already_paid",
            ChitError::PeriodOutOfRange { .. } => "period_out_of_range",
            ChitError::AmountMismatch { .. } => "amount_mismatch",
            ChitError::NotEligible { .. } => "not_eligible",
            ChitError::TooManyWinners { .. } => "too_many_winners",
            ChitError::DuplicateWinner { .. } => "duplicate_winner",
            ChitError::InvalidWinnerTransition { .. } => "invalid_winner_transition",
            ChitError::NotFound { .. } => "not_found",
            ChitError::InvalidAmount { .. } => "invalid_amount",
            ChitError::InvalidState { .. } => "invalid_state",
            ChitError::SerializationError(_) => "serialization_error",
            ChitError::Internal(_) => "internal_error",
        }
    }

    /// Create a not-found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        ChitError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid-state error
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        ChitError::InvalidState {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ChitError {
    fn from(err: serde_json::Error) -> Self {
        ChitError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_stable() {
        let err = ChitError::PeriodAlreadyPaid {
            card_id: "card_1".to_string(),
            period_index: 2,
        };
        assert_eq!(err.kind(), "period_already_paid");
    }

    #[test]
    fn test_message_carries_code() {
        let err = ChitError::DuplicateEnrollment {
            user_id: "user_1".to_string(),
            scheme_id: "scheme_1".to_string(),
        };
        assert!(err.to_string().starts_with("[CHIT-CARD-001]"));
    }

    #[test]
    fn test_not_found_helper() {
        let err = ChitError::not_found("Card", "card_9");
        assert_eq!(err.kind(), "not_found");
        assert_eq!(err.to_string(), "Card not found: card_9");
    }
}
