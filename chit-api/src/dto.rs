//! Data Transfer Objects
//!
//! Request and response DTOs for the API layer. Monetary fields travel as
//! integer minor units.

use chit_core::types::{
    Card, CardStatus, CommissionEntry, CommissionLevel, CommissionRates, KycStatus, PaymentMethod,
    PaymentRecord, PaymentRecordStatus, PaymentStatus, Scheme, SchemeStatus, SubscriptionCycle,
    Winner, WinnerStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// Scheme DTOs
// ============================================

/// Commission override on a scheme
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionRatesDto {
    pub direct_bps: u32,
    pub indirect_bps: u32,
}

impl From<CommissionRatesDto> for CommissionRates {
    fn from(dto: CommissionRatesDto) -> Self {
        CommissionRates::new(dto.direct_bps, dto.indirect_bps)
    }
}

/// Request to create a scheme
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSchemeRequest {
    pub name: String,
    /// Minor units per period
    pub subscription_amount: i64,
    pub cycle: SubscriptionCycle,
    pub duration_periods: u32,
    pub number_of_winners: u32,
    pub start_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission_rates: Option<CommissionRatesDto>,
}

/// Request to move a scheme along its lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetSchemeStatusRequest {
    pub status: SchemeStatus,
}

/// Scheme representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeDto {
    pub scheme_id: String,
    pub name: String,
    pub subscription_amount: i64,
    pub cycle: SubscriptionCycle,
    pub duration_periods: u32,
    pub number_of_winners: u32,
    pub status: SchemeStatus,
    pub start_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Scheme> for SchemeDto {
    fn from(scheme: Scheme) -> Self {
        Self {
            scheme_id: scheme.scheme_id.0,
            name: scheme.name,
            subscription_amount: scheme.subscription_amount.minor_units(),
            cycle: scheme.cycle,
            duration_periods: scheme.duration_periods,
            number_of_winners: scheme.number_of_winners,
            status: scheme.status,
            start_date: scheme.start_date,
            end_date: scheme.end_date,
            created_at: scheme.created_at,
        }
    }
}

// ============================================
// Card DTOs
// ============================================

/// Request to issue a card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueCardRequest {
    pub user_id: String,
    pub scheme_id: String,
    pub holder_name: String,
    pub holder_phone: String,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer_card_id: Option<String>,
}

/// Request for an admin card status override
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetCardStatusRequest {
    pub status: CardStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Request for a KYC verdict
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetKycRequest {
    pub kyc_status: KycStatus,
}

/// Card representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDto {
    pub card_id: String,
    pub user_id: String,
    pub scheme_id: String,
    pub holder_name: String,
    pub holder_phone: String,
    pub payment_method: PaymentMethod,
    pub status: CardStatus,
    pub kyc_status: KycStatus,
    pub payment_status: PaymentStatus,
    pub wallet_balance: i64,
    pub commission_balance: i64,
    pub total_payments_made: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer_l1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer_l2: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Card> for CardDto {
    fn from(card: Card) -> Self {
        Self {
            card_id: card.card_id.0,
            user_id: card.user_id.0,
            scheme_id: card.scheme_id.0,
            holder_name: card.holder_name,
            holder_phone: card.holder_phone,
            payment_method: card.payment_method,
            status: card.status,
            kyc_status: card.kyc_status,
            payment_status: card.payment_status,
            wallet_balance: card.wallet_balance.minor_units(),
            commission_balance: card.commission_balance.minor_units(),
            total_payments_made: card.total_payments_made,
            referrer_l1: card.referrer_l1.map(|u| u.0),
            referrer_l2: card.referrer_l2.map(|u| u.0),
            created_at: card.created_at,
        }
    }
}

// ============================================
// Payment DTOs
// ============================================

/// Direct API payment submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    pub card_id: String,
    pub period_index: u32,
    /// Minor units; must equal the scheme subscription amount
    pub amount: i64,
    pub method: PaymentMethod,
}

/// Gateway callback payload (at-least-once delivery)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentWebhookRequest {
    pub card_id: String,
    pub period_index: u32,
    pub amount: i64,
    pub method: PaymentMethod,
    pub outcome: PaymentRecordStatus,
}

/// Request to start a payment through the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitiatePaymentRequest {
    pub period_index: u32,
}

/// Payment record representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecordDto {
    pub payment_id: String,
    pub card_id: String,
    pub scheme_id: String,
    pub period_index: u32,
    pub amount: i64,
    pub method: PaymentMethod,
    pub status: PaymentRecordStatus,
    pub completed_at: DateTime<Utc>,
}

impl From<PaymentRecord> for PaymentRecordDto {
    fn from(record: PaymentRecord) -> Self {
        Self {
            payment_id: record.payment_id.0,
            card_id: record.card_id.0,
            scheme_id: record.scheme_id.0,
            period_index: record.period_index,
            amount: record.amount.minor_units(),
            method: record.method,
            status: record.status,
            completed_at: record.completed_at,
        }
    }
}

/// Completed periods of a card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedPeriodsResponse {
    pub card_id: String,
    pub periods: Vec<u32>,
}

/// Downline report query
#[derive(Debug, Clone, Deserialize)]
pub struct DownlineQuery {
    pub period: u32,
}

// ============================================
// Winner DTOs
// ============================================

/// Admin winner selection batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectWinnersRequest {
    pub card_ids: Vec<String>,
}

/// Request to progress a winner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetWinnerStatusRequest {
    pub status: WinnerStatus,
}

/// Winner representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinnerDto {
    pub winner_id: String,
    pub scheme_id: String,
    pub card_id: String,
    pub rank: u32,
    pub status: WinnerStatus,
    pub won_at: DateTime<Utc>,
}

impl From<Winner> for WinnerDto {
    fn from(winner: Winner) -> Self {
        Self {
            winner_id: winner.winner_id.0,
            scheme_id: winner.scheme_id.0,
            card_id: winner.card_id.0,
            rank: winner.rank,
            status: winner.status,
            won_at: winner.won_at,
        }
    }
}

/// The ordered eligible set for a draw
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibleCardsResponse {
    pub scheme_id: String,
    pub card_ids: Vec<String>,
}

// ============================================
// Commission DTOs
// ============================================

/// Commission entry representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionEntryDto {
    pub entry_id: String,
    pub beneficiary: String,
    pub source_payment: String,
    pub level: CommissionLevel,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

impl From<CommissionEntry> for CommissionEntryDto {
    fn from(entry: CommissionEntry) -> Self {
        Self {
            entry_id: entry.entry_id.0,
            beneficiary: entry.beneficiary.0,
            source_payment: entry.source_payment.0,
            level: entry.level,
            amount: entry.amount.minor_units(),
            created_at: entry.created_at,
        }
    }
}

// ============================================
// Service DTOs
// ============================================

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Service statistics response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub requests_served: u64,
    pub schemes: usize,
    pub cards: usize,
    pub payments: usize,
    pub commissions: usize,
    pub winners: usize,
}
