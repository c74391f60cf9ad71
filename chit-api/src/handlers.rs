//! API Handlers
//!
//! HTTP handler implementations for the chit-api endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chit_core::types::{
    CardId, Money, PaymentRecordStatus, PaymentSource, SchemeId, UserId, WinnerId,
};
use chit_db::{DownlinePayment, IssueCard, NewScheme};
use std::sync::Arc;

use crate::dto::*;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// ============================================
// Health and stats
// ============================================

/// Health check handler
pub async fn health_check(State(state): State<Arc<AppState>>) -> ApiResult<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.config.version.clone(),
        uptime_secs: state.uptime_secs(),
    }))
}

/// Service statistics
pub async fn get_stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<StatsResponse>> {
    let stats = state.db.datastore().stats().await;
    Ok(Json(StatsResponse {
        requests_served: state.request_count().await,
        schemes: stats.schemes,
        cards: stats.cards,
        payments: stats.payments,
        commissions: stats.commissions,
        winners: stats.winners,
    }))
}

// ============================================
// Scheme endpoints
// ============================================

/// Create a scheme (draft)
pub async fn create_scheme(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateSchemeRequest>,
) -> ApiResult<Json<SchemeDto>> {
    state.increment_requests().await;

    let scheme = state
        .db
        .schemes
        .create(NewScheme {
            name: request.name,
            subscription_amount: Money::from_minor(request.subscription_amount),
            cycle: request.cycle,
            duration_periods: request.duration_periods,
            number_of_winners: request.number_of_winners,
            start_date: request.start_date,
            commission_rates: request.commission_rates.map(Into::into),
        })
        .await?;

    Ok(Json(scheme.into()))
}

/// List schemes
pub async fn list_schemes(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<SchemeDto>>> {
    state.increment_requests().await;
    let schemes = state.db.schemes.list().await;
    Ok(Json(schemes.into_iter().map(Into::into).collect()))
}

/// Fetch one scheme
pub async fn get_scheme(
    State(state): State<Arc<AppState>>,
    Path(scheme_id): Path<String>,
) -> ApiResult<Json<SchemeDto>> {
    state.increment_requests().await;
    let scheme = state.db.schemes.get(&SchemeId::new(scheme_id)).await?;
    Ok(Json(scheme.into()))
}

/// Move a scheme along its lifecycle
pub async fn set_scheme_status(
    State(state): State<Arc<AppState>>,
    Path(scheme_id): Path<String>,
    Json(request): Json<SetSchemeStatusRequest>,
) -> ApiResult<Json<SchemeDto>> {
    state.increment_requests().await;
    let scheme = state
        .db
        .schemes
        .set_status(&SchemeId::new(scheme_id), request.status)
        .await?;
    Ok(Json(scheme.into()))
}

/// Admin dashboard rollup for one scheme
pub async fn scheme_dashboard(
    State(state): State<Arc<AppState>>,
    Path(scheme_id): Path<String>,
) -> ApiResult<Json<chit_db::SchemeDashboard>> {
    state.increment_requests().await;
    let dashboard = state
        .db
        .reports
        .scheme_dashboard(&SchemeId::new(scheme_id))
        .await?;
    Ok(Json(dashboard))
}

// ============================================
// Card endpoints
// ============================================

/// Issue a card against an active scheme
pub async fn issue_card(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IssueCardRequest>,
) -> ApiResult<Json<CardDto>> {
    state.increment_requests().await;

    let card = state
        .db
        .cards
        .issue_card(IssueCard {
            user_id: UserId::new(request.user_id),
            scheme_id: SchemeId::new(request.scheme_id),
            holder_name: request.holder_name,
            holder_phone: request.holder_phone,
            payment_method: request.payment_method,
            referrer_card_id: request.referrer_card_id.map(CardId::new),
        })
        .await?;

    Ok(Json(card.into()))
}

/// Fetch one card
pub async fn get_card(
    State(state): State<Arc<AppState>>,
    Path(card_id): Path<String>,
) -> ApiResult<Json<CardDto>> {
    state.increment_requests().await;
    let card = state.db.cards.get(&CardId::new(card_id)).await?;
    Ok(Json(card.into()))
}

/// Admin card status override
pub async fn set_card_status(
    State(state): State<Arc<AppState>>,
    Path(card_id): Path<String>,
    Json(request): Json<SetCardStatusRequest>,
) -> ApiResult<Json<CardDto>> {
    state.increment_requests().await;
    let card = state
        .db
        .cards
        .set_status(&CardId::new(card_id), request.status, request.reason)
        .await?;
    Ok(Json(card.into()))
}

/// KYC verdict
pub async fn set_card_kyc(
    State(state): State<Arc<AppState>>,
    Path(card_id): Path<String>,
    Json(request): Json<SetKycRequest>,
) -> ApiResult<Json<CardDto>> {
    state.increment_requests().await;
    let card = state
        .db
        .cards
        .set_kyc(&CardId::new(card_id), request.kyc_status)
        .await?;
    Ok(Json(card.into()))
}

/// Completed periods of a card
pub async fn get_completed_periods(
    State(state): State<Arc<AppState>>,
    Path(card_id): Path<String>,
) -> ApiResult<Json<CompletedPeriodsResponse>> {
    state.increment_requests().await;
    let card_id = CardId::new(card_id);
    let periods = state.db.payments.completed_periods(&card_id).await?;
    Ok(Json(CompletedPeriodsResponse {
        card_id: card_id.0,
        periods: periods.into_iter().collect(),
    }))
}

/// Payment history of a card, most recent first
pub async fn get_card_payments(
    State(state): State<Arc<AppState>>,
    Path(card_id): Path<String>,
) -> ApiResult<Json<Vec<PaymentRecordDto>>> {
    state.increment_requests().await;
    let records = state.db.payments.history(&CardId::new(card_id)).await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// Start a payment through the gateway; completion arrives via the webhook
pub async fn initiate_payment(
    State(state): State<Arc<AppState>>,
    Path(card_id): Path<String>,
    Json(request): Json<InitiatePaymentRequest>,
) -> ApiResult<Json<chit_core::gateway::PaymentInitiation>> {
    state.increment_requests().await;
    let initiation = state
        .db
        .payments
        .initiate_payment(
            state.gateway.as_ref(),
            &CardId::new(card_id),
            request.period_index,
        )
        .await?;
    Ok(Json(initiation))
}

// ============================================
// Payment endpoints
// ============================================

/// Direct API payment submission; a double submit raises
pub async fn record_payment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecordPaymentRequest>,
) -> ApiResult<Json<PaymentRecordDto>> {
    state.increment_requests().await;
    let record = state
        .db
        .payments
        .record_payment(
            &CardId::new(request.card_id),
            request.period_index,
            Money::from_minor(request.amount),
            request.method,
            PaymentSource::DirectApi,
        )
        .await?;
    Ok(Json(record.into()))
}

/// Gateway callback; replays return the existing record
pub async fn payment_webhook(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PaymentWebhookRequest>,
) -> ApiResult<Json<PaymentRecordDto>> {
    state.increment_requests().await;
    let card_id = CardId::new(request.card_id);
    let record = match request.outcome {
        PaymentRecordStatus::Completed => {
            state
                .db
                .payments
                .record_payment(
                    &card_id,
                    request.period_index,
                    Money::from_minor(request.amount),
                    request.method,
                    PaymentSource::GatewayCallback,
                )
                .await?
        }
        PaymentRecordStatus::Failed => {
            state
                .db
                .payments
                .record_failure(&card_id, request.period_index, request.method)
                .await?
        }
    };
    Ok(Json(record.into()))
}

// ============================================
// User endpoints
// ============================================

/// Member dashboard rollup
pub async fn user_dashboard(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<chit_db::UserDashboard>> {
    state.increment_requests().await;
    let dashboard = state.db.reports.user_dashboard(&UserId::new(user_id)).await;
    Ok(Json(dashboard))
}

/// All cards of a user
pub async fn user_cards(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<CardDto>>> {
    state.increment_requests().await;
    let cards = state.db.cards.for_user(&UserId::new(user_id)).await;
    Ok(Json(cards.into_iter().map(Into::into).collect()))
}

/// A user's commission history
pub async fn user_commissions(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<CommissionEntryDto>>> {
    state.increment_requests().await;
    let entries = state
        .db
        .reports
        .commission_history(&UserId::new(user_id))
        .await;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// Downline payment report for one scheme period
pub async fn user_downline(
    State(state): State<Arc<AppState>>,
    Path((user_id, scheme_id)): Path<(String, String)>,
    Query(query): Query<DownlineQuery>,
) -> ApiResult<Json<Vec<DownlinePayment>>> {
    state.increment_requests().await;
    if query.period == 0 {
        return Err(ApiError::validation("period must be at least 1"));
    }
    let report = state
        .db
        .payments
        .list_downline_payments(
            &UserId::new(user_id),
            &SchemeId::new(scheme_id),
            query.period,
        )
        .await?;
    Ok(Json(report))
}

// ============================================
// Winner endpoints
// ============================================

/// The ordered eligible set for a scheme's draw
pub async fn list_eligible_cards(
    State(state): State<Arc<AppState>>,
    Path(scheme_id): Path<String>,
) -> ApiResult<Json<EligibleCardsResponse>> {
    state.increment_requests().await;
    let scheme_id = SchemeId::new(scheme_id);
    let eligible = state.db.winners.list_eligible(&scheme_id).await?;
    Ok(Json(EligibleCardsResponse {
        scheme_id: scheme_id.0,
        card_ids: eligible.into_iter().map(|c| c.0).collect(),
    }))
}

/// Record an admin-selected winner batch
pub async fn select_winners(
    State(state): State<Arc<AppState>>,
    Path(scheme_id): Path<String>,
    Json(request): Json<SelectWinnersRequest>,
) -> ApiResult<Json<Vec<WinnerDto>>> {
    state.increment_requests().await;
    let created = state
        .db
        .winners
        .select_winners(
            &SchemeId::new(scheme_id),
            request.card_ids.into_iter().map(CardId::new).collect(),
        )
        .await?;
    Ok(Json(created.into_iter().map(Into::into).collect()))
}

/// All winner rows of a scheme
pub async fn list_winners(
    State(state): State<Arc<AppState>>,
    Path(scheme_id): Path<String>,
) -> ApiResult<Json<Vec<WinnerDto>>> {
    state.increment_requests().await;
    let winners = state.db.winners.for_scheme(&SchemeId::new(scheme_id)).await?;
    Ok(Json(winners.into_iter().map(Into::into).collect()))
}

/// Progress a winner along its lifecycle
pub async fn set_winner_status(
    State(state): State<Arc<AppState>>,
    Path(winner_id): Path<String>,
    Json(request): Json<SetWinnerStatusRequest>,
) -> ApiResult<Json<WinnerDto>> {
    state.increment_requests().await;
    let winner = state
        .db
        .winners
        .set_status(&WinnerId::new(winner_id), request.status)
        .await?;
    Ok(Json(winner.into()))
}
