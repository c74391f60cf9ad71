//! API Routes
//!
//! Route definitions for the chit-api service.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::auth_middleware;
use crate::handlers::*;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let enable_cors = state.config.enable_cors;
    let auth_enabled = state.auth_config.enabled;

    let mut router = Router::new()
        // Health and status
        .route("/health", get(health_check))
        .route("/stats", get(get_stats))
        // Scheme endpoints
        .route("/schemes", post(create_scheme).get(list_schemes))
        .route("/schemes/:scheme_id", get(get_scheme))
        .route("/schemes/:scheme_id/status", post(set_scheme_status))
        .route("/schemes/:scheme_id/dashboard", get(scheme_dashboard))
        .route("/schemes/:scheme_id/eligible", get(list_eligible_cards))
        .route("/schemes/:scheme_id/winners", post(select_winners).get(list_winners))
        // Card endpoints
        .route("/cards", post(issue_card))
        .route("/cards/:card_id", get(get_card))
        .route("/cards/:card_id/status", post(set_card_status))
        .route("/cards/:card_id/kyc", post(set_card_kyc))
        .route("/cards/:card_id/periods", get(get_completed_periods))
        .route("/cards/:card_id/payments", get(get_card_payments))
        .route("/cards/:card_id/payments/initiate", post(initiate_payment))
        // Payment endpoints
        .route("/payments", post(record_payment))
        .route("/payments/webhook", post(payment_webhook))
        // User endpoints
        .route("/users/:user_id/dashboard", get(user_dashboard))
        .route("/users/:user_id/cards", get(user_cards))
        .route("/users/:user_id/commissions", get(user_commissions))
        .route("/users/:user_id/downline/:scheme_id", get(user_downline))
        // Winner endpoints
        .route("/winners/:winner_id/status", post(set_winner_status))
        .with_state(state.clone());

    // Add authentication middleware (if enabled)
    if auth_enabled {
        router = router.layer(middleware::from_fn_with_state(state, auth_middleware));
    }

    // Add CORS middleware
    if enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router = router.layer(TraceLayer::new_for_http());

    router
}

/// Create a router for the V1 API with /api/v1 prefix
pub fn create_v1_router(state: Arc<AppState>) -> Router {
    Router::new().nest("/api/v1", create_router(state))
}

/// Build the full application router
pub fn build_app(state: AppState) -> Router {
    let state = Arc::new(state);

    let root_router = Router::new().route("/", get(|| async { "Chit API Service" }));

    let health_router = Router::new()
        .route("/healthz", get(health_check))
        .with_state(state.clone());

    root_router
        .merge(health_router)
        .merge(create_v1_router(state))
}
