//! Chit API - HTTP Surface
//!
//! Exposes the platform's operation groups as a versioned HTTP API:
//!
//! | Area | Endpoints |
//! |------|-----------|
//! | Schemes | create, list, fetch, status, dashboard |
//! | Cards | issue, fetch, status, KYC, periods, payment history, initiate |
//! | Payments | direct record, gateway webhook |
//! | Users | dashboard, cards, commissions, downline report |
//! | Winners | eligible set, selection, lifecycle |
//!
//! Authentication (API key / bearer token) and CORS are configurable via
//! environment; all domain errors map to 4xx responses carrying a stable
//! machine-readable `code`.

pub mod auth;
pub mod dto;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use auth::AuthConfig;
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use gateway::StaticRedirectGateway;
pub use routes::{build_app, create_router, create_v1_router};
pub use server::{init_tracing, run_server, start_background_server};
pub use state::{ApiConfig, AppState};
