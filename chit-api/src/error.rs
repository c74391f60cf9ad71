//! API Error Types
//!
//! Maps the domain error taxonomy onto HTTP. Every domain error is a
//! caller error (4xx); the stable machine-readable kind travels in the
//! response body alongside the human message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chit_core::error::ChitError;
use serde::Serialize;
use thiserror::Error;

/// API-specific errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed request (bad DTO, unparseable field)
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    /// Unauthorized access
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    /// Internal error
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// Domain error
    #[error(transparent)]
    Core(#[from] ChitError),
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    /// Stable machine-readable kind
    pub code: String,
    /// Human message
    pub message: String,
    /// Optional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::ValidationError {
            message: message.into(),
        }
    }

    /// Create an unauthorized error
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        ApiError::Unauthorized {
            reason: reason.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal {
            message: message.into(),
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Core(err) => match err.kind() {
                "not_found" | "referrer_not_found" => StatusCode::NOT_FOUND,
                "duplicate_enrollment"
                | "period_already_paid"
                | "duplicate_winner"
                | "invalid_transition"
                | "invalid_scheme_transition"
                | "invalid_winner_transition"
                | "invalid_state" => StatusCode::CONFLICT,
                "invalid_scheme"
                | "period_out_of_range"
                | "amount_mismatch"
                | "not_eligible"
                | "too_many_winners"
                | "reason_required"
                | "invalid_amount" => StatusCode::UNPROCESSABLE_ENTITY,
                "serialization_error" => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Get the stable error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::ValidationError { .. } => "validation_error",
            ApiError::Unauthorized { .. } => "unauthorized",
            ApiError::Internal { .. } => "internal_error",
            ApiError::Core(err) => err.kind(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: None,
        };

        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_are_caller_errors() {
        let err = ApiError::from(ChitError::PeriodAlreadyPaid {
            card_id: "card_1".to_string(),
            period_index: 1,
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), "period_already_paid");

        let err = ApiError::from(ChitError::TooManyWinners {
            requested: 2,
            remaining: 1,
        });
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let err = ApiError::from(ChitError::ReferrerNotFound {
            card_id: "card_x".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_error() {
        let err = ApiError::validation("bad period index");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "validation_error");
    }
}
