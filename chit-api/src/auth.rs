//! Authentication
//!
//! API Key and Bearer Token authentication for the admin surface.
//!
//! # Authentication Methods
//!
//! ## API Key (Header)
//! ```text
//! X-API-Key: your-api-key-here
//! ```
//!
//! ## Bearer Token
//! ```text
//! Authorization: Bearer your-token-here
//! ```
//!
//! # Configuration
//!
//! - `CHIT_AUTH_ENABLED`: enable/disable authentication (default: false)
//! - `CHIT_API_KEYS`: comma-separated API keys
//! - `CHIT_BEARER_TOKENS`: comma-separated bearer tokens

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Whether authentication is enabled
    pub enabled: bool,
    /// API keys (multiple keys supported)
    pub api_keys: Vec<String>,
    /// Bearer tokens (optional)
    pub bearer_tokens: Vec<String>,
    /// Paths that don't require authentication
    pub public_paths: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_keys: Vec::new(),
            bearer_tokens: Vec::new(),
            public_paths: vec![
                "/".to_string(),
                "/healthz".to_string(),
                "/api/v1/health".to_string(),
            ],
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let enabled = std::env::var("CHIT_AUTH_ENABLED")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);

        let api_keys: Vec<String> = std::env::var("CHIT_API_KEYS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_default();

        let bearer_tokens: Vec<String> = std::env::var("CHIT_BEARER_TOKENS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_default();

        Self {
            enabled,
            api_keys,
            bearer_tokens,
            ..Default::default()
        }
    }

    /// Check if a path is public (doesn't require authentication)
    pub fn is_public_path(&self, path: &str) -> bool {
        self.public_paths.iter().any(|p| path == p)
    }

    /// Validate an API key
    pub fn validate_api_key(&self, key: &str) -> bool {
        self.api_keys.iter().any(|k| k == key)
    }

    /// Validate a bearer token
    pub fn validate_bearer_token(&self, token: &str) -> bool {
        self.bearer_tokens.iter().any(|t| t == token)
    }
}

/// Authentication error response
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthErrorResponse {
    pub code: String,
    pub message: String,
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(AuthErrorResponse {
            code: "unauthorized".to_string(),
            message: message.to_string(),
        }),
    )
        .into_response()
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let auth = &state.auth_config;
    if !auth.enabled || auth.is_public_path(request.uri().path()) {
        return next.run(request).await;
    }

    if let Some(key) = request
        .headers()
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
    {
        if auth.validate_api_key(key) {
            return next.run(request).await;
        }
        return unauthorized("Invalid API key");
    }

    if let Some(token) = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        if auth.validate_bearer_token(token) {
            return next.run(request).await;
        }
        return unauthorized("Invalid bearer token");
    }

    unauthorized("Missing credentials")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_by_default() {
        let config = AuthConfig::default();
        assert!(!config.enabled);
        assert!(config.is_public_path("/healthz"));
        assert!(!config.is_public_path("/api/v1/cards"));
    }

    #[test]
    fn test_key_validation() {
        let config = AuthConfig {
            enabled: true,
            api_keys: vec!["key-a".to_string(), "key-b".to_string()],
            ..Default::default()
        };
        assert!(config.validate_api_key("key-b"));
        assert!(!config.validate_api_key("key-c"));
    }
}
