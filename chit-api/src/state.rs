//! Application State
//!
//! Shared state for the API service.

use chit_core::gateway::PaymentGateway;
use chit_core::logging::LogLevel;
use chit_db::ChitDatabase;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::auth::AuthConfig;
use crate::gateway::StaticRedirectGateway;

/// Application configuration
///
/// Environment variables:
/// - `CHIT_LISTEN_ADDR`: listen address (default `0.0.0.0:3000`)
/// - `CHIT_ENABLE_CORS`: enable CORS (default true)
/// - `CHIT_LOG_LEVEL`: log level (default `info`)
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Service name
    pub service_name: String,
    /// Service version
    pub version: String,
    /// Listen address
    pub listen_addr: String,
    /// Enable CORS
    pub enable_cors: bool,
    /// Log level
    pub log_level: LogLevel,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            service_name: "chit-api".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            listen_addr: "0.0.0.0:3000".to_string(),
            enable_cors: true,
            log_level: LogLevel::default(),
        }
    }
}

impl ApiConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(addr) = std::env::var("CHIT_LISTEN_ADDR") {
            config.listen_addr = addr;
        }
        config.enable_cors = std::env::var("CHIT_ENABLE_CORS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);
        if let Some(level) = std::env::var("CHIT_LOG_LEVEL")
            .ok()
            .and_then(|v| LogLevel::parse(&v))
        {
            config.log_level = level;
        }
        config
    }
}

/// Application state shared across handlers
pub struct AppState {
    /// Configuration
    pub config: ApiConfig,
    /// Authentication configuration
    pub auth_config: AuthConfig,
    /// Database facade (datastore + services)
    pub db: ChitDatabase,
    /// Payment gateway collaborator
    pub gateway: Arc<dyn PaymentGateway>,
    /// Service start time
    pub started_at: DateTime<Utc>,
    /// Request counter
    request_counter: RwLock<u64>,
}

impl AppState {
    /// Create new application state with default config
    pub fn new(db: ChitDatabase) -> Self {
        Self::with_config(ApiConfig::default(), db)
    }

    /// Create with configuration
    pub fn with_config(config: ApiConfig, db: ChitDatabase) -> Self {
        Self {
            config,
            auth_config: AuthConfig::default(),
            db,
            gateway: Arc::new(StaticRedirectGateway::default()),
            started_at: Utc::now(),
            request_counter: RwLock::new(0),
        }
    }

    /// Swap in a different gateway implementation
    pub fn with_gateway(mut self, gateway: Arc<dyn PaymentGateway>) -> Self {
        self.gateway = gateway;
        self
    }

    /// Swap in an authentication configuration
    pub fn with_auth(mut self, auth_config: AuthConfig) -> Self {
        self.auth_config = auth_config;
        self
    }

    /// Count one served request
    pub async fn increment_requests(&self) {
        let mut counter = self.request_counter.write().await;
        *counter += 1;
    }

    /// Requests served so far
    pub async fn request_count(&self) -> u64 {
        *self.request_counter.read().await
    }

    /// Seconds since the service started
    pub fn uptime_secs(&self) -> u64 {
        (Utc::now() - self.started_at).num_seconds().max(0) as u64
    }
}
