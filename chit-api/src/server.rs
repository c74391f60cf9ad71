//! API Server setup

use axum::Router;
use chit_core::logging::LogLevel;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::routes::build_app;
use crate::state::AppState;

/// Initialise the tracing subscriber from the configured log level.
///
/// `RUST_LOG` takes precedence when set.
pub fn init_tracing(level: LogLevel) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Create the API server
pub fn create_server(
    state: AppState,
) -> Result<(Router, SocketAddr), Box<dyn std::error::Error + Send + Sync>> {
    let addr: SocketAddr = state.config.listen_addr.parse()?;
    let router = build_app(state);
    Ok((router, addr))
}

/// Run the API server
pub async fn run_server(state: AppState) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let service_name = state.config.service_name.clone();
    let (router, addr) = create_server(state)?;

    tracing::info!(service = %service_name, %addr, "API server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Start server in background (for testing)
pub async fn start_background_server(
    state: AppState,
) -> Result<SocketAddr, Box<dyn std::error::Error + Send + Sync>> {
    let (router, addr) = create_server(state)?;

    // Bind to get actual address (useful when port is 0)
    let listener = TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!(error = %e, "Server error");
        }
    });

    Ok(actual_addr)
}
