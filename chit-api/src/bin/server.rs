//! chit-server: run the HTTP API

use chit_api::{init_tracing, run_server, ApiConfig, AppState, AuthConfig};
use chit_core::config::EngineConfig;
use chit_db::ChitDatabase;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = ApiConfig::from_env();
    init_tracing(config.log_level);

    let engine_config = EngineConfig::from_env()?;
    let db = ChitDatabase::new(engine_config);
    let state = AppState::with_config(config, db).with_auth(AuthConfig::from_env());

    run_server(state).await
}
