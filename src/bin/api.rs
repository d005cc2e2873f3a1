//! Noteboard Development API Server
//!
//! Run with: cargo run --bin noteboard-api
//!
//! # Configuration
//!
//! Read from the default config locations, then environment variables:
//! - `NOTEBOARD_HOST`: Host to bind to (default: 0.0.0.0)
//! - `NOTEBOARD_PORT`: Port to listen on (default: 3000)
//! - `NOTEBOARD_SEED_NOTES`: Store sample notes at startup when set to `true`
//! - `RUST_LOG`: Log filter (default: noteboard=info,tower_http=debug)

use anyhow::Context;
use noteboard::config::Config;
use noteboard::server::{serve, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = Config::load_default();
    if let Ok(seed) = std::env::var("NOTEBOARD_SEED_NOTES") {
        config.server.seed_notes = seed == "true" || seed == "1";
    }

    noteboard::logging::init(&config.logging, "noteboard=info,tower_http=debug");

    tracing::info!("Starting Noteboard API server v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::new();
    if config.server.seed_notes {
        state.seed_notes().await;
    }

    serve(state, &config.server)
        .await
        .with_context(|| format!("API server on {} failed", config.server.addr()))?;

    Ok(())
}
