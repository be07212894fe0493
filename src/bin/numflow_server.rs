//! numflow server
//!
//! Serves `GET /numbers/{p|f|e|r}`: fetches numbers from the selected
//! upstream source, folds them into the process-wide sliding window and
//! returns the before/after snapshots with the current average.
//!
//! Usage:
//!   cargo run --release --bin numflow_server
//!
//! Environment variables:
//!   NUMFLOW_BIND_ADDR - Listen address (default: 0.0.0.0:9876)
//!   WINDOW_SIZE - Window capacity (default: 10)
//!   UPSTREAM_TIMEOUT_MS - Fetch budget per request (default: 500)
//!   UPSTREAM_MAX_RETRIES - Extra upstream attempts (default: 1)
//!   RUST_LOG - Logging level (default: info)

use dotenv::dotenv;
use log::{error, info};
use numflow::{
    config::ServiceConfig,
    fetcher::{HttpNumberFetcher, NumberFetcher, NumberSource},
    server::{run_server, shutdown_on, AppState},
    window::WindowStore,
};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = ServiceConfig::from_env();

    info!("🚀 Starting numflow...");
    info!("📊 Configuration:");
    info!("   ├─ Bind address: {}", config.bind_addr);
    info!("   ├─ Window size: {}", config.window_size);
    info!(
        "   ├─ Upstream budget: {}ms ({} retries, backoff {}-{}ms)",
        config.upstream_timeout_ms,
        config.upstream_max_retries,
        config.upstream_backoff_ms,
        config.upstream_backoff_max_ms
    );
    info!("   ├─ Upstream limit: {}", config.upstream_limit);
    for source in NumberSource::all() {
        info!("   ├─ {} ({}): {}", source.as_str(), source.label(), config.url_template(source));
    }
    info!("   └─ Log level: {}", std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()));

    let fetcher: Arc<dyn NumberFetcher> = Arc::new(HttpNumberFetcher::from_config(&config)?);
    let store = WindowStore::new(config.window_size);
    let state = AppState::new(
        store,
        fetcher,
        Duration::from_millis(config.upstream_timeout_ms),
    );

    info!("🔄 Press CTRL+C to shutdown gracefully");

    let shutdown = shutdown_on(tokio::signal::ctrl_c());

    if let Err(e) = run_server(state, &config.bind_addr, shutdown).await {
        error!("❌ Server failed: {}", e);
        return Err(e.into());
    }

    info!("✅ numflow stopped");
    Ok(())
}
