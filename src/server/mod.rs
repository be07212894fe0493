//! HTTP surface
//!
//! - `GET /numbers/{number_id}` - fetch, merge, return both snapshots and the average
//! - `GET /window` - current window without mutation
//! - `GET /health`
//!
//! The upstream fetch runs outside the window lock; only the merge holds it.

use crate::fetcher::{fetch_or_empty, NumberFetcher, NumberSource};
use crate::window::{MergeResult, WindowState, WindowStore};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InvalidNumberId(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidNumberId(id) => {
                log::warn!("Rejected invalid number ID {:?}", id);
                (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "detail": "Invalid number ID" })),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: WindowStore,
    pub fetcher: Arc<dyn NumberFetcher>,
    pub fetch_budget: Duration,
}

impl AppState {
    pub fn new(store: WindowStore, fetcher: Arc<dyn NumberFetcher>, fetch_budget: Duration) -> Self {
        Self {
            store,
            fetcher,
            fetch_budget,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/numbers/{number_id}", get(get_numbers))
        .route("/window", get(get_window))
        .route("/health", get(health))
        .with_state(state)
}

async fn get_numbers(
    State(state): State<AppState>,
    Path(number_id): Path<String>,
) -> Result<Json<MergeResult>, ApiError> {
    let source = NumberSource::from_id(&number_id)
        .ok_or_else(|| ApiError::InvalidNumberId(number_id.clone()))?;

    let outcome = fetch_or_empty(state.fetcher.as_ref(), source, state.fetch_budget).await;
    let upstream_failed = outcome.is_failure();

    let result = state.store.merge_and_snapshot(outcome.into_numbers());

    log::info!(
        "/numbers/{} → fetched {}, window {} → {}, avg {:.2}{}",
        source.as_str(),
        result.candidates.len(),
        result.before.len(),
        result.after.len(),
        result.avg,
        if upstream_failed { " (upstream failed)" } else { "" }
    );

    Ok(Json(result))
}

async fn get_window(State(state): State<AppState>) -> Json<WindowState> {
    Json(state.store.state())
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

/// Resolve once `signal` fires
///
/// If the signal cannot be listened for, the error is logged and this never
/// resolves, so the server keeps running instead of stopping at startup.
pub async fn shutdown_on<F>(signal: F)
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => log::info!("⚠️  Received shutdown signal, shutting down..."),
        Err(err) => {
            log::error!("❌ Failed to listen for shutdown signal: {}", err);
            std::future::pending::<()>().await;
        }
    }
}

/// Bind and serve until `shutdown` resolves
pub async fn run_server<F>(
    state: AppState,
    bind_addr: &str,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    log::info!("🚀 Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
