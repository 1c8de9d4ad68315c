// HTTP request handlers
use crate::infrastructure::chunked_json::stream_from_watch;
use crate::infrastructure::http_response::json_response;
use crate::presentation::app_state::AppState;
use axum::{
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct LiveModeBody {
    pub enabled: bool,
}

/// Check if client accepts Brotli compression
fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get("accept-encoding")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.contains("br"))
        .unwrap_or(false)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current dashboard snapshot
pub async fn get_snapshot(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let snapshot = state.scheduler.current_snapshot();

    match json_response(&snapshot, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Totals over the current revenue series
pub async fn get_totals(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let totals = state.scheduler.current_snapshot().totals();

    match json_response(&totals, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

pub async fn get_live_mode(State(state): State<Arc<AppState>>) -> Json<LiveModeBody> {
    Json(LiveModeBody {
        enabled: state.scheduler.is_live(),
    })
}

/// Toggle live mode; responds with the resulting state
pub async fn set_live_mode(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LiveModeBody>,
) -> Json<LiveModeBody> {
    state.scheduler.set_live_mode(body.enabled);

    Json(LiveModeBody {
        enabled: state.scheduler.is_live(),
    })
}

/// Stream snapshots as they are published (progressive updates)
pub async fn stream_snapshots(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let rx = state.scheduler.subscribe();
    let closed = state.scheduler.disposed();
    stream_from_watch(rx, closed, accepts_brotli(&headers)).await
}
