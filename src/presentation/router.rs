// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_live_mode, get_snapshot, get_totals, health_check, set_live_mode, stream_snapshots,
};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    // Responses are compressed by the handlers, so no CompressionLayer here
    Router::new()
        .route("/healthz", get(health_check))
        .route("/snapshot", get(get_snapshot))
        .route("/totals", get(get_totals))
        .route("/live", get(get_live_mode).put(set_live_mode))
        .route("/stream", get(stream_snapshots))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
