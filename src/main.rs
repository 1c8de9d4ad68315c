// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use crate::application::scheduler::RefreshScheduler;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::logging::init_tracing;
use crate::infrastructure::mock_source::MockCampaignSource;
use crate::infrastructure::random::StdRandomSource;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let app_config = load_app_config()?;

    // Initialize tracing
    init_tracing(&app_config.logging);

    // Create data source (infrastructure layer)
    let source = Arc::new(MockCampaignSource::new(
        app_config.profile.clone(),
        app_config.source.latency.clone(),
        Box::new(StdRandomSource::from_seed(app_config.source.seed)),
    ));

    // Create scheduler (application layer)
    let scheduler = Arc::new(
        RefreshScheduler::initialize(
            source,
            app_config.refresh.cadence(),
            app_config.source.max_revenue_points,
        )
        .await?,
    );
    scheduler.set_live_mode(app_config.refresh.live_on_start);

    // Build router (presentation layer)
    let state = Arc::new(AppState {
        scheduler: scheduler.clone(),
    });
    let router = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind((
        app_config.server.host.as_str(),
        app_config.server.port,
    ))
    .await?;
    tracing::info!(addr = %listener.local_addr()?, "Starting campaign-dashboard service");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(scheduler.clone()))
        .await?;

    scheduler.dispose();
    Ok(())
}

/// Wait for Ctrl-C, then dispose the scheduler so open streams finish
async fn shutdown_signal(scheduler: Arc<RefreshScheduler>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }

    tracing::info!("Shutdown requested");
    scheduler.dispose();
}
