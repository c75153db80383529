use courtside::api::{self, app_state::AppState};
use courtside::config::loader::ConfigLoader;
use courtside::observability::{
    EngineMetrics, ObservabilityState, create_observability_router, init_tracing,
};
use courtside::services::create_understanding_service;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load()?;
    ConfigLoader::validate(&config)?;

    let _log_guard = init_tracing(&config.logging);
    info!("Starting {} ({})...", config.app_name, config.environment);

    let metrics = Arc::new(EngineMetrics::new()?);
    let understanding = create_understanding_service(&config, metrics.clone())?;
    info!("Query understanding service initialized");

    let observability_state = Arc::new(
        ObservabilityState::new(env!("CARGO_PKG_VERSION").to_string(), metrics)
            .with_dependency(understanding.clone()),
    );
    let cache_check = understanding.health_check().await;
    if !cache_check.healthy {
        warn!("Classification cache not reachable: {}", cache_check.message);
    }

    let app_state = AppState::new(understanding, config.classifier.max_query_length);
    let router = create_observability_router(observability_state).merge(api::create_router(app_state));
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
