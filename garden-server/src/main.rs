use std::process::ExitCode;

use garden_server::config::GardenConfig;
use garden_server::web::{AppState, create_router};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("garden_server=info,tower_http=info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("garden server failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = GardenConfig::from_env()?;

    if config.api_key.is_empty() {
        warn!("WEATHER_API_KEY not set. Weather lookups will fail.");
    }

    // Adopts fresh location_cache.json / weather_cache.json if present
    let state = AppState::from_config(&config)?;
    if let Some(location) = state.location.current().await {
        info!(city = %location.city, "using cached location");
    }

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Garden server listening on http://{}", config.bind_addr);
    info!("API Endpoints:");
    info!("  GET  /health         - Health check");
    info!("  GET  /api/location   - Caller location (?refresh=true to refetch)");
    info!("  GET  /api/weather    - Current weather at caller location");
    info!("  GET  /api/watering   - Should the garden be watered?");

    axum::serve(listener, app).await?;
    Ok(())
}
