/// Main application entry point
use rust_launches::clients::SpaceXClient;
use rust_launches::config::AppConfig;
use rust_launches::handlers::AppState;
use rust_launches::routes::build_router;
use rust_launches::services::LaunchService;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    info!(
        "Configuration loaded (source: {}, page size: {}, analytics cap: {})",
        config.spacex_api_url, config.page_size, config.analytics_cap
    );

    // Initialize client and service
    let spacex_client = SpaceXClient::new(config.spacex_api_url.clone(), config.http_timeout)?;
    let launch_service = Arc::new(LaunchService::new(
        Arc::new(spacex_client),
        config.page_size,
        config.analytics_cap,
    ));

    let state = AppState { launch_service };

    // Build router
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.bind_addr.as_str()).await?;
    info!("rust_launches service listening on {}", config.bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
