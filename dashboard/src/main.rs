use shift_desk::{build_router, config::Config, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shift_desk=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    tracing::info!(
        api_base_url = %config.api_base_url,
        time_zone = %config.time_zone,
        working_hours_start = %config.working_hours.start.format("%H:%M"),
        working_hours_end = %config.working_hours.end.format("%H:%M"),
        "Loaded configuration from environment/.env"
    );
    if config.api_base_url.is_empty() {
        tracing::warn!("API_FETCH_URL is not set; every manager lookup will fail");
    }

    let addr = config.bind_addr;
    let app = build_router(AppState::from_config(config)?);

    // Start server
    tracing::info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
