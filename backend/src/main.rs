//! Beach Finder - Backend Server
//!
//! Relays nearby-beach searches and serves scored, filterable beach conditions
//! for the normal and surfer views.

use beach_finder_backend::{create_app, AppState, Config, Sources};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "beach_server=debug,beach_finder_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Beach Finder Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!(
        max_pages = config.places.max_pages,
        page_delay_ms = config.places.page_delay_ms,
        concurrency = config.pipeline.enrichment_concurrency,
        "Search settings"
    );

    // Providers are built once and injected into the pipeline
    let sources = Sources::from_config(&config)?;
    let addr = config.socket_addr();
    let state = AppState::new(config, sources);

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
