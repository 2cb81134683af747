//! Beach Finder backend
//!
//! HTTP service that relays paginated nearby-beach searches and runs the beach
//! aggregation pipeline (places -> marine -> weather -> crowd -> score).

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use reqwest::Client;
use shared::{FilterEngine, ScoreEngine};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};

use external::{
    CrowdClient, CrowdSource, Geocoder, GeocodingClient, MarineClient, MarineSource, PlacesClient,
    PlacesSource, WeatherClient, WeatherSource,
};
use services::{AggregationPipeline, BeachEnricher, PlacesPager, SearchSession};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session: Arc<SearchSession>,
    pub pager: PlacesPager,
    pub weather: Arc<dyn WeatherSource>,
    pub geocoder: Arc<dyn Geocoder>,
}

/// Provider handles the pipeline and handlers are built from
#[derive(Clone)]
pub struct Sources {
    pub places: Arc<dyn PlacesSource>,
    pub marine: Arc<dyn MarineSource>,
    pub weather: Arc<dyn WeatherSource>,
    pub geocoder: Arc<dyn Geocoder>,
    pub crowd: Option<Arc<dyn CrowdSource>>,
}

impl Sources {
    /// HTTP clients for every configured provider
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        if config.places.api_key.trim().is_empty() {
            tracing::warn!("Places API key is not set; beach searches will fail upstream");
        }
        if config.weather.api_key.trim().is_empty() {
            tracing::warn!("Weather API key is not set; weather and geocoding will fail upstream");
        }

        let crowd: Option<Arc<dyn CrowdSource>> = match config.crowd_api_key() {
            Some(key) => {
                let crowd = match &config.crowd.base_url {
                    Some(url) => {
                        CrowdClient::with_base_url(client.clone(), key.to_string(), url.clone())
                    }
                    None => CrowdClient::new(client.clone(), key.to_string()),
                };
                Some(Arc::new(crowd))
            }
            None => {
                tracing::info!("Crowd API key not set; crowd levels will be Unknown");
                None
            }
        };

        Ok(Self {
            places: Arc::new(
                PlacesClient::with_base_url(
                    client.clone(),
                    config.places.api_key.clone(),
                    config.places.base_url.clone(),
                )
                .with_keyword(config.places.keyword.clone()),
            ),
            marine: Arc::new(MarineClient::with_base_url(
                client.clone(),
                config.marine.base_url.clone(),
            )),
            weather: Arc::new(WeatherClient::with_base_url(
                client.clone(),
                config.weather.api_key.clone(),
                config.weather.base_url.clone(),
            )),
            geocoder: Arc::new(GeocodingClient::with_base_url(
                client,
                config.weather.api_key.clone(),
                config.weather.geocoding_url.clone(),
            )),
            crowd,
        })
    }
}

impl AppState {
    pub fn new(config: Config, sources: Sources) -> Self {
        let pager = PlacesPager::new(
            sources.places.clone(),
            config.places.max_pages,
            Duration::from_millis(config.places.page_delay_ms),
        );
        let enricher = BeachEnricher::new(
            sources.marine.clone(),
            sources.weather.clone(),
            sources.crowd.clone(),
        );
        let engine = ScoreEngine::new(
            config.scoring.bands.clone(),
            config.scoring.thresholds,
        );
        let pipeline =
            AggregationPipeline::new(sources.geocoder.clone(), pager.clone(), enricher, engine)
                .with_concurrency(config.pipeline.enrichment_concurrency)
                .with_default_radius(config.pipeline.default_radius_m);
        let session = SearchSession::new(Arc::new(pipeline), FilterEngine::new(config.filters));

        Self {
            config: Arc::new(config),
            session: Arc::new(session),
            pager,
            weather: sources.weather,
            geocoder: sources.geocoder,
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Beach Finder API"
}
