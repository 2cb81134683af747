//! Configuration management for the Beach Finder server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with BF_ prefix (`BF_PLACES__API_KEY`)

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{FilterBands, ScoreBands, ScoreThresholds};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Places search provider
    pub places: PlacesConfig,

    /// Marine forecast provider
    pub marine: MarineConfig,

    /// Weather and geocoding provider
    pub weather: WeatherConfig,

    /// Foot-traffic provider, optional
    #[serde(default)]
    pub crowd: CrowdConfig,

    /// Aggregation pipeline tuning
    pub pipeline: PipelineConfig,

    /// Scoring bands and thresholds
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Filter cut points
    #[serde(default)]
    pub filters: FilterBands,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlacesConfig {
    /// Places API key
    pub api_key: String,

    /// Nearby search endpoint
    pub base_url: String,

    /// Search keyword sent with every request
    pub keyword: String,

    /// Upper bound on fetched pages per search
    pub max_pages: u32,

    /// Wait between page requests, milliseconds
    pub page_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MarineConfig {
    /// Marine forecast endpoint
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API key
    pub api_key: String,

    /// Current conditions and forecast endpoint
    pub base_url: String,

    /// Direct geocoding endpoint
    pub geocoding_url: String,

    /// Forecast steps returned with city weather
    pub forecast_steps: u32,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CrowdConfig {
    /// Private API key; the crowd step is skipped when unset
    pub api_key: Option<String>,

    /// Live forecast endpoint
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    /// Places enriched at the same time
    pub enrichment_concurrency: usize,

    /// Radius used when a search omits one, meters
    pub default_radius_m: u32,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ScoringConfig {
    #[serde(default)]
    pub bands: ScoreBands,

    #[serde(default)]
    pub thresholds: ScoreThresholds,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("BF_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3001)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("places.api_key", "")?
            .set_default(
                "places.base_url",
                "https://maps.googleapis.com/maps/api/place/nearbysearch/json",
            )?
            .set_default("places.keyword", "beach")?
            .set_default("places.max_pages", 3)?
            .set_default("places.page_delay_ms", 2000)?
            .set_default("marine.base_url", "https://marine-api.open-meteo.com/v1/marine")?
            .set_default("weather.api_key", "")?
            .set_default("weather.base_url", "https://api.openweathermap.org/data/2.5")?
            .set_default(
                "weather.geocoding_url",
                "https://api.openweathermap.org/geo/1.0/direct",
            )?
            .set_default("weather.forecast_steps", 5)?
            .set_default("pipeline.enrichment_concurrency", 4)?
            .set_default("pipeline.default_radius_m", 10_000)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (BF_ prefix)
            .add_source(
                Environment::with_prefix("BF")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Crowd key, if one is set and non-empty
    pub fn crowd_api_key(&self) -> Option<&str> {
        self.crowd
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load_without_files() {
        let config = Config::load().unwrap();
        assert_eq!(config.places.keyword, "beach");
        assert_eq!(config.places.max_pages, 3);
        assert_eq!(config.places.page_delay_ms, 2000);
        assert_eq!(config.pipeline.enrichment_concurrency, 4);
        assert_eq!(config.weather.forecast_steps, 5);
        assert_eq!(config.scoring.thresholds, ScoreThresholds::default());
        assert_eq!(config.filters, FilterBands::default());
    }

    #[test]
    fn test_blank_crowd_key_is_unset() {
        let mut config = Config::load().unwrap();
        config.crowd.api_key = Some("  ".to_string());
        assert!(config.crowd_api_key().is_none());
        config.crowd.api_key = Some("pri_123".to_string());
        assert_eq!(config.crowd_api_key(), Some("pri_123"));
    }
}
