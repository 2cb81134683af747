//! External API integrations
//!
//! Each provider sits behind a trait so the pipeline and handlers can run
//! against in-memory sources in tests.

use async_trait::async_trait;
use shared::{
    CandidatePlace, CityWeather, Coordinates, CrowdReading, ForecastStep, MarineSnapshot,
    WeatherSnapshot,
};

use crate::error::{AppError, AppResult};

pub mod crowd;
pub mod geocoding;
pub mod marine;
pub mod places;
pub mod weather;

pub use crowd::CrowdClient;
pub use geocoding::{GeocodingClient, LocationSuggestion};
pub use marine::MarineClient;
pub use places::PlacesClient;
pub use weather::WeatherClient;

/// Upstream error for a failed provider call. Request URLs carry API keys,
/// so the URL is stripped from the message.
pub(crate) fn request_failed(provider: &str, error: reqwest::Error) -> AppError {
    AppError::Upstream(format!("{} request failed: {}", provider, error.without_url()))
}

/// Upstream error for an unreadable provider response, URL stripped
pub(crate) fn parse_failed(what: &str, error: reqwest::Error) -> AppError {
    AppError::Upstream(format!("Failed to parse {}: {}", what, error.without_url()))
}

/// One page of nearby-search results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacesPage {
    pub places: Vec<CandidatePlace>,
    pub next_page_token: Option<String>,
}

#[async_trait]
pub trait PlacesSource: Send + Sync {
    /// Fetch one page; `page_token` continues a previous search
    async fn nearby_page(
        &self,
        center: &Coordinates,
        radius_m: u32,
        page_token: Option<&str>,
    ) -> AppResult<PlacesPage>;
}

#[async_trait]
pub trait MarineSource: Send + Sync {
    async fn marine_snapshot(&self, at: &Coordinates) -> AppResult<MarineSnapshot>;
}

#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current_at(&self, at: &Coordinates) -> AppResult<WeatherSnapshot>;

    /// `LocationNotFound` when the provider does not know the city
    async fn city_weather(&self, city: &str) -> AppResult<CityWeather>;

    async fn forecast_at(&self, at: &Coordinates, steps: u32) -> AppResult<Vec<ForecastStep>>;
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, query: &str, limit: u32) -> AppResult<Vec<LocationSuggestion>>;
}

#[async_trait]
pub trait CrowdSource: Send + Sync {
    /// `Ok(None)` when the venue has no live or forecast busyness
    async fn crowd_reading(
        &self,
        venue_name: &str,
        venue_address: &str,
    ) -> AppResult<Option<CrowdReading>>;
}
