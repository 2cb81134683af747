//! Direct geocoding client (city name to coordinates)
//!
//! Integrates with the OpenWeatherMap Geocoding 1.0 `direct` endpoint. Used both
//! to resolve a search city and to feed search-box suggestions.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::Coordinates;

use super::{parse_failed, request_failed, Geocoder};
use crate::error::{AppError, AppResult};

/// Geocoding API client
#[derive(Clone)]
pub struct GeocodingClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// A place matching a free-text query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationSuggestion {
    pub name: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub display_name: String,
}

impl LocationSuggestion {
    pub fn new(name: String, state: Option<String>, country: String, lat: f64, lon: f64) -> Self {
        let display_name = match state.as_deref().filter(|s| !s.is_empty()) {
            Some(state) => format!("{}, {}, {}", name, state, country),
            None => format!("{}, {}", name, country),
        };
        Self {
            name,
            country,
            state,
            lat,
            lon,
            display_name,
        }
    }

    pub fn coordinates(&self) -> Result<Coordinates, &'static str> {
        Coordinates::from_f64(self.lat, self.lon)
    }
}

#[derive(Debug, Deserialize)]
struct OWMGeoEntry {
    name: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    country: String,
    state: Option<String>,
}

impl GeocodingClient {
    /// Client for the endpoint at `base_url`
    pub fn with_base_url(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }
}

#[async_trait]
impl Geocoder for GeocodingClient {
    async fn geocode(&self, query: &str, limit: u32) -> AppResult<Vec<LocationSuggestion>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", query.trim().to_string()),
                ("limit", limit.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| request_failed("Geocoding API", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Geocoding API error: {} - {}",
                status, body
            )));
        }

        let entries: Vec<OWMGeoEntry> = response
            .json()
            .await
            .map_err(|e| parse_failed("geocoding response", e))?;

        Ok(entries
            .into_iter()
            .map(|e| LocationSuggestion::new(e.name, e.state, e.country, e.lat, e.lon))
            .collect())
    }
}
