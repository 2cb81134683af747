//! Places API client for nearby "beach" searches
//!
//! Integrates with the Google Places Nearby Search REST endpoint. Results come
//! back at most 20 per page with a continuation token for the next page.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::{CandidatePlace, Coordinates};

use super::{parse_failed, request_failed, PlacesPage, PlacesSource};
use crate::error::{AppError, AppResult};

/// Places API client
#[derive(Clone)]
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: String,
    keyword: String,
}

/// Nearby Search response
#[derive(Debug, Deserialize)]
struct GPNearbyResponse {
    status: String,
    #[serde(default)]
    results: Vec<GPPlace>,
    next_page_token: Option<String>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GPPlace {
    place_id: String,
    name: String,
    geometry: GPGeometry,
    rating: Option<f64>,
    #[serde(default)]
    photos: Vec<GPPhoto>,
    vicinity: Option<String>,
    formatted_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GPGeometry {
    location: GPLocation,
}

#[derive(Debug, Deserialize)]
struct GPLocation {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct GPPhoto {
    photo_reference: String,
}

impl PlacesClient {
    /// Client for the endpoint at `base_url`
    pub fn with_base_url(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
            keyword: "beach".to_string(),
        }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }
}

#[async_trait]
impl PlacesSource for PlacesClient {
    async fn nearby_page(
        &self,
        center: &Coordinates,
        radius_m: u32,
        page_token: Option<&str>,
    ) -> AppResult<PlacesPage> {
        let mut params = vec![
            ("location", center.to_string()),
            ("radius", radius_m.to_string()),
            ("keyword", self.keyword.clone()),
            ("key", self.api_key.clone()),
        ];
        if let Some(token) = page_token {
            params.push(("pagetoken", token.to_string()));
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| request_failed("Places API", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Places API error: {} - {}",
                status, body
            )));
        }

        let data: GPNearbyResponse = response
            .json()
            .await
            .map_err(|e| parse_failed("places response", e))?;

        convert_nearby_response(data)
    }
}

/// `OK` and `ZERO_RESULTS` are the only successful statuses
fn convert_nearby_response(data: GPNearbyResponse) -> AppResult<PlacesPage> {
    match data.status.as_str() {
        "OK" | "ZERO_RESULTS" => {}
        other => {
            return Err(AppError::Upstream(format!(
                "Places API status {}: {}",
                other,
                data.error_message.unwrap_or_default()
            )))
        }
    }

    let places = data
        .results
        .into_iter()
        .filter_map(|place| {
            let location = &place.geometry.location;
            let coordinates = match Coordinates::from_f64(location.lat, location.lng) {
                Ok(coordinates) => coordinates,
                Err(e) => {
                    tracing::debug!(place_id = %place.place_id, error = e, "Dropping place");
                    return None;
                }
            };
            Some(CandidatePlace {
                place_id: place.place_id,
                name: place.name,
                coordinates,
                rating: place.rating,
                photo_references: place.photos.into_iter().map(|p| p.photo_reference).collect(),
                address: place.vicinity.or(place.formatted_address),
            })
        })
        .collect();

    Ok(PlacesPage {
        places,
        next_page_token: data.next_page_token.filter(|token| !token.is_empty()),
    })
}
