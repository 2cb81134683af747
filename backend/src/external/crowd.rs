//! Foot-traffic client for venue busyness
//!
//! Integrates with the BestTime live forecast endpoint. Live busyness wins;
//! forecasted busyness is used when no live value is available.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::{CrowdReading, CrowdSourceKind};

use super::{parse_failed, request_failed, CrowdSource};
use crate::error::{AppError, AppResult};

/// Crowd API client
#[derive(Clone)]
pub struct CrowdClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct BTLiveResponse {
    analysis: Option<BTAnalysis>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BTAnalysis {
    venue_live_busyness: Option<f64>,
    venue_live_busyness_available: bool,
    venue_forecasted_busyness: Option<f64>,
    venue_forecast_busyness_available: bool,
}

impl CrowdClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self::with_base_url(
            client,
            api_key,
            "https://besttime.app/api/v1/forecasts/live".to_string(),
        )
    }

    /// Create a new CrowdClient with custom base URL (for testing)
    pub fn with_base_url(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }
}

#[async_trait]
impl CrowdSource for CrowdClient {
    async fn crowd_reading(
        &self,
        venue_name: &str,
        venue_address: &str,
    ) -> AppResult<Option<CrowdReading>> {
        let response = self
            .client
            .post(&self.base_url)
            .query(&[
                ("api_key_private", self.api_key.as_str()),
                ("venue_name", venue_name),
                ("venue_address", venue_address),
            ])
            .send()
            .await
            .map_err(|e| request_failed("Crowd API", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Crowd API error: {} - {}",
                status, body
            )));
        }

        let data: BTLiveResponse = response
            .json()
            .await
            .map_err(|e| parse_failed("crowd response", e))?;

        Ok(data.analysis.and_then(|a| reading_from_analysis(&a)))
    }
}

fn reading_from_analysis(analysis: &BTAnalysis) -> Option<CrowdReading> {
    let (value, source) = if analysis.venue_live_busyness_available {
        (analysis.venue_live_busyness, CrowdSourceKind::Live)
    } else if analysis.venue_forecast_busyness_available {
        (analysis.venue_forecasted_busyness, CrowdSourceKind::Forecast)
    } else {
        return None;
    };

    value
        .filter(|v| v.is_finite())
        .map(|v| CrowdReading::new(v.round().clamp(0.0, 100.0) as u8, source))
}
