//! Marine forecast client
//!
//! Integrates with the Open-Meteo Marine API for hourly wave, wind-wave and
//! swell series. No API key is required.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use shared::{Coordinates, MarineSnapshot, MarineUnits};

use super::{parse_failed, request_failed, MarineSource};
use crate::error::{AppError, AppResult};

const HOURLY_VARIABLES: &str = "wave_height,wave_direction,wave_period,wind_wave_height,\
wind_wave_direction,swell_wave_height,swell_wave_direction";

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Marine API client
#[derive(Clone)]
pub struct MarineClient {
    client: Client,
    base_url: String,
}

/// Open-Meteo marine response
#[derive(Debug, Deserialize)]
struct OMMarineResponse {
    #[serde(default)]
    timezone: String,
    hourly_units: Option<OMHourlyUnits>,
    hourly: Option<OMHourly>,
}

#[derive(Debug, Deserialize)]
struct OMHourlyUnits {
    wave_height: Option<String>,
    wave_direction: Option<String>,
    wave_period: Option<String>,
    wind_wave_height: Option<String>,
    wind_wave_direction: Option<String>,
    swell_wave_height: Option<String>,
    swell_wave_direction: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OMHourly {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    wave_height: Vec<Option<f64>>,
    #[serde(default)]
    wave_direction: Vec<Option<f64>>,
    #[serde(default)]
    wave_period: Vec<Option<f64>>,
    #[serde(default)]
    wind_wave_height: Vec<Option<f64>>,
    #[serde(default)]
    wind_wave_direction: Vec<Option<f64>>,
    #[serde(default)]
    swell_wave_height: Vec<Option<f64>>,
    #[serde(default)]
    swell_wave_direction: Vec<Option<f64>>,
}

impl MarineClient {
    /// Client for the endpoint at `base_url`
    pub fn with_base_url(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl MarineSource for MarineClient {
    async fn marine_snapshot(&self, at: &Coordinates) -> AppResult<MarineSnapshot> {
        let url = format!(
            "{}?latitude={}&longitude={}&hourly={}&timezone=auto",
            self.base_url, at.latitude, at.longitude, HOURLY_VARIABLES
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| request_failed("Marine API", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Marine API error: {} - {}",
                status, body
            )));
        }

        let data: OMMarineResponse = response
            .json()
            .await
            .map_err(|e| parse_failed("marine response", e))?;

        convert_marine_response(data)
    }
}

fn convert_marine_response(data: OMMarineResponse) -> AppResult<MarineSnapshot> {
    let hourly = match data.hourly {
        Some(hourly) => hourly,
        None => {
            return Ok(MarineSnapshot {
                timezone: data.timezone,
                ..Default::default()
            })
        }
    };

    let times = hourly
        .time
        .iter()
        .map(|t| {
            NaiveDateTime::parse_from_str(t, TIME_FORMAT)
                .map_err(|e| AppError::Upstream(format!("Bad marine timestamp {}: {}", t, e)))
        })
        .collect::<AppResult<Vec<_>>>()?;

    let defaults = MarineUnits::default();
    let units = match data.hourly_units {
        Some(u) => MarineUnits {
            wave_height: u.wave_height.unwrap_or(defaults.wave_height),
            wave_direction: u.wave_direction.unwrap_or(defaults.wave_direction),
            wave_period: u.wave_period.unwrap_or(defaults.wave_period),
            wind_wave_height: u.wind_wave_height.unwrap_or(defaults.wind_wave_height),
            wind_wave_direction: u.wind_wave_direction.unwrap_or(defaults.wind_wave_direction),
            swell_wave_height: u.swell_wave_height.unwrap_or(defaults.swell_wave_height),
            swell_wave_direction: u.swell_wave_direction.unwrap_or(defaults.swell_wave_direction),
        },
        None => defaults,
    };

    Ok(MarineSnapshot {
        timezone: data.timezone,
        times,
        units,
        wave_height: hourly.wave_height,
        wave_direction: hourly.wave_direction,
        wave_period: hourly.wave_period,
        wind_wave_height: hourly.wind_wave_height,
        wind_wave_direction: hourly.wind_wave_direction,
        swell_wave_height: hourly.swell_wave_height,
        swell_wave_direction: hourly.swell_wave_direction,
    })
}
