//! Weather API client for current conditions and short forecasts
//!
//! Integrates with OpenWeatherMap 2.5 (`/weather`, `/forecast`), metric units

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use shared::{CityWeather, Coordinates, ForecastStep, WeatherSnapshot};

use super::{parse_failed, request_failed, WeatherSource};
use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    coord: OWMCoord,
    #[serde(default)]
    weather: Vec<OWMWeather>,
    main: OWMMain,
    wind: OWMWind,
    dt: i64,
    sys: Option<OWMSys>,
    #[serde(default)]
    timezone: i32,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct OWMCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    id: i32,
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: i32,
    humidity: i32,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: f64,
    deg: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OWMSys {
    country: Option<String>,
}

/// OpenWeatherMap API response for forecast
#[derive(Debug, Deserialize)]
struct OWMForecastResponse {
    list: Vec<OWMForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OWMForecastItem {
    dt: i64,
    main: OWMMain,
    #[serde(default)]
    weather: Vec<OWMWeather>,
    #[serde(default)]
    pop: f64,
}

impl WeatherClient {
    /// Client for the endpoint at `base_url`
    pub fn with_base_url(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }

    async fn fetch_current(&self, params: &[(&str, String)]) -> AppResult<OWMCurrentResponse> {
        let response = self
            .client
            .get(format!("{}/weather", self.base_url))
            .query(params)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| request_failed("Weather API", e))?;

        if response.status() == StatusCode::NOT_FOUND {
            let place = params
                .iter()
                .map(|(_, v)| v.as_str())
                .collect::<Vec<_>>()
                .join(",");
            return Err(AppError::LocationNotFound(place));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| parse_failed("weather response", e))
    }
}

#[async_trait]
impl WeatherSource for WeatherClient {
    async fn current_at(&self, at: &Coordinates) -> AppResult<WeatherSnapshot> {
        let data = self
            .fetch_current(&[("lat", at.latitude.to_string()), ("lon", at.longitude.to_string())])
            .await?;
        Ok(convert_current_response(&data))
    }

    async fn city_weather(&self, city: &str) -> AppResult<CityWeather> {
        let data = self.fetch_current(&[("q", city.trim().to_string())]).await?;
        convert_city_response(data)
    }

    async fn forecast_at(&self, at: &Coordinates, steps: u32) -> AppResult<Vec<ForecastStep>> {
        let url = format!(
            "{}/forecast?lat={}&lon={}&cnt={}&appid={}&units=metric",
            self.base_url, at.latitude, at.longitude, steps, self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| request_failed("Weather API", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        let data: OWMForecastResponse = response
            .json()
            .await
            .map_err(|e| parse_failed("forecast response", e))?;

        Ok(convert_forecast_response(data, steps as usize))
    }
}

/// Convert OpenWeatherMap current response to our format
fn convert_current_response(data: &OWMCurrentResponse) -> WeatherSnapshot {
    let weather = data.weather.first();

    WeatherSnapshot {
        observed_at: DateTime::from_timestamp(data.dt, 0).unwrap_or_else(Utc::now),
        temperature_celsius: data.main.temp,
        feels_like_celsius: data.main.feels_like,
        temp_min_celsius: data.main.temp_min,
        temp_max_celsius: data.main.temp_max,
        humidity_percent: data.main.humidity,
        pressure_hpa: data.main.pressure,
        wind_speed_mps: data.wind.speed,
        wind_direction_deg: data.wind.deg,
        condition_code: weather.map(|w| w.id).unwrap_or_default(),
        condition: weather.map(|w| w.main.clone()).unwrap_or_default(),
        description: weather.map(|w| w.description.clone()).unwrap_or_default(),
        icon: weather.map(|w| w.icon.clone()).unwrap_or_default(),
    }
}

fn convert_city_response(data: OWMCurrentResponse) -> AppResult<CityWeather> {
    let current = convert_current_response(&data);
    let coordinates = Coordinates::from_f64(data.coord.lat, data.coord.lon)
        .map_err(|e| AppError::Upstream(format!("Bad city coordinates: {}", e)))?;
    Ok(CityWeather {
        name: data.name,
        country: data.sys.and_then(|s| s.country),
        coordinates,
        timezone_offset_seconds: data.timezone,
        current,
    })
}

/// Convert OpenWeatherMap forecast response to our format
fn convert_forecast_response(data: OWMForecastResponse, steps: usize) -> Vec<ForecastStep> {
    data.list
        .into_iter()
        .take(steps)
        .map(|item| {
            let weather = item.weather.first();
            ForecastStep {
                timestamp: DateTime::from_timestamp(item.dt, 0).unwrap_or_else(Utc::now),
                temperature_celsius: item.main.temp,
                condition_code: weather.map(|w| w.id).unwrap_or_default(),
                description: weather.map(|w| w.description.clone()).unwrap_or_default(),
                icon: weather.map(|w| w.icon.clone()).unwrap_or_default(),
                pop: item.pop,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ConditionGroup;

    const LONDON: &str = r#"{
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
        "main": {"temp": 17.3, "feels_like": 16.9, "temp_min": 15.9, "temp_max": 18.4,
                 "pressure": 1016, "humidity": 72},
        "wind": {"speed": 4.6, "deg": 240},
        "dt": 1719835200,
        "sys": {"country": "GB", "sunrise": 1719805000, "sunset": 1719864000},
        "timezone": 3600,
        "name": "London"
    }"#;

    #[test]
    fn test_convert_city_response() {
        let data: OWMCurrentResponse = serde_json::from_str(LONDON).unwrap();
        let city = convert_city_response(data).unwrap();

        assert_eq!(city.name, "London");
        assert_eq!(city.country.as_deref(), Some("GB"));
        assert_eq!(city.timezone_offset_seconds, 3600);
        assert_eq!(city.current.condition_code, 803);
        assert_eq!(city.current.condition_group(), ConditionGroup::Clouds);
        assert_eq!(city.current.wind_direction_deg, Some(240));
        assert_eq!(city.current.humidity_percent, 72);
    }

    #[test]
    fn test_forecast_is_truncated_to_steps() {
        let items: Vec<String> = (0..8)
            .map(|i| {
                format!(
                    r#"{{"dt": {}, "main": {{"temp": 20.0, "feels_like": 20.0, "temp_min": 19.0,
                    "temp_max": 21.0, "pressure": 1010, "humidity": 60}},
                    "weather": [{{"id": 500, "main": "Rain",
                        "description": "light rain", "icon": "10d"}}],
                    "pop": 0.4}}"#,
                    1719835200 + i * 10800
                )
            })
            .collect();
        let body = format!(r#"{{"list": [{}]}}"#, items.join(","));
        let data: OWMForecastResponse = serde_json::from_str(&body).unwrap();

        let steps = convert_forecast_response(data, 5);
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0].condition_code, 500);
        assert_eq!(steps[4].timestamp.timestamp(), 1719835200 + 4 * 10800);
    }
}
