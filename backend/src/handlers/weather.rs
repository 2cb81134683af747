//! City weather handler for the header of both views

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use shared::{validate_city_name, CityWeather, ConditionGroup, ForecastStep, ViewMode};

use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CityWeatherResponse {
    #[serde(flatten)]
    pub city: CityWeather,
    pub mode: ViewMode,
    pub condition_group: ConditionGroup,
    pub advisory: &'static str,
    pub local_time: DateTime<FixedOffset>,
    pub forecast: Vec<ForecastStep>,
}

fn parse_mode(mode: Option<&str>) -> AppResult<ViewMode> {
    mode.unwrap_or_default().parse().map_err(AppError::Validation)
}

/// Current conditions, advisory and short forecast for a city
pub async fn city_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> AppResult<Json<CityWeatherResponse>> {
    let city = query
        .city
        .ok_or_else(|| AppError::MissingParameter("City is required".to_string()))?;
    validate_city_name(&city)?;
    let mode = parse_mode(query.mode.as_deref())?;

    let weather = state.weather.city_weather(city.trim()).await?;

    let steps = state.config.weather.forecast_steps;
    let forecast = match state.weather.forecast_at(&weather.coordinates, steps).await {
        Ok(forecast) => forecast,
        Err(e) => {
            tracing::warn!(city = %weather.name, error = %e, "Forecast unavailable");
            Vec::new()
        }
    };

    let group = weather.current.condition_group();
    Ok(Json(CityWeatherResponse {
        mode,
        condition_group: group,
        advisory: group.advisory(mode),
        local_time: weather.local_time(Utc::now()),
        forecast,
        city: weather,
    }))
}
