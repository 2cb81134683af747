//! Nearby-beach proxy handler

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::{CandidatePlace, Coordinates};
use tokio_util::sync::CancellationToken;

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Raw query parameters; parsed by hand so every failure gets a JSON body
#[derive(Debug, Deserialize)]
pub struct BeachesQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub radius: Option<String>,
}

fn required(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_number(value: &str, name: &str) -> AppResult<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AppError::Validation(format!("Invalid {}: {}", name, value)))
}

/// All pages of nearby beach places, in provider order
pub async fn nearby_beaches(
    State(state): State<AppState>,
    Query(query): Query<BeachesQuery>,
) -> AppResult<Json<Vec<CandidatePlace>>> {
    let (lat, lon, radius) = match (
        required(query.lat),
        required(query.lon),
        required(query.radius),
    ) {
        (Some(lat), Some(lon), Some(radius)) => (lat, lon, radius),
        _ => {
            return Err(AppError::MissingParameter(
                "Latitude, longitude and radius are required".to_string(),
            ))
        }
    };

    let lat = parse_number(&lat, "latitude")?;
    let lon = parse_number(&lon, "longitude")?;
    let radius = parse_number(&radius, "radius")?;
    if radius < 1.0 || radius > u32::MAX as f64 {
        return Err(AppError::Validation("Radius must be positive".to_string()));
    }

    let center = Coordinates::from_f64(lat, lon)?;
    let paged = state
        .pager
        .fetch(&center, radius.round() as u32, &CancellationToken::new())
        .await?;

    tracing::debug!(
        count = paged.places.len(),
        pages = paged.pages,
        truncated = paged.truncated,
        "Relayed nearby beaches"
    );
    Ok(Json(paged.places))
}
