//! HTTP handlers

use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

pub mod beaches;
pub mod geocode;
pub mod health;
pub mod search;
pub mod weather;

pub use beaches::nearby_beaches;
pub use geocode::suggest_locations;
pub use health::health_check;
pub use search::{apply_filter, clear_filters, get_beach, get_search, start_search};
pub use weather::city_weather;

/// Parse a JSON request body; an empty body yields `T::default()`
pub(crate) fn parse_json_body<T: DeserializeOwned + Default>(body: &Bytes) -> AppResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid request body: {}", e)))
}
