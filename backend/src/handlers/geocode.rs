//! Search-box location suggestions

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::is_suggestion_query;

use crate::error::AppResult;
use crate::external::LocationSuggestion;
use crate::AppState;

const SUGGESTION_LIMIT: u32 = 5;

#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub q: Option<String>,
}

/// Up to five matches; short queries return nothing without a lookup
pub async fn suggest_locations(
    State(state): State<AppState>,
    Query(query): Query<GeocodeQuery>,
) -> AppResult<Json<Vec<LocationSuggestion>>> {
    let q = query.q.unwrap_or_default();
    if !is_suggestion_query(&q) {
        return Ok(Json(Vec::new()));
    }

    let mut suggestions = state.geocoder.geocode(q.trim(), SUGGESTION_LIMIT).await?;
    suggestions.truncate(SUGGESTION_LIMIT as usize);
    Ok(Json(suggestions))
}
