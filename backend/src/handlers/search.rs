//! Beach search, detail and filter handlers

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use shared::{BeachSummary, EnrichedBeach, FilterCriteria};
use uuid::Uuid;

use super::parse_json_body;
use crate::error::AppResult;
use crate::services::{
    BeachDetail, PipelineState, ResolvedLocation, SearchOutcome, SearchQuery, SessionSnapshot,
    SkipCounts,
};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub run_id: Uuid,
    pub state: PipelineState,
    pub location: ResolvedLocation,
    pub radius_m: u32,
    pub candidates: usize,
    pub pages: u32,
    pub skipped: SkipCounts,
    pub beaches: Vec<BeachSummary>,
}

impl From<SearchOutcome> for SearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        Self {
            run_id: outcome.run_id,
            state: outcome.state,
            location: outcome.location,
            radius_m: outcome.radius_m,
            candidates: outcome.candidates,
            pages: outcome.pages,
            skipped: outcome.skipped,
            beaches: outcome.beaches.iter().map(EnrichedBeach::summary).collect(),
        }
    }
}

/// Run a new search, replacing the previous result and filter
pub async fn start_search(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<SearchResponse>> {
    let query: SearchQuery = parse_json_body(&body)?;
    let outcome = state.session.search(query).await?;
    Ok(Json(outcome.into()))
}

/// Session state and the currently visible beaches
pub async fn get_search(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session.state().await)
}

/// One beach with its hourly marine series
pub async fn get_beach(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> AppResult<Json<BeachDetail>> {
    Ok(Json(state.session.beach(&place_id).await?))
}

/// Replace the active filter; always evaluated against the full result
pub async fn apply_filter(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<SessionSnapshot>> {
    let criteria: FilterCriteria = parse_json_body(&body)?;
    Ok(Json(state.session.apply_filter(criteria).await))
}

/// Clear every filter axis
pub async fn clear_filters(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session.clear_filters().await)
}
