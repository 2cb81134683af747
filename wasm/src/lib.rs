//! WebAssembly module for Beach Finder
//!
//! Provides client-side computation for:
//! - Beach scoring from raw conditions
//! - Re-filtering the current result without a round trip
//! - Crowd category and weather advisory lookups

use serde::Deserialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::{BeachConditions, FilterBands, FilterCriteria, FilterEngine, ScoreEngine};

fn to_js(result: Result<String, String>) -> Result<String, JsValue> {
    result.map_err(|e| JsValue::from_str(&e))
}

fn score_json(conditions_json: &str, engine_json: Option<&str>) -> Result<String, String> {
    let conditions: BeachConditions = serde_json::from_str(conditions_json)
        .map_err(|e| format!("Invalid conditions JSON: {}", e))?;
    let engine: ScoreEngine = match engine_json.map(str::trim).filter(|s| !s.is_empty()) {
        Some(json) => {
            serde_json::from_str(json).map_err(|e| format!("Invalid score bands JSON: {}", e))?
        }
        None => ScoreEngine::default(),
    };
    let breakdown = engine.breakdown(&conditions);
    serde_json::to_string(&breakdown).map_err(|e| e.to_string())
}

#[derive(Deserialize)]
struct FilterRequest {
    beaches: Vec<BeachSummary>,
    #[serde(default)]
    criteria: FilterCriteria,
    #[serde(default)]
    bands: FilterBands,
}

fn filter_json(request_json: &str) -> Result<String, String> {
    let request: FilterRequest = serde_json::from_str(request_json)
        .map_err(|e| format!("Invalid filter JSON: {}", e))?;
    let engine = FilterEngine::new(request.bands);
    let visible: Vec<&BeachSummary> = request
        .beaches
        .iter()
        .filter(|b| engine.matches_reading(&b.current, b.crowd_level, &request.criteria))
        .collect();
    serde_json::to_string(&visible).map_err(|e| e.to_string())
}

/// Score breakdown (JSON) for a conditions object (JSON). `engine_json`
/// carries `{bands, thresholds}` as configured on the server; either part
/// may be omitted to use the defaults.
#[wasm_bindgen]
pub fn score_beach(conditions_json: &str, engine_json: Option<String>) -> Result<String, JsValue> {
    to_js(score_json(conditions_json, engine_json.as_deref()))
}

/// Filter `{beaches, criteria, bands?}` and return the visible summaries
#[wasm_bindgen]
pub fn filter_beaches(request_json: &str) -> Result<String, JsValue> {
    to_js(filter_json(request_json))
}

/// Crowd category for a busyness percentage
#[wasm_bindgen]
pub fn crowd_level(busyness_percent: u8) -> String {
    CrowdLevel::from_percent(busyness_percent.min(100)).to_string()
}

/// Advisory line for a provider condition id
#[wasm_bindgen]
pub fn weather_advisory(condition_code: i32, mode: &str) -> Result<String, JsValue> {
    let mode: ViewMode = mode.parse().map_err(|e: String| JsValue::from_str(&e))?;
    Ok(ConditionGroup::from_code(condition_code)
        .advisory(mode)
        .to_string())
}

/// Whether a search-box entry is long enough to query suggestions
#[wasm_bindgen]
pub fn should_suggest(query: &str) -> bool {
    is_suggestion_query(query)
}
