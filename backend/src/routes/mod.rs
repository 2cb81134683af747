//! Route definitions for the Beach Finder API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Places proxy
        .route("/beaches", get(handlers::nearby_beaches))
        // Normal view
        .route("/weather", get(handlers::city_weather))
        .route("/geocode", get(handlers::suggest_locations))
        // Surfer view
        .nest("/search", search_routes())
}

/// Aggregation pipeline and filter routes
fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_search).post(handlers::start_search))
        .route("/beaches/:place_id", get(handlers::get_beach))
        .route(
            "/filter",
            post(handlers::apply_filter).delete(handlers::clear_filters),
        )
}
