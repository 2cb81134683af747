//! Beach aggregation pipeline
//!
//! Geocoding -> Paging -> Enriching -> Scoring for a single search run. The
//! run reports every state change on a watch channel and stops early when its
//! cancellation token fires.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use shared::{
    validate_city_name, validate_coordinates, validate_radius, BeachCollection, Coordinates,
    EnrichedBeach, ScoreEngine,
};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::enricher::{BeachEnricher, EnrichOutcome, SkipReason};
use super::pager::PlacesPager;
use crate::error::{AppError, AppResult};
use crate::external::Geocoder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PipelineState {
    #[default]
    Idle,
    Geocoding,
    Paging,
    Enriching,
    Ready,
    Empty,
    Error,
}

impl PipelineState {
    /// Forward transitions of a run; any state may start a new run
    pub fn can_transition_to(&self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, next),
            (_, Geocoding)
                | (Geocoding, Paging)
                | (Geocoding, Error)
                | (Paging, Enriching)
                | (Paging, Empty)
                | (Enriching, Ready)
                | (Enriching, Empty)
        )
    }
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Search request body; a city name or a coordinate pair
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchQuery {
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius: Option<u32>,
}

impl SearchQuery {
    pub fn city(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            ..Default::default()
        }
    }

    pub fn point(lat: f64, lon: f64) -> Self {
        Self {
            lat: Some(lat),
            lon: Some(lon),
            ..Default::default()
        }
    }

    pub fn with_radius(mut self, radius_m: u32) -> Self {
        self.radius = Some(radius_m);
        self
    }

    /// Coordinates take precedence over a city name
    pub fn location(&self) -> AppResult<SearchLocation> {
        match (self.lat, self.lon, self.city.as_deref()) {
            (Some(lat), Some(lon), _) => {
                let coordinates = Coordinates::from_f64(lat, lon)?;
                validate_coordinates(&coordinates)?;
                Ok(SearchLocation::Point(coordinates))
            }
            (None, None, Some(city)) => {
                validate_city_name(city)?;
                Ok(SearchLocation::City(city.trim().to_string()))
            }
            (Some(_), None, _) | (None, Some(_), _) => Err(AppError::MissingParameter(
                "Both lat and lon are required".to_string(),
            )),
            (None, None, None) => Err(AppError::MissingParameter(
                "A city or a lat/lon pair is required".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchLocation {
    City(String),
    Point(Coordinates),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipCounts {
    pub marine_unavailable: usize,
    pub no_wave_data: usize,
    pub weather_unavailable: usize,
    pub cancelled: usize,
}

impl SkipCounts {
    pub fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::MarineUnavailable => self.marine_unavailable += 1,
            SkipReason::NoWaveData => self.no_wave_data += 1,
            SkipReason::WeatherUnavailable => self.weather_unavailable += 1,
            SkipReason::Cancelled => self.cancelled += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.marine_unavailable + self.no_wave_data + self.weather_unavailable + self.cancelled
    }
}

/// Result of one completed run
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub run_id: Uuid,
    pub location: ResolvedLocation,
    pub radius_m: u32,
    pub state: PipelineState,
    pub beaches: Vec<EnrichedBeach>,
    pub candidates: usize,
    pub skipped: SkipCounts,
    pub pages: u32,
}

pub struct AggregationPipeline {
    geocoder: Arc<dyn Geocoder>,
    pager: PlacesPager,
    enricher: BeachEnricher,
    engine: ScoreEngine,
    concurrency: usize,
    default_radius_m: u32,
}

fn advance(progress: &watch::Sender<PipelineState>, run_id: Uuid, next: PipelineState) {
    let current = *progress.borrow();
    if !current.can_transition_to(next) {
        tracing::warn!(%run_id, from = %current, to = %next, "Unexpected pipeline transition");
    }
    tracing::debug!(%run_id, from = %current, to = %next, "Pipeline transition");
    progress.send_replace(next);
}

impl AggregationPipeline {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        pager: PlacesPager,
        enricher: BeachEnricher,
        engine: ScoreEngine,
    ) -> Self {
        Self {
            geocoder,
            pager,
            enricher,
            engine,
            concurrency: 4,
            default_radius_m: 10_000,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_default_radius(mut self, radius_m: u32) -> Self {
        self.default_radius_m = radius_m;
        self
    }

    pub async fn run(
        &self,
        query: &SearchQuery,
        cancel: &CancellationToken,
        progress: &watch::Sender<PipelineState>,
    ) -> AppResult<SearchOutcome> {
        let run_id = Uuid::new_v4();
        let radius_m = query.radius.unwrap_or(self.default_radius_m);
        validate_radius(radius_m)?;
        let location = query.location()?;

        tracing::info!(%run_id, ?location, radius_m, "Starting beach search");
        advance(progress, run_id, PipelineState::Geocoding);

        let location = match self.resolve(location, cancel).await {
            Ok(location) => location,
            Err(AppError::Superseded) => return Err(AppError::Superseded),
            Err(e) => {
                tracing::info!(%run_id, error = %e, "Location could not be resolved");
                advance(progress, run_id, PipelineState::Error);
                return Err(e);
            }
        };

        advance(progress, run_id, PipelineState::Paging);
        let paged = match self.pager.fetch(&location.coordinates, radius_m, cancel).await {
            Ok(paged) => paged,
            Err(AppError::Superseded) => return Err(AppError::Superseded),
            Err(e) => {
                tracing::warn!(%run_id, error = %e, "Places search failed; treating as no beaches");
                Default::default()
            }
        };

        let mut outcome = SearchOutcome {
            run_id,
            location,
            radius_m,
            state: PipelineState::Empty,
            beaches: Vec::new(),
            candidates: paged.places.len(),
            skipped: SkipCounts::default(),
            pages: paged.pages,
        };

        if paged.places.is_empty() {
            advance(progress, run_id, PipelineState::Empty);
            tracing::info!(%run_id, pages = outcome.pages, "No candidate places");
            return Ok(outcome);
        }

        advance(progress, run_id, PipelineState::Enriching);
        let results: Vec<EnrichOutcome> = stream::iter(paged.places)
            .map(|place| self.enricher.enrich(place, cancel))
            .buffered(self.concurrency)
            .collect()
            .await;

        if cancel.is_cancelled() {
            return Err(AppError::Superseded);
        }

        let mut beaches = Vec::with_capacity(results.len());
        for result in results {
            match result {
                EnrichOutcome::Enriched(observation) => {
                    beaches.push(EnrichedBeach::from_observation(*observation, &self.engine))
                }
                EnrichOutcome::Skipped { reason, .. } => outcome.skipped.record(reason),
            }
        }

        outcome.beaches = BeachCollection::new(beaches).all().to_vec();
        outcome.state = if outcome.beaches.is_empty() {
            PipelineState::Empty
        } else {
            PipelineState::Ready
        };
        advance(progress, run_id, outcome.state);

        tracing::info!(
            %run_id,
            candidates = outcome.candidates,
            beaches = outcome.beaches.len(),
            skipped = outcome.skipped.total(),
            pages = outcome.pages,
            state = %outcome.state,
            "Beach search finished"
        );

        Ok(outcome)
    }

    async fn resolve(
        &self,
        location: SearchLocation,
        cancel: &CancellationToken,
    ) -> AppResult<ResolvedLocation> {
        match location {
            SearchLocation::Point(coordinates) => Ok(ResolvedLocation {
                name: None,
                coordinates,
            }),
            SearchLocation::City(city) => {
                let matches = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(AppError::Superseded),
                    matches = self.geocoder.geocode(&city, 1) => matches,
                };

                let first = matches
                    .map_err(|e| AppError::LocationNotFound(format!("{}: {}", city, e)))?
                    .into_iter()
                    .next()
                    .ok_or_else(|| AppError::LocationNotFound(city.clone()))?;

                let coordinates = first
                    .coordinates()
                    .map_err(|e| AppError::LocationNotFound(format!("{}: {}", city, e)))?;
                Ok(ResolvedLocation {
                    coordinates,
                    name: Some(first.display_name),
                })
            }
        }
    }
}
