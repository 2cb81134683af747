//! Per-place enrichment: marine, then weather, then optional crowd

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use shared::{BeachObservation, CandidatePlace};
use tokio_util::sync::CancellationToken;

use crate::external::{CrowdSource, MarineSource, WeatherSource};

/// Why a candidate place did not become a beach record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MarineUnavailable,
    NoWaveData,
    WeatherUnavailable,
    Cancelled,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MarineUnavailable => write!(f, "marine_unavailable"),
            SkipReason::NoWaveData => write!(f, "no_wave_data"),
            SkipReason::WeatherUnavailable => write!(f, "weather_unavailable"),
            SkipReason::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnrichOutcome {
    Enriched(Box<BeachObservation>),
    Skipped { place_id: String, reason: SkipReason },
}

async fn unless_cancelled<T>(
    cancel: &CancellationToken,
    work: impl Future<Output = T>,
) -> Option<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        out = work => Some(out),
    }
}

/// Looks up marine, weather and crowd data for one place at a time.
/// Holds no mutable state; siblings never affect each other.
#[derive(Clone)]
pub struct BeachEnricher {
    marine: Arc<dyn MarineSource>,
    weather: Arc<dyn WeatherSource>,
    crowd: Option<Arc<dyn CrowdSource>>,
}

impl BeachEnricher {
    pub fn new(
        marine: Arc<dyn MarineSource>,
        weather: Arc<dyn WeatherSource>,
        crowd: Option<Arc<dyn CrowdSource>>,
    ) -> Self {
        Self {
            marine,
            weather,
            crowd,
        }
    }

    pub async fn enrich(&self, place: CandidatePlace, cancel: &CancellationToken) -> EnrichOutcome {
        let skip = |reason: SkipReason, place: &CandidatePlace| {
            tracing::debug!(
                place_id = %place.place_id,
                name = %place.name,
                %reason,
                "Skipping place"
            );
            EnrichOutcome::Skipped {
                place_id: place.place_id.clone(),
                reason,
            }
        };

        let request = self.marine.marine_snapshot(&place.coordinates);
        let marine = match unless_cancelled(cancel, request).await {
            None => return skip(SkipReason::Cancelled, &place),
            Some(Err(e)) => {
                tracing::debug!(place_id = %place.place_id, error = %e, "Marine lookup failed");
                return skip(SkipReason::MarineUnavailable, &place);
            }
            Some(Ok(marine)) if !marine.has_wave_data() => {
                return skip(SkipReason::NoWaveData, &place)
            }
            Some(Ok(marine)) => marine,
        };

        let request = self.weather.current_at(&place.coordinates);
        let weather = match unless_cancelled(cancel, request).await {
            None => return skip(SkipReason::Cancelled, &place),
            Some(Err(e)) => {
                tracing::debug!(place_id = %place.place_id, error = %e, "Weather lookup failed");
                return skip(SkipReason::WeatherUnavailable, &place);
            }
            Some(Ok(weather)) => weather,
        };

        let crowd = match &self.crowd {
            Some(source) => {
                let address = place.best_address();
                match unless_cancelled(cancel, source.crowd_reading(&place.name, &address)).await {
                    None => return skip(SkipReason::Cancelled, &place),
                    Some(Ok(reading)) => reading,
                    Some(Err(e)) => {
                        tracing::debug!(
                            place_id = %place.place_id,
                            error = %e,
                            "Crowd lookup failed"
                        );
                        None
                    }
                }
            }
            None => None,
        };

        EnrichOutcome::Enriched(Box::new(BeachObservation {
            place,
            marine,
            weather,
            crowd,
        }))
    }
}
