//! Enriched beach records

use serde::{Deserialize, Serialize};

use super::{
    CandidatePlace, CrowdLevel, CrowdReading, MarineReading, MarineSnapshot, WeatherSnapshot,
};
use crate::scoring::{BeachConditions, ScoreCategory, ScoreEngine};
use crate::types::Coordinates;

/// Everything fetched for one place, before scoring
#[derive(Debug, Clone, PartialEq)]
pub struct BeachObservation {
    pub place: CandidatePlace,
    pub marine: MarineSnapshot,
    pub weather: WeatherSnapshot,
    pub crowd: Option<CrowdReading>,
}

impl BeachObservation {
    pub fn conditions(&self) -> BeachConditions {
        conditions_of(&self.marine.current(), &self.weather, self.crowd.as_ref())
    }
}

fn conditions_of(
    reading: &MarineReading,
    weather: &WeatherSnapshot,
    crowd: Option<&CrowdReading>,
) -> BeachConditions {
    BeachConditions {
        wave_height: reading.wave_height,
        wave_direction: reading.wave_direction,
        wave_period: reading.wave_period,
        wind_wave_height: reading.wind_wave_height,
        wind_wave_direction: reading.wind_wave_direction,
        swell_wave_height: reading.swell_wave_height,
        swell_wave_direction: reading.swell_wave_direction,
        temperature_celsius: Some(weather.temperature_celsius),
        crowd: crowd.map(|c| c.level),
    }
}

/// A candidate place with marine, weather and optional crowd data, scored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedBeach {
    pub place_id: String,
    pub name: String,
    pub coordinates: Coordinates,
    pub rating: Option<f64>,
    pub photo_reference: Option<String>,
    pub address: Option<String>,
    pub marine: MarineSnapshot,
    pub weather: WeatherSnapshot,
    pub crowd: Option<CrowdReading>,
    pub score_points: i32,
    pub score: ScoreCategory,
}

impl EnrichedBeach {
    pub fn from_observation(observation: BeachObservation, engine: &ScoreEngine) -> Self {
        let breakdown = engine.breakdown(&observation.conditions());
        let BeachObservation {
            place,
            marine,
            weather,
            crowd,
        } = observation;

        Self {
            photo_reference: place.first_photo().map(str::to_string),
            place_id: place.place_id,
            name: place.name,
            coordinates: place.coordinates,
            rating: place.rating,
            address: place.address,
            marine,
            weather,
            crowd,
            score_points: breakdown.total,
            score: breakdown.category,
        }
    }

    pub fn current(&self) -> MarineReading {
        self.marine.current()
    }

    pub fn conditions(&self) -> BeachConditions {
        conditions_of(&self.marine.current(), &self.weather, self.crowd.as_ref())
    }

    /// `Unknown` when the crowd source had nothing for this venue
    pub fn crowd_level(&self) -> CrowdLevel {
        self.crowd.map(|c| c.level).unwrap_or(CrowdLevel::Unknown)
    }

    pub fn summary(&self) -> BeachSummary {
        BeachSummary {
            place_id: self.place_id.clone(),
            name: self.name.clone(),
            coordinates: self.coordinates,
            rating: self.rating,
            photo_reference: self.photo_reference.clone(),
            temperature_celsius: self.weather.temperature_celsius,
            description: self.weather.description.clone(),
            current: self.current(),
            crowd_level: self.crowd_level(),
            crowd_percent: self.crowd.map(|c| c.busyness_percent),
            score_points: self.score_points,
            score: self.score,
        }
    }
}

/// Card-sized view of a record for list responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BeachSummary {
    pub place_id: String,
    pub name: String,
    pub coordinates: Coordinates,
    pub rating: Option<f64>,
    pub photo_reference: Option<String>,
    pub temperature_celsius: f64,
    pub description: String,
    pub current: MarineReading,
    pub crowd_level: CrowdLevel,
    pub crowd_percent: Option<u8>,
    pub score_points: i32,
    pub score: ScoreCategory,
}
