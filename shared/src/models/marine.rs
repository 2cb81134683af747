//! Marine conditions models
//!
//! A snapshot holds hourly series as returned by the marine provider: one
//! time axis plus one parallel series per variable, every sample nullable.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Unit label per marine variable
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarineUnits {
    pub wave_height: String,
    pub wave_direction: String,
    pub wave_period: String,
    pub wind_wave_height: String,
    pub wind_wave_direction: String,
    pub swell_wave_height: String,
    pub swell_wave_direction: String,
}

impl Default for MarineUnits {
    fn default() -> Self {
        Self {
            wave_height: "m".to_string(),
            wave_direction: "°".to_string(),
            wave_period: "s".to_string(),
            wind_wave_height: "m".to_string(),
            wind_wave_direction: "°".to_string(),
            swell_wave_height: "m".to_string(),
            swell_wave_direction: "°".to_string(),
        }
    }
}

/// Hourly marine series at one coordinate
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MarineSnapshot {
    pub timezone: String,
    pub times: Vec<NaiveDateTime>,
    pub units: MarineUnits,
    pub wave_height: Vec<Option<f64>>,
    pub wave_direction: Vec<Option<f64>>,
    pub wave_period: Vec<Option<f64>>,
    pub wind_wave_height: Vec<Option<f64>>,
    pub wind_wave_direction: Vec<Option<f64>>,
    pub swell_wave_height: Vec<Option<f64>>,
    pub swell_wave_direction: Vec<Option<f64>>,
}

/// Values of every marine variable at one instant
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MarineReading {
    pub wave_height: Option<f64>,
    pub wave_direction: Option<f64>,
    pub wave_period: Option<f64>,
    pub wind_wave_height: Option<f64>,
    pub wind_wave_direction: Option<f64>,
    pub swell_wave_height: Option<f64>,
    pub swell_wave_direction: Option<f64>,
}

/// One row of the series, for charting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarineSample {
    pub time: NaiveDateTime,
    #[serde(flatten)]
    pub reading: MarineReading,
}

fn at(series: &[Option<f64>], index: usize) -> Option<f64> {
    series.get(index).copied().flatten()
}

impl MarineSnapshot {
    /// A location counts as marine only if its first wave-height sample exists
    pub fn has_wave_data(&self) -> bool {
        at(&self.wave_height, 0).is_some()
    }

    pub fn reading_at(&self, index: usize) -> MarineReading {
        MarineReading {
            wave_height: at(&self.wave_height, index),
            wave_direction: at(&self.wave_direction, index),
            wave_period: at(&self.wave_period, index),
            wind_wave_height: at(&self.wind_wave_height, index),
            wind_wave_direction: at(&self.wind_wave_direction, index),
            swell_wave_height: at(&self.swell_wave_height, index),
            swell_wave_direction: at(&self.swell_wave_direction, index),
        }
    }

    /// First sample of every series
    pub fn current(&self) -> MarineReading {
        self.reading_at(0)
    }

    /// Time-aligned rows; series shorter than the time axis read as null
    pub fn samples(&self) -> Vec<MarineSample> {
        self.times
            .iter()
            .enumerate()
            .map(|(i, time)| MarineSample {
                time: *time,
                reading: self.reading_at(i),
            })
            .collect()
    }
}
