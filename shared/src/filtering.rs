//! Categorical filters over enriched beaches
//!
//! Every axis is independent and the selected axes are AND-combined. Filters
//! are always evaluated against the full collection, never a previous result.

use serde::{Deserialize, Serialize};

use crate::models::{CrowdLevel, EnrichedBeach, MarineReading};

/// Position of a value relative to two cut points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Low,
    Mid,
    High,
}

/// `value < low_max` is Low, `value > high_min` is High, the closed range in
/// between is Mid
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LevelCuts {
    pub low_max: f64,
    pub high_min: f64,
}

impl LevelCuts {
    pub const fn new(low_max: f64, high_min: f64) -> Self {
        Self { low_max, high_min }
    }

    pub fn tier(&self, value: f64) -> Tier {
        if value < self.low_max {
            Tier::Low
        } else if value <= self.high_min {
            Tier::Mid
        } else {
            Tier::High
        }
    }
}

/// Cut points per measured axis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterBands {
    /// Wind-wave height, meters
    pub wind: LevelCuts,
    /// Wave height, meters
    pub wave: LevelCuts,
    /// Swell-wave height, meters
    pub swell: LevelCuts,
}

impl Default for FilterBands {
    fn default() -> Self {
        Self {
            wind: LevelCuts::new(0.5, 1.5),
            wave: LevelCuts::new(0.5, 2.0),
            swell: LevelCuts::new(0.5, 1.5),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WindLevel {
    Light,
    Medium,
    Strong,
}

impl WindLevel {
    fn tier(self) -> Tier {
        match self {
            WindLevel::Light => Tier::Low,
            WindLevel::Medium => Tier::Mid,
            WindLevel::Strong => Tier::High,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WaveLevel {
    Small,
    Medium,
    Large,
}

impl WaveLevel {
    fn tier(self) -> Tier {
        match self {
            WaveLevel::Small => Tier::Low,
            WaveLevel::Medium => Tier::Mid,
            WaveLevel::Large => Tier::High,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SwellLevel {
    Low,
    Medium,
    High,
}

impl SwellLevel {
    fn tier(self) -> Tier {
        match self {
            SwellLevel::Low => Tier::Low,
            SwellLevel::Medium => Tier::Mid,
            SwellLevel::High => Tier::High,
        }
    }
}

/// User-selected bins; `None` on an axis means no constraint
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FilterCriteria {
    pub wind: Option<WindLevel>,
    pub wave: Option<WaveLevel>,
    pub swell: Option<SwellLevel>,
    /// Compared against the derived crowd category
    pub crowd: Option<CrowdLevel>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.wind.is_none() && self.wave.is_none() && self.swell.is_none() && self.crowd.is_none()
    }
}

fn in_tier(cuts: &LevelCuts, value: Option<f64>, wanted: Tier) -> bool {
    value.map(|v| !v.is_nan() && cuts.tier(v) == wanted).unwrap_or(false)
}

/// Pure filter over a band table
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterEngine {
    pub bands: FilterBands,
}

impl FilterEngine {
    pub fn new(bands: FilterBands) -> Self {
        Self { bands }
    }

    pub fn matches(&self, beach: &EnrichedBeach, criteria: &FilterCriteria) -> bool {
        self.matches_reading(&beach.current(), beach.crowd_level(), criteria)
    }

    /// Same test over a bare reading, for callers that only hold summaries
    pub fn matches_reading(
        &self,
        current: &MarineReading,
        crowd_level: CrowdLevel,
        criteria: &FilterCriteria,
    ) -> bool {
        let wind = criteria
            .wind
            .map(|level| in_tier(&self.bands.wind, current.wind_wave_height, level.tier()))
            .unwrap_or(true);
        let wave = criteria
            .wave
            .map(|level| in_tier(&self.bands.wave, current.wave_height, level.tier()))
            .unwrap_or(true);
        let swell = criteria
            .swell
            .map(|level| in_tier(&self.bands.swell, current.swell_wave_height, level.tier()))
            .unwrap_or(true);
        let crowd = criteria
            .crowd
            .map(|level| level != CrowdLevel::Unknown && crowd_level == level)
            .unwrap_or(true);

        wind && wave && swell && crowd
    }

    /// Subset of `all` in original order
    pub fn filter<'a>(
        &self,
        all: &'a [EnrichedBeach],
        criteria: &FilterCriteria,
    ) -> Vec<&'a EnrichedBeach> {
        all.iter()
            .filter(|beach| self.matches(beach, criteria))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_cuts_edges() {
        let cuts = LevelCuts::new(0.5, 1.5);
        assert_eq!(cuts.tier(0.0), Tier::Low);
        assert_eq!(cuts.tier(0.49), Tier::Low);
        assert_eq!(cuts.tier(0.5), Tier::Mid);
        assert_eq!(cuts.tier(1.5), Tier::Mid);
        assert_eq!(cuts.tier(1.51), Tier::High);
    }

    #[test]
    fn test_missing_value_never_matches() {
        let cuts = LevelCuts::new(0.5, 1.5);
        assert!(!in_tier(&cuts, None, Tier::Low));
        assert!(!in_tier(&cuts, Some(f64::NAN), Tier::High));
        assert!(in_tier(&cuts, Some(0.1), Tier::Low));
    }

    #[test]
    fn test_criteria_serde_names() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"wave":"Small","crowd":"Low"}"#).unwrap();
        assert_eq!(criteria.wave, Some(WaveLevel::Small));
        assert_eq!(criteria.crowd, Some(CrowdLevel::Low));
        assert_eq!(criteria.wind, None);
        assert!(!criteria.is_empty());
        assert!(FilterCriteria::default().is_empty());
    }
}
