//! Beach suitability scoring
//!
//! Each physical axis contributes 0, 1 or 2 points depending on whether its
//! value falls in the ideal band, the near band, or neither. The raw total
//! (max 14) is optionally adjusted by the crowd level and then classified.
//! All band edges and thresholds are data in [`ScoreBands`] and
//! [`ScoreThresholds`].

use std::ops::Bound;

use serde::{Deserialize, Serialize};

use crate::models::CrowdLevel;

/// An interval over f64 with independently open/closed ends
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Span {
    pub lower: Bound<f64>,
    pub upper: Bound<f64>,
}

impl Span {
    /// `[lo, hi]`
    pub const fn closed(lo: f64, hi: f64) -> Self {
        Self {
            lower: Bound::Included(lo),
            upper: Bound::Included(hi),
        }
    }

    /// `(-inf, hi)`
    pub const fn below(hi: f64) -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Excluded(hi),
        }
    }

    /// `(-inf, hi]`
    pub const fn at_most(hi: f64) -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Included(hi),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        if value.is_nan() {
            return false;
        }
        let above_lower = match self.lower {
            Bound::Included(lo) => value >= lo,
            Bound::Excluded(lo) => value > lo,
            Bound::Unbounded => true,
        };
        let below_upper = match self.upper {
            Bound::Included(hi) => value <= hi,
            Bound::Excluded(hi) => value < hi,
            Bound::Unbounded => true,
        };
        above_lower && below_upper
    }
}

/// Ideal and near bands for one axis. `near` is the outer band; it is only
/// consulted when the value misses `ideal`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AxisBand {
    pub ideal: Span,
    pub near: Span,
}

impl AxisBand {
    pub const IDEAL_POINTS: i32 = 2;
    pub const NEAR_POINTS: i32 = 1;

    pub const fn new(ideal: Span, near: Span) -> Self {
        Self { ideal, near }
    }

    /// Missing values score nothing
    pub fn points(&self, value: Option<f64>) -> i32 {
        match value {
            Some(v) if self.ideal.contains(v) => Self::IDEAL_POINTS,
            Some(v) if self.near.contains(v) => Self::NEAR_POINTS,
            _ => 0,
        }
    }
}

/// Band table for every scored axis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoreBands {
    /// Wave height, meters
    pub wave_height: AxisBand,
    /// Wave period, seconds
    pub wave_period: AxisBand,
    /// |wave direction - swell direction|, degrees
    pub direction_spread: AxisBand,
    /// Wind-wave height, meters
    pub wind_wave_height: AxisBand,
    /// |wind-wave direction - reference|, degrees
    pub wind_wave_direction: AxisBand,
    pub wind_reference_deg: f64,
    /// Swell-wave height, meters
    pub swell_wave_height: AxisBand,
    /// Air temperature, celsius
    pub temperature: AxisBand,
}

impl Default for ScoreBands {
    fn default() -> Self {
        Self {
            wave_height: AxisBand::new(Span::closed(1.5, 3.0), Span::closed(1.0, 4.0)),
            wave_period: AxisBand::new(Span::closed(10.0, 15.0), Span::closed(8.0, 18.0)),
            direction_spread: AxisBand::new(Span::at_most(30.0), Span::at_most(60.0)),
            wind_wave_height: AxisBand::new(Span::below(0.5), Span::at_most(1.0)),
            wind_wave_direction: AxisBand::new(Span::at_most(45.0), Span::at_most(90.0)),
            wind_reference_deg: 180.0,
            swell_wave_height: AxisBand::new(Span::closed(1.0, 2.5), Span::closed(0.5, 3.5)),
            temperature: AxisBand::new(Span::closed(20.0, 30.0), Span::closed(15.0, 35.0)),
        }
    }
}

/// Category cut points. With a crowd term both cuts move up by `crowd_shift`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoreThresholds {
    pub poor_max: i32,
    pub ok_max: i32,
    pub crowd_shift: i32,
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            poor_max: 5,
            ok_max: 10,
            crowd_shift: 1,
        }
    }
}

/// Final beach quality category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScoreCategory {
    Poor,
    Ok,
    Good,
}

impl std::fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreCategory::Poor => write!(f, "POOR"),
            ScoreCategory::Ok => write!(f, "OK"),
            ScoreCategory::Good => write!(f, "GOOD"),
        }
    }
}

/// Everything the score looks at, flattened from marine + weather + crowd
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct BeachConditions {
    pub wave_height: Option<f64>,
    pub wave_direction: Option<f64>,
    pub wave_period: Option<f64>,
    pub wind_wave_height: Option<f64>,
    pub wind_wave_direction: Option<f64>,
    pub swell_wave_height: Option<f64>,
    pub swell_wave_direction: Option<f64>,
    pub temperature_celsius: Option<f64>,
    /// `None` (or `Unknown`) means no crowd reading
    pub crowd: Option<CrowdLevel>,
}

/// Per-axis points and the resulting category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub wave_height: i32,
    pub wave_period: i32,
    pub direction_spread: i32,
    pub wind_wave_height: i32,
    pub wind_wave_direction: i32,
    pub swell_wave_height: i32,
    pub temperature: i32,
    /// Sum of the axis points, 0..=14
    pub raw: i32,
    pub crowd_adjustment: Option<i32>,
    pub total: i32,
    pub category: ScoreCategory,
}

/// Pure scorer over a fixed band table
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoreEngine {
    pub bands: ScoreBands,
    pub thresholds: ScoreThresholds,
}

impl ScoreEngine {
    pub fn new(bands: ScoreBands, thresholds: ScoreThresholds) -> Self {
        Self { bands, thresholds }
    }

    pub fn score(&self, conditions: &BeachConditions) -> ScoreCategory {
        self.breakdown(conditions).category
    }

    pub fn breakdown(&self, c: &BeachConditions) -> ScoreBreakdown {
        let b = &self.bands;

        let spread = match (c.wave_direction, c.swell_wave_direction) {
            (Some(wave), Some(swell)) => Some((wave - swell).abs()),
            _ => None,
        };
        let wind_offset = c
            .wind_wave_direction
            .map(|dir| (dir - b.wind_reference_deg).abs());

        let wave_height = b.wave_height.points(c.wave_height);
        let wave_period = b.wave_period.points(c.wave_period);
        let direction_spread = b.direction_spread.points(spread);
        let wind_wave_height = b.wind_wave_height.points(c.wind_wave_height);
        let wind_wave_direction = b.wind_wave_direction.points(wind_offset);
        let swell_wave_height = b.swell_wave_height.points(c.swell_wave_height);
        let temperature = b.temperature.points(c.temperature_celsius);

        let raw = wave_height
            + wave_period
            + direction_spread
            + wind_wave_height
            + wind_wave_direction
            + swell_wave_height
            + temperature;

        let crowd_adjustment = c
            .crowd
            .filter(|level| *level != CrowdLevel::Unknown)
            .map(|level| level.score_adjustment());
        let total = raw + crowd_adjustment.unwrap_or(0);

        ScoreBreakdown {
            wave_height,
            wave_period,
            direction_spread,
            wind_wave_height,
            wind_wave_direction,
            swell_wave_height,
            temperature,
            raw,
            crowd_adjustment,
            total,
            category: self.classify(total, crowd_adjustment.is_some()),
        }
    }

    /// With a crowd reading both cut points move up by `crowd_shift`
    pub fn classify(&self, total: i32, has_crowd: bool) -> ScoreCategory {
        let shift = if has_crowd {
            self.thresholds.crowd_shift
        } else {
            0
        };
        if total <= self.thresholds.poor_max + shift {
            ScoreCategory::Poor
        } else if total <= self.thresholds.ok_max + shift {
            ScoreCategory::Ok
        } else {
            ScoreCategory::Good
        }
    }
}
