//! Crowd (foot-traffic) models

use serde::{Deserialize, Serialize};

/// Busyness at or below this is Low
pub const CROWD_LOW_MAX_PERCENT: u8 = 30;
/// Busyness at or below this (and above Low) is Moderate
pub const CROWD_MODERATE_MAX_PERCENT: u8 = 70;

/// Three-level crowd category, plus Unknown when no reading exists
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CrowdLevel {
    Low,
    Moderate,
    High,
    Unknown,
}

impl CrowdLevel {
    pub fn from_percent(percent: u8) -> Self {
        if percent <= CROWD_LOW_MAX_PERCENT {
            CrowdLevel::Low
        } else if percent <= CROWD_MODERATE_MAX_PERCENT {
            CrowdLevel::Moderate
        } else {
            CrowdLevel::High
        }
    }

    /// Points added to the raw beach score
    pub fn score_adjustment(&self) -> i32 {
        match self {
            CrowdLevel::Low => 1,
            CrowdLevel::Moderate | CrowdLevel::Unknown => 0,
            CrowdLevel::High => -1,
        }
    }
}

impl std::fmt::Display for CrowdLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrowdLevel::Low => write!(f, "Low"),
            CrowdLevel::Moderate => write!(f, "Moderate"),
            CrowdLevel::High => write!(f, "High"),
            CrowdLevel::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Where a busyness value came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CrowdSourceKind {
    Live,
    Forecast,
}

/// A busyness reading for one venue
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrowdReading {
    pub busyness_percent: u8,
    pub level: CrowdLevel,
    pub source: CrowdSourceKind,
}

impl CrowdReading {
    /// Values above 100 are clamped
    pub fn new(busyness_percent: u8, source: CrowdSourceKind) -> Self {
        let busyness_percent = busyness_percent.min(100);
        Self {
            busyness_percent,
            level: CrowdLevel::from_percent(busyness_percent),
            source,
        }
    }
}
