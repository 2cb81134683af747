//! Weather data models

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Coordinates, ViewMode};

/// Current conditions at a coordinate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    pub observed_at: DateTime<Utc>,
    pub temperature_celsius: f64,
    pub feels_like_celsius: f64,
    pub temp_min_celsius: f64,
    pub temp_max_celsius: f64,
    pub humidity_percent: i32,
    pub pressure_hpa: i32,
    pub wind_speed_mps: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_direction_deg: Option<i32>,
    /// Provider condition id (e.g. 800 for clear sky)
    pub condition_code: i32,
    pub condition: String,
    pub description: String,
    pub icon: String,
}

impl WeatherSnapshot {
    pub fn condition_group(&self) -> ConditionGroup {
        ConditionGroup::from_code(self.condition_code)
    }
}

/// Current conditions for a named city, as shown in the header of both views
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CityWeather {
    pub name: String,
    pub country: Option<String>,
    pub coordinates: Coordinates,
    pub timezone_offset_seconds: i32,
    pub current: WeatherSnapshot,
}

impl CityWeather {
    /// Wall-clock time at the city
    pub fn local_time(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        let offset = FixedOffset::east_opt(self.timezone_offset_seconds).unwrap_or(Utc.fix());
        now.with_timezone(&offset)
    }
}

/// One step of the short-range forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastStep {
    pub timestamp: DateTime<Utc>,
    pub temperature_celsius: f64,
    pub condition_code: i32,
    pub description: String,
    pub icon: String,
    /// Probability of precipitation (0-1)
    pub pop: f64,
}

/// Condition groups keyed by provider condition id ranges
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConditionGroup {
    /// 200-232
    Thunderstorm,
    /// 300-321
    Drizzle,
    /// 500-531
    Rain,
    /// 600-622
    Snow,
    /// 701-781
    Fog,
    /// 800
    Clear,
    /// 801-804
    Clouds,
    Unknown,
}

impl ConditionGroup {
    pub fn from_code(code: i32) -> Self {
        match code {
            200..=232 => ConditionGroup::Thunderstorm,
            300..=321 => ConditionGroup::Drizzle,
            500..=531 => ConditionGroup::Rain,
            600..=622 => ConditionGroup::Snow,
            701..=781 => ConditionGroup::Fog,
            800 => ConditionGroup::Clear,
            801..=804 => ConditionGroup::Clouds,
            _ => ConditionGroup::Unknown,
        }
    }

    /// Short advisory line shown next to the current conditions
    pub fn advisory(&self, mode: ViewMode) -> &'static str {
        match (mode, self) {
            (ViewMode::Normal, ConditionGroup::Thunderstorm) => {
                "There is a thunderstorm coming! Stay inside."
            }
            (ViewMode::Normal, ConditionGroup::Drizzle | ConditionGroup::Rain) => {
                "Do not forget your umbrella!"
            }
            (ViewMode::Normal, ConditionGroup::Snow) => "It is snowing! Go outside make a snowman!",
            (ViewMode::Normal, ConditionGroup::Fog) => "It is foggy! Drive safe!",
            (ViewMode::Normal, ConditionGroup::Clear) => "Do not forget your sunscreen!",
            (ViewMode::Normal, ConditionGroup::Clouds) => "Cloudy skies ahead!",
            (ViewMode::Normal, ConditionGroup::Unknown) => "Check the weather!",
            (ViewMode::Surfer, ConditionGroup::Thunderstorm) => {
                "Storm incoming! Stay out of the water."
            }
            (ViewMode::Surfer, ConditionGroup::Drizzle) => "Light rain? Could be glassy waves!",
            (ViewMode::Surfer, ConditionGroup::Rain) => "Rain's fine, just watch for currents!",
            (ViewMode::Surfer, ConditionGroup::Snow) => "Snowy surf? Only for the bold!",
            (ViewMode::Surfer, ConditionGroup::Fog) => "Foggy lineup, stay aware!",
            (ViewMode::Surfer, ConditionGroup::Clear) => "Sunny and clean! Sunscreen up!",
            (ViewMode::Surfer, ConditionGroup::Clouds) => "Cloudy but surf's still up!",
            (ViewMode::Surfer, ConditionGroup::Unknown) => "Check the surf report!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_condition_group_ranges() {
        assert_eq!(ConditionGroup::from_code(200), ConditionGroup::Thunderstorm);
        assert_eq!(ConditionGroup::from_code(232), ConditionGroup::Thunderstorm);
        assert_eq!(ConditionGroup::from_code(311), ConditionGroup::Drizzle);
        assert_eq!(ConditionGroup::from_code(500), ConditionGroup::Rain);
        assert_eq!(ConditionGroup::from_code(601), ConditionGroup::Snow);
        assert_eq!(ConditionGroup::from_code(741), ConditionGroup::Fog);
        assert_eq!(ConditionGroup::from_code(800), ConditionGroup::Clear);
        assert_eq!(ConditionGroup::from_code(804), ConditionGroup::Clouds);
        assert_eq!(ConditionGroup::from_code(900), ConditionGroup::Unknown);
        assert_eq!(ConditionGroup::from_code(250), ConditionGroup::Unknown);
    }

    #[test]
    fn test_advisory_depends_on_mode() {
        let group = ConditionGroup::Thunderstorm;
        assert_ne!(group.advisory(ViewMode::Normal), group.advisory(ViewMode::Surfer));
        assert_eq!(
            ConditionGroup::Unknown.advisory(ViewMode::Surfer),
            "Check the surf report!"
        );
    }

    #[test]
    fn test_local_time_applies_offset() {
        let city = CityWeather {
            name: "Brighton".to_string(),
            country: Some("GB".to_string()),
            coordinates: Coordinates::from_f64(50.8284, -0.1395).unwrap(),
            timezone_offset_seconds: 3600,
            current: WeatherSnapshot {
                observed_at: Utc::now(),
                temperature_celsius: 18.0,
                feels_like_celsius: 17.5,
                temp_min_celsius: 16.0,
                temp_max_celsius: 19.0,
                humidity_percent: 70,
                pressure_hpa: 1015,
                wind_speed_mps: 4.0,
                wind_direction_deg: Some(220),
                condition_code: 801,
                condition: "Clouds".to_string(),
                description: "few clouds".to_string(),
                icon: "02d".to_string(),
            },
        };
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
        assert_eq!(city.local_time(now).format("%H:%M").to_string(), "13:00");
    }
}
