//! Common types used across the platform

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Coordinates {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl Coordinates {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build from floats. Fails for non-finite values and for magnitudes a
    /// `Decimal` cannot hold; range checks are left to `validate_coordinates`.
    pub fn from_f64(latitude: f64, longitude: f64) -> Result<Self, &'static str> {
        Ok(Self {
            latitude: component(latitude)?,
            longitude: component(longitude)?,
        })
    }
}

fn component(value: f64) -> Result<Decimal, &'static str> {
    if !value.is_finite() {
        return Err("Coordinates must be finite numbers");
    }
    Decimal::from_f64(value)
        .map(|d| d.normalize())
        .ok_or("Coordinates are out of range")
}

impl fmt::Display for Coordinates {
    /// `lat,lon`, the form the places API takes as `location`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Which view the client is rendering; picks the advisory wording
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Normal,
    Surfer,
}

impl FromStr for ViewMode {
    type Err = String;

    /// `normal` (also the empty string) or `surfer`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "normal" => Ok(ViewMode::Normal),
            "surfer" => Ok(ViewMode::Surfer),
            other => Err(format!("Unknown mode: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_lat_comma_lon() {
        let coords = Coordinates::new(
            Decimal::from_str("50.8225").unwrap(),
            Decimal::from_str("-0.1372").unwrap(),
        );
        assert_eq!(coords.to_string(), "50.8225,-0.1372");
    }

    #[test]
    fn test_from_f64_keeps_short_form() {
        let coords = Coordinates::from_f64(50.8225, -0.1372).unwrap();
        assert_eq!(coords.latitude, Decimal::from_str("50.8225").unwrap());
        assert_eq!(coords.longitude, Decimal::from_str("-0.1372").unwrap());
    }

    #[test]
    fn test_from_f64_rejects_unrepresentable_values() {
        assert!(Coordinates::from_f64(1e30, 0.0).is_err());
        assert!(Coordinates::from_f64(0.0, -1e30).is_err());
        assert!(Coordinates::from_f64(f64::NAN, 0.0).is_err());
        assert!(Coordinates::from_f64(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_from_f64_leaves_range_to_validation() {
        let coords = Coordinates::from_f64(120.0, 0.0).unwrap();
        assert!(crate::validation::validate_coordinates(&coords).is_err());
    }

    #[test]
    fn test_view_mode_serde() {
        let mode: ViewMode = serde_json::from_str("\"surfer\"").unwrap();
        assert_eq!(mode, ViewMode::Surfer);
        assert_eq!(ViewMode::default(), ViewMode::Normal);
    }

    #[test]
    fn test_view_mode_from_str() {
        assert_eq!("".parse::<ViewMode>().unwrap(), ViewMode::Normal);
        assert_eq!(" surfer ".parse::<ViewMode>().unwrap(), ViewMode::Surfer);
        assert_eq!("kite".parse::<ViewMode>().unwrap_err(), "Unknown mode: kite");
    }
}
