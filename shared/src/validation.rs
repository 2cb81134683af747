//! Input validation for search requests

use rust_decimal::Decimal;

use crate::types::Coordinates;

/// Largest radius the places provider accepts for a nearby search
pub const MAX_SEARCH_RADIUS_METERS: u32 = 50_000;

/// Shortest query the geocoder is asked to complete
pub const MIN_SUGGESTION_QUERY_LEN: usize = 2;

/// Validate latitude is in [-90, 90] and longitude in [-180, 180]
pub fn validate_coordinates(coords: &Coordinates) -> Result<(), &'static str> {
    if coords.latitude < Decimal::from(-90) || coords.latitude > Decimal::from(90) {
        return Err("Latitude must be between -90 and 90");
    }
    if coords.longitude < Decimal::from(-180) || coords.longitude > Decimal::from(180) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Validate search radius in meters
pub fn validate_radius(radius_m: u32) -> Result<(), &'static str> {
    if radius_m == 0 {
        return Err("Radius must be positive");
    }
    if radius_m > MAX_SEARCH_RADIUS_METERS {
        return Err("Radius must not exceed 50000 meters");
    }
    Ok(())
}

/// Validate a city name typed into the search box
pub fn validate_city_name(city: &str) -> Result<(), &'static str> {
    let trimmed = city.trim();
    if trimmed.is_empty() {
        return Err("City name is required");
    }
    if trimmed.chars().count() > 100 {
        return Err("City name is too long");
    }
    Ok(())
}

/// Whether a partial query is long enough to ask for suggestions
pub fn is_suggestion_query(query: &str) -> bool {
    query.trim().chars().count() >= MIN_SUGGESTION_QUERY_LEN
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn coords(lat: &str, lon: &str) -> Coordinates {
        Coordinates::new(Decimal::from_str(lat).unwrap(), Decimal::from_str(lon).unwrap())
    }

    #[test]
    fn test_validate_coordinates_valid() {
        assert!(validate_coordinates(&coords("50.8225", "-0.1372")).is_ok());
        assert!(validate_coordinates(&coords("-90", "180")).is_ok());
        assert!(validate_coordinates(&coords("90", "-180")).is_ok());
    }

    #[test]
    fn test_validate_coordinates_invalid() {
        assert!(validate_coordinates(&coords("90.0001", "0")).is_err());
        assert!(validate_coordinates(&coords("0", "-180.5")).is_err());
    }

    #[test]
    fn test_validate_radius() {
        assert!(validate_radius(1).is_ok());
        assert!(validate_radius(10_000).is_ok());
        assert!(validate_radius(MAX_SEARCH_RADIUS_METERS).is_ok());
        assert!(validate_radius(0).is_err());
        assert!(validate_radius(MAX_SEARCH_RADIUS_METERS + 1).is_err());
    }

    #[test]
    fn test_validate_city_name() {
        assert!(validate_city_name("Brighton").is_ok());
        assert!(validate_city_name("   ").is_err());
        assert!(validate_city_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_suggestion_query_length() {
        assert!(!is_suggestion_query(""));
        assert!(!is_suggestion_query("B"));
        assert!(!is_suggestion_query(" B "));
        assert!(is_suggestion_query("Br"));
    }
}
