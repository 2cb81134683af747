//! In-memory providers shared by the integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use beach_finder_backend::external::{
    CrowdSource, Geocoder, LocationSuggestion, MarineSource, PlacesPage, PlacesSource,
    WeatherSource,
};
use beach_finder_backend::{AppError, AppResult, Config, Sources};
use chrono::{NaiveDate, TimeZone, Utc};
use shared::{
    CandidatePlace, CityWeather, Coordinates, CrowdReading, ForecastStep, MarineSnapshot,
    WeatherSnapshot,
};
use tokio::time::Instant;

pub fn place(id: &str, lat: f64, lon: f64) -> CandidatePlace {
    CandidatePlace {
        place_id: id.to_string(),
        name: format!("{} Beach", id),
        coordinates: Coordinates::from_f64(lat, lon).unwrap(),
        rating: Some(4.2),
        photo_references: vec![format!("{}-photo", id)],
        address: Some(format!("{} Seafront", id)),
    }
}

/// Marine snapshot with three hourly samples; only the first drives scoring
pub fn marine(wave: Option<f64>, wind_wave: f64, swell: f64) -> MarineSnapshot {
    let start = NaiveDate::from_ymd_opt(2024, 7, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();
    MarineSnapshot {
        timezone: "Europe/London".to_string(),
        times: (0..3).map(|h| start + chrono::Duration::hours(h)).collect(),
        wave_height: vec![wave, wave, wave],
        wave_direction: vec![Some(250.0); 3],
        wave_period: vec![Some(12.0); 3],
        wind_wave_height: vec![Some(wind_wave); 3],
        wind_wave_direction: vec![Some(200.0); 3],
        swell_wave_height: vec![Some(swell); 3],
        swell_wave_direction: vec![Some(240.0); 3],
        ..Default::default()
    }
}

pub fn weather(temperature: f64) -> WeatherSnapshot {
    WeatherSnapshot {
        observed_at: Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap(),
        temperature_celsius: temperature,
        feels_like_celsius: temperature,
        temp_min_celsius: temperature - 2.0,
        temp_max_celsius: temperature + 2.0,
        humidity_percent: 65,
        pressure_hpa: 1014,
        wind_speed_mps: 3.5,
        wind_direction_deg: Some(210),
        condition_code: 800,
        condition: "Clear".to_string(),
        description: "clear sky".to_string(),
        icon: "01d".to_string(),
    }
}

// ============================================================================
// Places
// ============================================================================

/// Serves `pages[n]` for token `page-n`; the first request has no token.
/// A center listed in `by_center` gets that single page instead.
#[derive(Default)]
pub struct FakePlaces {
    pages: Vec<Result<Vec<CandidatePlace>, String>>,
    pub by_center: HashMap<Coordinates, Vec<CandidatePlace>>,
    /// Keep handing out tokens past the last page
    endless: bool,
    pub calls: Mutex<Vec<(Instant, Option<String>)>>,
}

impl FakePlaces {
    pub fn new(pages: Vec<Result<Vec<CandidatePlace>, String>>) -> Self {
        Self {
            pages,
            ..Default::default()
        }
    }

    pub fn endless(places: Vec<CandidatePlace>) -> Self {
        Self {
            pages: vec![Ok(places)],
            endless: true,
            ..Default::default()
        }
    }

    pub fn with_center(mut self, center: Coordinates, places: Vec<CandidatePlace>) -> Self {
        self.by_center.insert(center, places);
        self
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PlacesSource for FakePlaces {
    async fn nearby_page(
        &self,
        center: &Coordinates,
        _radius_m: u32,
        page_token: Option<&str>,
    ) -> AppResult<PlacesPage> {
        self.calls
            .lock()
            .unwrap()
            .push((Instant::now(), page_token.map(str::to_string)));

        if let Some(places) = self.by_center.get(center) {
            return Ok(PlacesPage {
                places: places.clone(),
                next_page_token: None,
            });
        }

        let index = page_token
            .and_then(|t| t.strip_prefix("page-"))
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(0);

        if self.endless {
            let places = self.pages[0].clone().map_err(AppError::Upstream)?;
            return Ok(PlacesPage {
                places,
                next_page_token: Some(format!("page-{}", index + 1)),
            });
        }

        let places = self
            .pages
            .get(index)
            .cloned()
            .unwrap_or_else(|| Err("unknown page token".to_string()))
            .map_err(AppError::Upstream)?;
        let next_page_token = (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1));

        Ok(PlacesPage {
            places,
            next_page_token,
        })
    }
}

// ============================================================================
// Marine / weather / crowd
// ============================================================================

#[derive(Default)]
pub struct FakeMarine {
    pub by_place: HashMap<Coordinates, Result<MarineSnapshot, String>>,
    /// Artificial latency per place
    pub delays: HashMap<Coordinates, Duration>,
}

#[async_trait]
impl MarineSource for FakeMarine {
    async fn marine_snapshot(&self, at: &Coordinates) -> AppResult<MarineSnapshot> {
        if let Some(delay) = self.delays.get(at) {
            tokio::time::sleep(*delay).await;
        }
        self.by_place
            .get(at)
            .cloned()
            .unwrap_or_else(|| Err("no marine data".to_string()))
            .map_err(AppError::Upstream)
    }
}

#[derive(Default)]
pub struct FakeWeather {
    pub by_place: HashMap<Coordinates, Result<WeatherSnapshot, String>>,
    pub cities: HashMap<String, CityWeather>,
    pub forecast: Vec<ForecastStep>,
}

#[async_trait]
impl WeatherSource for FakeWeather {
    async fn current_at(&self, at: &Coordinates) -> AppResult<WeatherSnapshot> {
        self.by_place
            .get(at)
            .cloned()
            .unwrap_or_else(|| Ok(weather(22.0)))
            .map_err(AppError::Upstream)
    }

    async fn city_weather(&self, city: &str) -> AppResult<CityWeather> {
        self.cities
            .get(&city.to_lowercase())
            .cloned()
            .ok_or_else(|| AppError::LocationNotFound(city.to_string()))
    }

    async fn forecast_at(&self, _at: &Coordinates, steps: u32) -> AppResult<Vec<ForecastStep>> {
        Ok(self.forecast.iter().take(steps as usize).cloned().collect())
    }
}

#[derive(Default)]
pub struct FakeCrowd {
    pub by_name: HashMap<String, Result<Option<CrowdReading>, String>>,
}

#[async_trait]
impl CrowdSource for FakeCrowd {
    async fn crowd_reading(
        &self,
        venue_name: &str,
        _venue_address: &str,
    ) -> AppResult<Option<CrowdReading>> {
        self.by_name
            .get(venue_name)
            .cloned()
            .unwrap_or(Ok(None))
            .map_err(AppError::Upstream)
    }
}

// ============================================================================
// Geocoding
// ============================================================================

#[derive(Default)]
pub struct FakeGeocoder {
    pub cities: HashMap<String, (f64, f64)>,
    /// Artificial latency per city, to interleave searches
    pub delays: HashMap<String, Duration>,
    pub fail: bool,
    pub calls: Mutex<usize>,
}

impl FakeGeocoder {
    pub fn with_city(mut self, name: &str, lat: f64, lon: f64) -> Self {
        self.cities.insert(name.to_lowercase(), (lat, lon));
        self
    }

    pub fn with_delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_lowercase(), delay);
        self
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn geocode(&self, query: &str, limit: u32) -> AppResult<Vec<LocationSuggestion>> {
        *self.calls.lock().unwrap() += 1;
        if self.fail {
            return Err(AppError::Upstream("geocoder down".to_string()));
        }

        let key = query.to_lowercase();
        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }

        Ok(self
            .cities
            .iter()
            .filter(|(name, _)| name.starts_with(&key))
            .take(limit as usize)
            .map(|(name, (lat, lon))| {
                LocationSuggestion::new(name.clone(), None, "GB".to_string(), *lat, *lon)
            })
            .collect())
    }
}

// ============================================================================
// Wiring
// ============================================================================

pub fn test_config() -> Config {
    let mut config = Config::load().expect("default config loads");
    config.places.max_pages = 3;
    config.places.page_delay_ms = 2000;
    config.pipeline.enrichment_concurrency = 4;
    config.pipeline.default_radius_m = 10_000;
    config
}

pub fn sources(
    places: Arc<FakePlaces>,
    marine: FakeMarine,
    weather: FakeWeather,
    geocoder: FakeGeocoder,
    crowd: Option<FakeCrowd>,
) -> Sources {
    Sources {
        places,
        marine: Arc::new(marine),
        weather: Arc::new(weather),
        geocoder: Arc::new(geocoder),
        crowd: crowd.map(|c| Arc::new(c) as Arc<dyn CrowdSource>),
    }
}

/// Brighton fixture: five candidates over two pages.
///
/// `calm`, `glassy` and `big` have wave data; `inland` has a null first wave
/// sample and `pier` has no marine data at all.
pub fn brighton_places() -> Arc<FakePlaces> {
    Arc::new(brighton_pages())
}

pub fn brighton_pages() -> FakePlaces {
    FakePlaces::new(vec![
        Ok(vec![
            place("calm", 50.81, -0.13),
            place("inland", 50.85, -0.15),
            place("glassy", 50.82, -0.10),
        ]),
        Ok(vec![place("pier", 50.8195, -0.137), place("big", 50.79, -0.20)]),
    ])
}

pub fn brighton_marine() -> FakeMarine {
    let mut by_place = HashMap::new();
    by_place.insert(Coordinates::from_f64(50.81, -0.13).unwrap(), Ok(marine(Some(0.3), 0.2, 0.4)));
    by_place.insert(Coordinates::from_f64(50.85, -0.15).unwrap(), Ok(marine(None, 0.2, 0.4)));
    by_place.insert(Coordinates::from_f64(50.82, -0.10).unwrap(), Ok(marine(Some(0.45), 0.1, 0.3)));
    by_place.insert(Coordinates::from_f64(50.79, -0.20).unwrap(), Ok(marine(Some(2.0), 0.2, 1.5)));
    FakeMarine {
        by_place,
        ..Default::default()
    }
}
