//! Stub providers shared by the unit tests.

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::{
    model::{CurrentConditions, DailyPoint, Forecast, HourlyPoint, PlaceCandidate},
    provider::{ForecastProvider, Geocoder},
    units::UnitPreferences,
};

pub fn paris() -> PlaceCandidate {
    PlaceCandidate {
        name: "Paris".into(),
        admin_region: Some("Île-de-France".into()),
        country: "France".into(),
        latitude: 48.8566,
        longitude: 2.3522,
    }
}

pub fn berlin() -> PlaceCandidate {
    PlaceCandidate {
        name: "Berlin".into(),
        admin_region: Some("Land Berlin".into()),
        country: "Germany".into(),
        latitude: 52.52437,
        longitude: 13.41053,
    }
}

/// 48 hourly points from 2024-06-01T00:00 local and 7 days from 2024-06-01,
/// Paris summer time (UTC+2). Metric units.
pub fn sample_forecast() -> Forecast {
    let day0 = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let midnight = day0.and_hms_opt(0, 0, 0).unwrap();

    let hourly = (0..48)
        .map(|i| HourlyPoint {
            timestamp: midnight + Duration::hours(i),
            temperature: Some(10.0 + i as f64 * 0.5),
            precipitation_probability: Some((i % 10 * 10) as f64),
            weather_code: Some(if i % 2 == 0 { 0 } else { 61 }),
        })
        .collect();

    let daily = (0..7)
        .map(|i| DailyPoint {
            date: day0 + Duration::days(i),
            weather_code: Some(3),
            temp_max: Some(24.6),
            temp_min: Some(13.4),
        })
        .collect();

    Forecast {
        timezone: "Europe/Paris".into(),
        utc_offset_seconds: 7200,
        current: CurrentConditions {
            temperature: Some(21.4),
            apparent_temperature: Some(20.6),
            humidity_percent: Some(64.0),
            wind_speed: Some(11.8),
            precipitation: Some(0.2),
            weather_code: Some(2),
        },
        hourly,
        daily,
    }
}

/// Geocoder answering from a fixed list by case-insensitive name prefix.
#[derive(Debug)]
pub struct StubGeocoder {
    places: Vec<PlaceCandidate>,
    fail: bool,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
    counts: Mutex<Vec<usize>>,
}

impl Default for StubGeocoder {
    fn default() -> Self {
        Self::with_places(vec![paris(), berlin()])
    }
}

impl StubGeocoder {
    pub fn with_places(places: Vec<PlaceCandidate>) -> Self {
        Self {
            places,
            fail: false,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
            counts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    /// The `count` passed with each search, in call order.
    pub fn counts(&self) -> Vec<usize> {
        self.counts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn search(&self, name: &str, count: usize) -> anyhow::Result<Vec<PlaceCandidate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(name.to_string());
        self.counts.lock().unwrap().push(count);

        if self.fail {
            return Err(anyhow!("connection refused"));
        }

        let needle = name.to_lowercase();
        Ok(self
            .places
            .iter()
            .filter(|p| p.name.to_lowercase().starts_with(&needle))
            .take(count)
            .cloned()
            .collect())
    }
}

/// Forecast provider that fails a set number of times, then returns
/// [`sample_forecast`].
#[derive(Debug, Default)]
pub struct StubForecast {
    failures_remaining: AtomicUsize,
    calls: AtomicUsize,
    units_seen: Mutex<Vec<UnitPreferences>>,
}

impl StubForecast {
    pub fn failing(times: usize) -> Self {
        Self {
            failures_remaining: AtomicUsize::new(times),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn units_seen(&self) -> Vec<UnitPreferences> {
        self.units_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ForecastProvider for StubForecast {
    async fn forecast(
        &self,
        _latitude: f64,
        _longitude: f64,
        units: &UnitPreferences,
    ) -> anyhow::Result<Forecast> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.units_seen.lock().unwrap().push(*units);

        let remaining = self.failures_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_remaining.store(remaining - 1, Ordering::SeqCst);
            return Err(anyhow!("forecast service unavailable"));
        }

        Ok(sample_forecast())
    }
}
